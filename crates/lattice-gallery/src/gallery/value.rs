//! Value resolution.
//!
//! A [`ValueResolver`] derives an item's value from the gallery's value path:
//!
//! - no path: the item is its own value
//! - empty path: markup items resolve to their text content, anything else
//!   to itself
//! - non-empty path: the path is applied to the item's data
//!
//! # Path Syntax
//!
//! Paths use dot notation for fields, brackets for list indices and `@` for
//! markup attributes: `"color.name"`, `"swatches[2]"`, `"font.@family"`.
//! Fields applied to markup select the first child element with that name,
//! and indices applied to markup select child elements by position.

use super::item::{GalleryItem, ItemData, ItemValue, MarkupNode};

/// One step of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Record field or markup child element.
    Field(String),
    /// List element or markup child position.
    Index(usize),
    /// Markup attribute.
    Attribute(String),
}

/// A parsed, non-empty value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    source: String,
    segments: Vec<PathSegment>,
}

/// Position reached while applying a path.
#[derive(Clone, Copy)]
enum Step<'a> {
    Data(&'a ItemData),
    Node(&'a MarkupNode),
    Text(&'a str),
}

impl<'a> Step<'a> {
    fn markup(self) -> Option<&'a MarkupNode> {
        match self {
            Step::Data(ItemData::Markup(node)) => Some(node),
            Step::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl PropertyPath {
    /// Parses a path string.
    pub fn parse(path: &str) -> Self {
        Self {
            source: path.to_string(),
            segments: parse_segments(path),
        }
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Applies the path to `data`.
    ///
    /// Returns `None` if any segment is missing along the way or the path
    /// ends on `ItemData::None`.
    pub fn apply(&self, data: &ItemData) -> Option<ItemData> {
        let mut step = Step::Data(data);

        for segment in &self.segments {
            step = match (segment, step) {
                (PathSegment::Field(name), Step::Data(ItemData::Record(fields))) => {
                    Step::Data(fields.get(name)?)
                }
                (PathSegment::Index(idx), Step::Data(ItemData::List(items))) => {
                    Step::Data(items.get(*idx)?)
                }
                (PathSegment::Field(name), _) => Step::Node(step.markup()?.child(name)?),
                (PathSegment::Index(idx), _) => Step::Node(step.markup()?.children().get(*idx)?),
                (PathSegment::Attribute(name), _) => Step::Text(step.markup()?.attribute(name)?),
            };
        }

        match step {
            Step::Data(ItemData::None) => None,
            Step::Data(data) => Some(data.clone()),
            Step::Node(node) => Some(ItemData::Markup(node.clone())),
            Step::Text(text) => Some(ItemData::String(text.to_string())),
        }
    }
}

/// Parses a path string into its segments.
fn parse_segments(path: &str) -> Vec<PathSegment> {
    fn push_key(segments: &mut Vec<PathSegment>, key: &str) {
        if key.is_empty() {
            return;
        }
        match key.strip_prefix('@') {
            Some(attr) => segments.push(PathSegment::Attribute(attr.to_string())),
            None => segments.push(PathSegment::Field(key.to_string())),
        }
    }

    let mut segments = Vec::new();
    let mut key_start = 0;
    let mut chars = path.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '.' => {
                push_key(&mut segments, &path[key_start..i]);
                key_start = i + 1;
            }
            '[' => {
                push_key(&mut segments, &path[key_start..i]);

                let idx_start = i + 1;
                let mut idx_end = path.len();
                while let Some(&(j, ch)) = chars.peek() {
                    chars.next();
                    if ch == ']' {
                        idx_end = j;
                        break;
                    }
                }

                if let Ok(idx) = path[idx_start..idx_end].trim().parse::<usize>() {
                    segments.push(PathSegment::Index(idx));
                }

                if let Some(&(_, '.')) = chars.peek() {
                    chars.next();
                }
                key_start = chars.peek().map(|(j, _)| *j).unwrap_or(path.len());
            }
            _ => {}
        }
    }

    if key_start < path.len() {
        push_key(&mut segments, &path[key_start..]);
    }

    segments
}

/// Derives item values from the gallery's value path.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueResolver {
    /// The item is its own value.
    #[default]
    Identity,
    /// Apply a property path to the item's data.
    Path(PropertyPath),
    /// Markup items resolve to their text content.
    MarkupText,
}

impl ValueResolver {
    /// Builds a resolver from an optional value path.
    pub fn from_value_path(path: Option<&str>) -> Self {
        match path {
            None => ValueResolver::Identity,
            Some(p) if p.trim().is_empty() => ValueResolver::MarkupText,
            Some(p) => ValueResolver::Path(PropertyPath::parse(p.trim())),
        }
    }

    /// Returns the value path this resolver was built from.
    pub fn value_path(&self) -> Option<&str> {
        match self {
            ValueResolver::Identity => None,
            ValueResolver::MarkupText => Some(""),
            ValueResolver::Path(path) => Some(path.as_str()),
        }
    }

    /// Resolves the value of `item`.
    ///
    /// Returns `None` when a path cannot be applied to the item's data.
    pub fn resolve(&self, item: &GalleryItem) -> Option<ItemValue> {
        match self {
            ValueResolver::Identity => Some(ItemValue::Item(item.clone())),
            ValueResolver::MarkupText => match item.data() {
                ItemData::Markup(node) => Some(ItemValue::Data(ItemData::String(node.text_content()))),
                _ => Some(ItemValue::Item(item.clone())),
            },
            ValueResolver::Path(path) => path.apply(item.data()).map(ItemValue::Data),
        }
    }

    /// Returns `true` if `item` resolves to `value`.
    pub fn matches(&self, item: &GalleryItem, value: &ItemValue) -> bool {
        self.resolve(item).as_ref() == Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(name: &str, hex: i64) -> GalleryItem {
        GalleryItem::new(ItemData::record([
            ("name", ItemData::from(name)),
            ("hex", ItemData::from(hex)),
            ("tags", ItemData::from(vec!["warm", "bright"])),
        ]))
    }

    #[test]
    fn test_parse_segments() {
        let path = PropertyPath::parse("palette.swatches[2].@id");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("palette".into()),
                PathSegment::Field("swatches".into()),
                PathSegment::Index(2),
                PathSegment::Attribute("id".into()),
            ]
        );

        assert_eq!(PropertyPath::parse("[0][1]").segments(), &[PathSegment::Index(0), PathSegment::Index(1)]);
    }

    #[test]
    fn test_identity_resolution() {
        let item = color("Red", 0xff0000);
        let resolver = ValueResolver::from_value_path(None);
        assert_eq!(resolver.resolve(&item), Some(ItemValue::Item(item.clone())));
        assert_eq!(resolver.value_path(), None);
    }

    #[test]
    fn test_path_resolution() {
        let item = color("Red", 0xff0000);

        let by_name = ValueResolver::from_value_path(Some("name"));
        assert_eq!(by_name.resolve(&item), Some(ItemValue::from("Red")));

        let by_tag = ValueResolver::from_value_path(Some("tags[1]"));
        assert_eq!(by_tag.resolve(&item), Some(ItemValue::from("bright")));
        assert!(by_tag.matches(&item, &ItemValue::from("bright")));
    }

    #[test]
    fn test_missing_segment_yields_no_value() {
        let item = color("Red", 0xff0000);

        assert_eq!(ValueResolver::from_value_path(Some("missing")).resolve(&item), None);
        assert_eq!(ValueResolver::from_value_path(Some("tags[9]")).resolve(&item), None);
        assert_eq!(ValueResolver::from_value_path(Some("name.inner")).resolve(&item), None);
    }

    #[test]
    fn test_empty_path_uses_markup_text() {
        let markup = GalleryItem::new(
            MarkupNode::new("swatch")
                .with_text("Sky")
                .with_child(MarkupNode::new("em").with_text(" Blue")),
        );
        let plain = GalleryItem::new("plain");

        let resolver = ValueResolver::from_value_path(Some(""));
        assert_eq!(resolver, ValueResolver::MarkupText);
        assert_eq!(resolver.resolve(&markup), Some(ItemValue::from("Sky Blue")));
        assert_eq!(resolver.resolve(&plain), Some(ItemValue::Item(plain.clone())));
    }

    #[test]
    fn test_path_into_markup() {
        let item = GalleryItem::new(
            MarkupNode::new("font")
                .with_attribute("family", "Serif")
                .with_child(MarkupNode::new("size").with_text("12")),
        );

        let attr = ValueResolver::from_value_path(Some("@family"));
        assert_eq!(attr.resolve(&item), Some(ItemValue::from("Serif")));

        let child = ValueResolver::from_value_path(Some("size"));
        let resolved = child.resolve(&item);
        assert_eq!(
            resolved
                .as_ref()
                .and_then(ItemValue::as_data)
                .and_then(ItemData::as_markup)
                .map(MarkupNode::text_content),
            Some("12".to_string())
        );
    }
}
