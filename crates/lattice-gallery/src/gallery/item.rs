//! Gallery items and the data they carry.
//!
//! A [`GalleryItem`] is a cheap, cloneable handle. Two handles are equal only
//! when they refer to the same item; two items holding equal data are still
//! distinct items. The data itself is an [`ItemData`] tree which value paths
//! navigate (see [`super::value`]).

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A structured (markup) element carried by an item.
///
/// Markup items resolve their value from their textual content when the
/// gallery has an empty value path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkupNode {
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// Creates an element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets an attribute using builder pattern.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the element's own text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element using builder pattern.
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&MarkupNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns all child elements.
    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Returns the element's own text, excluding descendants.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Concatenates the text of this element and all descendants in
    /// document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Data carried by a gallery item.
///
/// `ItemData` is the property graph a value path is applied against:
/// records are navigated by field name, lists by index, and markup by child
/// element or attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemData {
    /// No data.
    #[default]
    None,
    /// Boolean data.
    Bool(bool),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// String data.
    String(String),
    /// An ordered list of values.
    List(Vec<ItemData>),
    /// Named fields.
    Record(BTreeMap<String, ItemData>),
    /// A structured markup element.
    Markup(MarkupNode),
}

impl ItemData {
    /// Builds a record from `(field, value)` pairs.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<ItemData>,
        I: IntoIterator<Item = (K, V)>,
    {
        ItemData::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` if this is `ItemData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Attempts to get the data as a string slice.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a markup element.
    pub fn as_markup(&self) -> Option<&MarkupNode> {
        match self {
            ItemData::Markup(node) => Some(node),
            _ => None,
        }
    }

    /// Returns a record field.
    pub fn field(&self, name: &str) -> Option<&ItemData> {
        match self {
            ItemData::Record(fields) => fields.get(name),
            _ => None,
        }
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<i64> for ItemData {
    fn from(n: i64) -> Self {
        ItemData::Int(n)
    }
}

impl From<i32> for ItemData {
    fn from(n: i32) -> Self {
        ItemData::Int(i64::from(n))
    }
}

impl From<f64> for ItemData {
    fn from(n: f64) -> Self {
        ItemData::Float(n)
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Bool(b)
    }
}

impl From<MarkupNode> for ItemData {
    fn from(node: MarkupNode) -> Self {
        ItemData::Markup(node)
    }
}

impl<T: Into<ItemData>> From<Vec<T>> for ItemData {
    fn from(items: Vec<T>) -> Self {
        ItemData::List(items.into_iter().map(Into::into).collect())
    }
}

struct ItemInner {
    data: ItemData,
    command_parameter: Option<ItemData>,
}

/// A leaf item of the gallery.
///
/// Equality and hashing use identity: a clone of a handle equals the
/// original, but two separately created items never compare equal.
#[derive(Clone)]
pub struct GalleryItem {
    inner: Arc<ItemInner>,
}

impl GalleryItem {
    /// Creates an item carrying the given data.
    pub fn new(data: impl Into<ItemData>) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                data: data.into(),
                command_parameter: None,
            }),
        }
    }

    /// Creates an item with an explicit command parameter.
    pub fn with_command_parameter(data: impl Into<ItemData>, parameter: impl Into<ItemData>) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                data: data.into(),
                command_parameter: Some(parameter.into()),
            }),
        }
    }

    /// Returns the item's data.
    pub fn data(&self) -> &ItemData {
        &self.inner.data
    }

    /// Returns the parameter passed to the gallery command for this item.
    ///
    /// Falls back to the item's data when no explicit parameter was given.
    pub fn command_parameter(&self) -> ItemData {
        self.inner
            .command_parameter
            .clone()
            .unwrap_or_else(|| self.inner.data.clone())
    }

    /// Returns `true` if both handles refer to the same item.
    pub fn ptr_eq(&self, other: &GalleryItem) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for GalleryItem {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for GalleryItem {}

impl Hash for GalleryItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for GalleryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GalleryItem").field(&self.inner.data).finish()
    }
}

/// A resolved item value.
///
/// Identity resolution yields the item itself; path and markup resolution
/// yield data.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValue {
    /// The item is its own value.
    Item(GalleryItem),
    /// Data derived from the item.
    Data(ItemData),
}

impl ItemValue {
    /// Returns the item if this is an identity value.
    pub fn as_item(&self) -> Option<&GalleryItem> {
        match self {
            ItemValue::Item(item) => Some(item),
            ItemValue::Data(_) => None,
        }
    }

    /// Returns the data if this is a derived value.
    pub fn as_data(&self) -> Option<&ItemData> {
        match self {
            ItemValue::Item(_) => None,
            ItemValue::Data(data) => Some(data),
        }
    }
}

impl From<GalleryItem> for ItemValue {
    fn from(item: GalleryItem) -> Self {
        ItemValue::Item(item)
    }
}

impl From<ItemData> for ItemValue {
    fn from(data: ItemData) -> Self {
        ItemValue::Data(data)
    }
}

impl From<&str> for ItemValue {
    fn from(s: &str) -> Self {
        ItemValue::Data(ItemData::from(s))
    }
}

impl From<i64> for ItemValue {
    fn from(n: i64) -> Self {
        ItemValue::Data(ItemData::Int(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_identity_equality() {
        let a = GalleryItem::new("red");
        let b = GalleryItem::new("red");

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.data(), b.data());

        let set: HashSet<_> = [a.clone(), a.clone(), b.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_command_parameter_falls_back_to_data() {
        let plain = GalleryItem::new(7_i64);
        assert_eq!(plain.command_parameter(), ItemData::Int(7));

        let explicit = GalleryItem::with_command_parameter("Bold", "font-weight:bold");
        assert_eq!(
            explicit.command_parameter(),
            ItemData::String("font-weight:bold".into())
        );
    }

    #[test]
    fn test_markup_text_content_in_document_order() {
        let node = MarkupNode::new("swatch")
            .with_text("Deep ")
            .with_child(MarkupNode::new("b").with_text("Sea"))
            .with_child(MarkupNode::new("i").with_child(MarkupNode::new("u").with_text(" Blue")));

        assert_eq!(node.text_content(), "Deep Sea Blue");
        assert_eq!(node.child("b").and_then(MarkupNode::text), Some("Sea"));
    }

    #[test]
    fn test_record_builder() {
        let data = ItemData::record([("name", ItemData::from("Teal")), ("rgb", ItemData::from(0x008080_i64))]);
        assert_eq!(data.field("name").and_then(ItemData::as_string), Some("Teal"));
        assert_eq!(data.field("rgb").and_then(ItemData::as_int), Some(0x008080));
        assert!(data.field("missing").is_none());
    }
}
