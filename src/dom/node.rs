use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node inside a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tags laid out inline when no explicit `display` is set.
const INLINE_TAGS: &[&str] = &["button", "span", "a", "label"];

/// Inline style properties of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) style: Style,
}

impl Node {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            text: None,
            parent: None,
            children: Vec::new(),
            style: Style::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub const fn style(&self) -> &Style {
        &self.style
    }

    pub fn is_hidden(&self) -> bool {
        self.style.get("display") == Some("none")
    }

    /// Whether the element joins a row with its inline siblings.
    pub fn is_inline(&self) -> bool {
        match self.style.get("display") {
            Some("inline" | "inline-block") => true,
            Some(_) => false,
            None => INLINE_TAGS.contains(&self.tag.as_str()),
        }
    }

    /// Whether the element is taken out of the flow of its parent.
    pub fn is_positioned(&self) -> bool {
        matches!(self.style.get("position"), Some("absolute" | "fixed"))
    }

    /// The value `show()` restores for this element.
    pub(crate) fn shown_display(&self) -> &'static str {
        if INLINE_TAGS.contains(&self.tag.as_str()) {
            "inline-block"
        } else {
            "block"
        }
    }
}
