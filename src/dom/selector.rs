//! A small subset of CSS selectors: compound selectors made of a tag, `#id`
//! and `.class` parts, joined by the descendant combinator.

use super::node::Node;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        self.tag.as_deref().is_none_or(|tag| tag == node.tag())
            && self.id.as_deref().is_none_or(|id| Some(id) == node.id())
            && self.classes.iter().all(|class| node.has_class(class))
    }
}

/// A parsed selector such as `".modal-footer button.confirm"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Outermost compound first.
    parts: Vec<Compound>,
}

impl Selector {
    /// Parse a selector. Returns `None` for empty input or anything outside
    /// the supported subset.
    pub fn parse(input: &str) -> Option<Self> {
        let parts = input
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// Whether `node` matches, given its chain of ancestors from the nearest
    /// parent outwards.
    pub(crate) fn matches<'a>(
        &self,
        node: &Node,
        mut ancestors: impl Iterator<Item = &'a Node>,
    ) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|ancestor| compound.matches(ancestor)))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(input: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = input;

    if let Some(stripped) = rest.strip_prefix('*') {
        rest = stripped;
    } else {
        let end = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if end > 0 {
            compound.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
        }
    }

    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(|c: char| !is_name_char(c)).unwrap_or(body.len());
        if end == 0 {
            return None;
        }
        let name = body[..end].to_string();
        match marker {
            '.' => compound.classes.push(name),
            '#' => compound.id = Some(name),
            _ => return None,
        }
        rest = &body[end..];
    }

    Some(compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(tag: &str, classes: &[&str]) -> Node {
        let mut node = Node::new(tag);
        node.classes = classes.iter().map(ToString::to_string).collect();
        node
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("   ").is_none());
        assert!(Selector::parse("div > p").is_none());
        assert!(Selector::parse(".").is_none());
        assert!(Selector::parse("a[href]").is_none());
    }

    #[test]
    fn test_compound_match() {
        let button = node("button", &["confirm", "primary"]);
        assert!(Selector::parse("button.confirm").unwrap().matches(&button, std::iter::empty()));
        assert!(Selector::parse(".primary").unwrap().matches(&button, std::iter::empty()));
        assert!(Selector::parse("*").unwrap().matches(&button, std::iter::empty()));
        assert!(!Selector::parse("div.confirm").unwrap().matches(&button, std::iter::empty()));
        assert!(!Selector::parse("button.cancel").unwrap().matches(&button, std::iter::empty()));
    }

    #[test]
    fn test_id_match() {
        let mut root = node("div", &[]);
        root.id = Some("dialog".to_string());
        assert!(Selector::parse("#dialog").unwrap().matches(&root, std::iter::empty()));
        assert!(!Selector::parse("#other").unwrap().matches(&root, std::iter::empty()));
    }

    #[test]
    fn test_descendant_match() {
        let button = node("button", &["confirm"]);
        let footer = node("div", &["modal-footer"]);
        let panel = node("div", &["modal"]);
        let selector = Selector::parse(".modal .modal-footer button.confirm").unwrap();
        assert!(selector.matches(&button, [&footer, &panel].into_iter()));
        assert!(!selector.matches(&button, [&panel, &footer].into_iter()));
        assert!(!selector.matches(&button, [&footer].into_iter()));
    }
}
