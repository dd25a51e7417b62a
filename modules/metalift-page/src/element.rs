use serde::{Deserialize, Serialize};

/// Index into a [`PageSnapshot`]. Ids are assigned in document order, so
/// comparing ids is comparing document position.
pub type ElementId = usize;

/// One element as observed on the host page. The host tree is a boundary
/// contract, not HTML: nothing here assumes a browser beyond "elements have
/// attributes, content, and an enclosing labeled container".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    /// Current editable content (input value, textarea text, or the text of
    /// a contenteditable region).
    pub value: String,
    pub editable: bool,
    /// Visible text of the enclosing labeled container, for contextual
    /// matching when the element itself carries no useful attributes.
    pub container_text: String,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn in_container(mut self, text: &str) -> Self {
        self.container_text = text.to_string();
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Case-insensitive substring match on one attribute's value.
    pub fn attr_contains(&self, name: &str, needle: &str) -> bool {
        self.attr(name)
            .map(|v| v.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }

    /// Case-insensitive substring match across all attribute values.
    pub fn any_attr_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.attributes
            .iter()
            .any(|(_, v)| v.to_lowercase().contains(&needle))
    }
}

/// Immutable read of the host page's element tree, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    elements: Vec<ElementNode>,
}

impl PageSnapshot {
    pub fn new(elements: Vec<ElementNode>) -> Self {
        Self { elements }
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.elements.get(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements with their ids, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &ElementNode)> {
        self.elements.iter().enumerate()
    }

    /// Currently-editable elements, in document order.
    pub fn editable(&self) -> impl Iterator<Item = (ElementId, &ElementNode)> {
        self.iter().filter(|(_, e)| e.editable)
    }

    /// First element (document order) satisfying the predicate.
    pub fn find(&self, mut pred: impl FnMut(&ElementNode) -> bool) -> Option<ElementId> {
        self.iter().find(|(_, e)| pred(e)).map(|(id, _)| id)
    }
}

/// Read-only boundary to the host page. Implementations hand out immutable
/// snapshots; the pipeline never mutates the page through this trait.
///
/// Edit-type interaction events are observed by the embedding layer and
/// surfaced to the controller directly, so they are not part of this
/// contract.
pub trait HostPage: Send + Sync {
    /// Snapshot of the current element tree.
    fn snapshot(&self) -> PageSnapshot;

    /// Current page URL, used as the page-identity token.
    fn url(&self) -> String;
}
