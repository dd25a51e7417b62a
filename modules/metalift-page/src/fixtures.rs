//! Canned host pages for tests and the dry-run binary.
//!
//! These model the editing surfaces the resolver has to cope with in the
//! wild: a fully-labeled studio editor, an unlabeled SPA re-render, sparse
//! single-field layouts, and pages with no editor at all.

use std::sync::Mutex;

use crate::element::{ElementNode, HostPage, PageSnapshot};

/// A fully-labeled editor page: semantic attributes on all three fields,
/// plus the usual toolbar noise.
pub fn studio_edit_page() -> PageSnapshot {
    PageSnapshot::new(vec![
        ElementNode::new("div")
            .with_attr("id", "editor-main")
            .with_attr("role", "main"),
        ElementNode::new("button").with_attr("aria-label", "Save"),
        ElementNode::new("input")
            .with_attr("aria-label", "Title (required)")
            .with_value("My Cooking Show Episode 4")
            .editable()
            .in_container("Details"),
        ElementNode::new("textarea")
            .with_attr("aria-label", "Description")
            .with_value("In this episode we make fresh pasta from scratch.")
            .editable()
            .in_container("Details"),
        ElementNode::new("input")
            .with_attr("aria-label", "Tags")
            .with_value("cooking, recipes, kitchen")
            .editable()
            .in_container("Tags"),
        ElementNode::new("input").with_attr("aria-label", "Search"),
    ])
}

/// A re-rendered page that dropped its labels: two bare contenteditable
/// regions and a chip input whose only hint is its enclosing container.
pub fn anonymous_two_field_page() -> PageSnapshot {
    PageSnapshot::new(vec![
        ElementNode::new("div").with_attr("class", "edit-form"),
        ElementNode::new("div")
            .with_attr("contenteditable", "true")
            .with_value("Short headline text")
            .editable(),
        ElementNode::new("div")
            .with_attr("contenteditable", "true")
            .with_value(
                "A much longer body of text that clearly reads like a description \
                 rather than a headline, spanning several clauses and sentences.",
            )
            .editable(),
        ElementNode::new("input")
            .with_attr("placeholder", "Add a tag")
            .editable()
            .in_container("Tags"),
    ])
}

/// A page with a single unlabeled editable region holding `value`.
pub fn single_field_page(value: &str) -> PageSnapshot {
    PageSnapshot::new(vec![
        ElementNode::new("div").with_attr("class", "edit-form"),
        ElementNode::new("div")
            .with_attr("contenteditable", "true")
            .with_value(value)
            .editable(),
    ])
}

/// A page whose only editable element is one empty, attribute-less input.
pub fn bare_unlabeled_page() -> PageSnapshot {
    PageSnapshot::new(vec![
        ElementNode::new("div"),
        ElementNode::new("input").editable(),
    ])
}

/// A non-editing page: nothing editable, no editor container.
pub fn no_editor_page() -> PageSnapshot {
    PageSnapshot::new(vec![
        ElementNode::new("div").with_attr("class", "browse-grid"),
        ElementNode::new("a").with_attr("href", "/watch/123"),
        ElementNode::new("a").with_attr("href", "/watch/456"),
    ])
}

/// In-memory [`HostPage`] whose tree and URL can be swapped underneath the
/// pipeline, simulating SPA re-renders and navigations.
pub struct FixturePage {
    elements: Mutex<Vec<ElementNode>>,
    url: Mutex<String>,
}

impl FixturePage {
    pub fn new(snapshot: PageSnapshot, url: &str) -> Self {
        let elements = snapshot.iter().map(|(_, e)| e.clone()).collect();
        Self {
            elements: Mutex::new(elements),
            url: Mutex::new(url.to_string()),
        }
    }

    /// The labeled studio editor at a stable URL.
    pub fn studio() -> Self {
        Self::new(studio_edit_page(), "https://studio.example/edit/abc123")
    }

    /// Replace the whole tree, as a host-page re-render would.
    pub fn set_snapshot(&self, snapshot: PageSnapshot) {
        *self.elements.lock().unwrap() = snapshot.iter().map(|(_, e)| e.clone()).collect();
    }

    /// Navigate to a different page identity.
    pub fn set_url(&self, url: &str) {
        *self.url.lock().unwrap() = url.to_string();
    }

    /// Simulate the user editing the first field whose `attr` contains
    /// `needle` (case-insensitive).
    pub fn edit_field(&self, attr: &str, needle: &str, value: &str) {
        let mut elements = self.elements.lock().unwrap();
        if let Some(element) = elements
            .iter_mut()
            .find(|e| e.editable && e.attr_contains(attr, needle))
        {
            element.value = value.to_string();
        }
    }
}

impl HostPage for FixturePage {
    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::new(self.elements.lock().unwrap().clone())
    }

    fn url(&self) -> String {
        self.url.lock().unwrap().clone()
    }
}
