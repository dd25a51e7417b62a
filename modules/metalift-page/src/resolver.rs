use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use metalift_common::{ExtractedMetadata, FieldRole, FieldsFound};

use crate::element::{ElementId, ElementNode, PageSnapshot};

/// Content length (chars) separating a short headline field from a long body
/// field when only one editable region exists.
const LENGTH_CLASSIFICATION_THRESHOLD: usize = 150;

/// Vocabulary for the contextual keyword-field scan.
const KEYWORD_CONTEXT_VOCAB: &[&str] = &["tag", "keyword", "chip"];

/// Attribute patterns identifying the host page's main editor region.
/// Checked in order; first match wins.
const CONTAINER_PATTERNS: &[(&str, &str)] = &[
    ("role", "main"),
    ("id", "editor"),
    ("id", "main"),
    ("class", "editor"),
    ("class", "edit-form"),
];

/// Which cascade tier a strategy implements. Exposed so tests can observe
/// tier ordering and short-circuiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    SemanticAttribute,
    PositionalLength,
    ContextualScan,
    LastResort,
}

/// One tier of the selector cascade. Strategies are pure: they read the
/// snapshot and return a candidate, never touching the page.
pub trait SelectorStrategy: Send + Sync {
    fn kind(&self) -> TierKind;

    /// First structurally-valid match for the role, in document order, or
    /// `None` if this tier has nothing. Elements in `claimed` already serve
    /// another role and must not be returned.
    fn locate(
        &self,
        role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId>;
}

// --- Tier 1: exact semantic-attribute patterns ---

pub struct SemanticAttributeTier;

impl SemanticAttributeTier {
    /// Ordered (attribute, needle) hints per role, most reliable first.
    fn patterns(role: FieldRole) -> &'static [(&'static str, &'static str)] {
        match role {
            FieldRole::PrimaryText => &[
                ("aria-label", "title"),
                ("placeholder", "title"),
                ("id", "title"),
                ("name", "title"),
            ],
            FieldRole::LongText => &[
                ("aria-label", "description"),
                ("placeholder", "description"),
                ("id", "description"),
                ("name", "description"),
            ],
            FieldRole::KeywordList => &[
                ("aria-label", "tags"),
                ("placeholder", "tags"),
                ("id", "tags"),
                ("name", "tags"),
                ("aria-label", "keywords"),
            ],
        }
    }
}

impl SelectorStrategy for SemanticAttributeTier {
    fn kind(&self) -> TierKind {
        TierKind::SemanticAttribute
    }

    fn locate(
        &self,
        role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId> {
        for (attr, needle) in Self::patterns(role) {
            let hit = snapshot
                .editable()
                .find(|(id, e)| !claimed.contains(id) && e.attr_contains(attr, needle))
                .map(|(id, _)| id);
            if hit.is_some() {
                return hit;
            }
        }
        None
    }
}

// --- Tier 2: positional/length heuristics ---

pub struct PositionalLengthTier;

/// Multi-line text regions (contenteditable divs, textareas). Single-line
/// inputs are chips and toolbars, never the headline or the body.
fn is_text_region(element: &ElementNode) -> bool {
    element.editable && !element.tag.eq_ignore_ascii_case("input")
}

impl SelectorStrategy for PositionalLengthTier {
    fn kind(&self) -> TierKind {
        TierKind::PositionalLength
    }

    fn locate(
        &self,
        role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId> {
        // Position tells us nothing about keyword fields.
        if role == FieldRole::KeywordList {
            return None;
        }

        let editable: Vec<(ElementId, &ElementNode)> = snapshot
            .editable()
            .filter(|(_, e)| is_text_region(e))
            .collect();

        let candidate = match editable.len() {
            // Two editable regions: the first is the headline, the second
            // the body.
            2 => match role {
                FieldRole::PrimaryText => Some(editable[0].0),
                FieldRole::LongText => Some(editable[1].0),
                FieldRole::KeywordList => None,
            },
            // One editable region: classify by content length.
            1 => {
                let (id, element) = editable[0];
                let short = element.value.chars().count() < LENGTH_CLASSIFICATION_THRESHOLD;
                match role {
                    FieldRole::PrimaryText if short => Some(id),
                    FieldRole::LongText if !short => Some(id),
                    _ => None,
                }
            }
            _ => None,
        };

        candidate.filter(|id| !claimed.contains(id))
    }
}

// --- Tier 3: contextual container scan ---

pub struct ContextualScanTier;

impl SelectorStrategy for ContextualScanTier {
    fn kind(&self) -> TierKind {
        TierKind::ContextualScan
    }

    fn locate(
        &self,
        role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId> {
        // The container scan only disambiguates keyword fields.
        if role != FieldRole::KeywordList {
            return None;
        }

        snapshot
            .editable()
            .find(|(id, e)| {
                if claimed.contains(id) {
                    return false;
                }
                let container = e.container_text.to_lowercase();
                KEYWORD_CONTEXT_VOCAB
                    .iter()
                    .any(|word| container.contains(word) || e.any_attr_contains(word))
            })
            .map(|(id, _)| id)
    }
}

// --- Tier 4: last resort ---

pub struct LastResortTier;

impl SelectorStrategy for LastResortTier {
    fn kind(&self) -> TierKind {
        TierKind::LastResort
    }

    fn locate(
        &self,
        _role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId> {
        snapshot
            .editable()
            .find(|(id, e)| !claimed.contains(id) && e.value.trim().is_empty())
            .map(|(id, _)| id)
    }
}

// --- Resolver ---

/// Chain-of-responsibility over the ordered tier list. Resolution is pure
/// and side-effect-free; absence is a normal outcome, not an error.
pub struct FieldResolver {
    tiers: Vec<Box<dyn SelectorStrategy>>,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldResolver {
    pub fn new() -> Self {
        Self {
            tiers: vec![
                Box::new(SemanticAttributeTier),
                Box::new(PositionalLengthTier),
                Box::new(ContextualScanTier),
                Box::new(LastResortTier),
            ],
        }
    }

    /// Replace the tier list. Tests use this to inject counting wrappers.
    pub fn with_tiers(tiers: Vec<Box<dyn SelectorStrategy>>) -> Self {
        Self { tiers }
    }

    /// Resolve one role against the snapshot. Tiers are tried in order;
    /// a later tier is consulted only when the entire current tier yields
    /// nothing.
    pub fn resolve(
        &self,
        role: FieldRole,
        snapshot: &PageSnapshot,
        claimed: &HashSet<ElementId>,
    ) -> Option<ElementId> {
        for tier in &self.tiers {
            if let Some(id) = tier.locate(role, snapshot, claimed) {
                debug!(%role, tier = ?tier.kind(), element = id, "Field resolved");
                return Some(id);
            }
        }
        debug!(%role, "Field not found in any tier");
        None
    }

    /// Full three-role read. Roles are resolved in a fixed order and claim
    /// their elements, so no element ever serves two roles.
    pub fn resolve_all(
        &self,
        snapshot: &PageSnapshot,
        source_url: &str,
        captured_at: DateTime<Utc>,
    ) -> ExtractedMetadata {
        let mut claimed = HashSet::new();
        let mut found = FieldsFound::default();

        let mut read = |role: FieldRole, found_flag: &mut bool| -> String {
            match self.resolve(role, snapshot, &claimed) {
                Some(id) => {
                    claimed.insert(id);
                    *found_flag = true;
                    snapshot.get(id).map(|e| e.value.clone()).unwrap_or_default()
                }
                None => {
                    *found_flag = false;
                    String::new()
                }
            }
        };

        let title = read(FieldRole::PrimaryText, &mut found.title);
        let description = read(FieldRole::LongText, &mut found.description);
        let tags = read(FieldRole::KeywordList, &mut found.tags);

        ExtractedMetadata {
            title,
            description,
            tags,
            fields_found: found,
            source_url: source_url.to_string(),
            captured_at,
        }
    }
}

/// Locate the host page's main editor region. Used by the lifecycle
/// controller's bounded wait; fields are only resolved once this exists.
pub fn find_container(snapshot: &PageSnapshot) -> Option<ElementId> {
    for (attr, needle) in CONTAINER_PATTERNS {
        let hit = snapshot.find(|e| e.attr_contains(attr, needle));
        if hit.is_some() {
            return hit;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Wraps a tier and counts how often it is consulted.
    struct CountingTier<S: SelectorStrategy> {
        inner: S,
        calls: Arc<AtomicU32>,
    }

    impl<S: SelectorStrategy> SelectorStrategy for CountingTier<S> {
        fn kind(&self) -> TierKind {
            self.inner.kind()
        }

        fn locate(
            &self,
            role: FieldRole,
            snapshot: &PageSnapshot,
            claimed: &HashSet<ElementId>,
        ) -> Option<ElementId> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.locate(role, snapshot, claimed)
        }
    }

    fn counting_resolver() -> (FieldResolver, [Arc<AtomicU32>; 4]) {
        let counters = [
            Arc::new(AtomicU32::new(0)),
            Arc::new(AtomicU32::new(0)),
            Arc::new(AtomicU32::new(0)),
            Arc::new(AtomicU32::new(0)),
        ];
        let resolver = FieldResolver::with_tiers(vec![
            Box::new(CountingTier {
                inner: SemanticAttributeTier,
                calls: counters[0].clone(),
            }),
            Box::new(CountingTier {
                inner: PositionalLengthTier,
                calls: counters[1].clone(),
            }),
            Box::new(CountingTier {
                inner: ContextualScanTier,
                calls: counters[2].clone(),
            }),
            Box::new(CountingTier {
                inner: LastResortTier,
                calls: counters[3].clone(),
            }),
        ]);
        (resolver, counters)
    }

    #[test]
    fn semantic_attributes_resolve_all_three_roles() {
        let snapshot = fixtures::studio_edit_page();
        let resolver = FieldResolver::new();
        let meta = resolver.resolve_all(&snapshot, "https://studio.example/edit/abc", Utc::now());

        assert!(meta.fields_found.all());
        assert_eq!(meta.title, "My Cooking Show Episode 4");
        assert!(meta.description.starts_with("In this episode"));
        assert_eq!(meta.tags, "cooking, recipes, kitchen");
    }

    #[test]
    fn tier_one_match_short_circuits_later_tiers() {
        let snapshot = fixtures::studio_edit_page();
        let (resolver, counters) = counting_resolver();

        let claimed = HashSet::new();
        let hit = resolver.resolve(FieldRole::PrimaryText, &snapshot, &claimed);

        assert!(hit.is_some());
        assert_eq!(counters[0].load(Ordering::SeqCst), 1);
        assert_eq!(counters[1].load(Ordering::SeqCst), 0);
        assert_eq!(counters[2].load(Ordering::SeqCst), 0);
        assert_eq!(counters[3].load(Ordering::SeqCst), 0);
    }

    #[test]
    fn two_unlabeled_regions_classify_by_position() {
        let snapshot = fixtures::anonymous_two_field_page();
        let resolver = FieldResolver::new();
        let meta = resolver.resolve_all(&snapshot, "https://studio.example/edit/def", Utc::now());

        assert!(meta.fields_found.title);
        assert!(meta.fields_found.description);
        assert_eq!(meta.title, "Short headline text");
        assert!(meta.description.starts_with("A much longer body"));
    }

    #[test]
    fn single_region_classifies_by_length() {
        let resolver = FieldResolver::new();
        let claimed = HashSet::new();

        let short = fixtures::single_field_page("A short draft title");
        assert!(resolver
            .resolve(FieldRole::PrimaryText, &short, &claimed)
            .is_some());
        assert!(resolver
            .resolve(FieldRole::LongText, &short, &claimed)
            .is_none());

        let long_value = "word ".repeat(60);
        let long = fixtures::single_field_page(&long_value);
        assert!(resolver
            .resolve(FieldRole::PrimaryText, &long, &claimed)
            .is_none());
        assert!(resolver
            .resolve(FieldRole::LongText, &long, &claimed)
            .is_some());
    }

    #[test]
    fn keyword_field_found_via_container_text() {
        let snapshot = fixtures::anonymous_two_field_page();
        let resolver = FieldResolver::new();
        let claimed = HashSet::new();

        let hit = resolver.resolve(FieldRole::KeywordList, &snapshot, &claimed);
        let element = snapshot.get(hit.expect("keyword field")).unwrap();
        assert!(element.container_text.to_lowercase().contains("tag"));
    }

    #[test]
    fn last_resort_takes_first_unclaimed_empty_field() {
        let snapshot = fixtures::bare_unlabeled_page();
        let (resolver, counters) = counting_resolver();
        let claimed = HashSet::new();

        let hit = resolver.resolve(FieldRole::KeywordList, &snapshot, &claimed);
        assert!(hit.is_some());
        // All four tiers were consulted before the last resort answered.
        for counter in &counters {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }

        // A claimed element is not offered twice.
        let mut claimed = HashSet::new();
        claimed.insert(hit.unwrap());
        assert!(resolver
            .resolve(FieldRole::KeywordList, &snapshot, &claimed)
            .is_none());
    }

    #[test]
    fn resolution_reports_absence_instead_of_guessing() {
        let snapshot = fixtures::no_editor_page();
        let resolver = FieldResolver::new();
        let meta = resolver.resolve_all(&snapshot, "https://studio.example/browse", Utc::now());

        assert!(meta.fields_found.none());
        assert!(meta.title.is_empty());
        assert!(meta.description.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn resolve_all_never_assigns_one_element_to_two_roles() {
        let snapshot = fixtures::single_field_page("short");
        let resolver = FieldResolver::new();
        let meta = resolver.resolve_all(&snapshot, "https://studio.example/edit", Utc::now());

        // The lone short field is claimed as the title; the description must
        // not fall back onto the same element, but the keyword list may take
        // it via last resort only if it is empty — here it is not.
        assert!(meta.fields_found.title);
        assert!(!meta.fields_found.description);
        assert!(!meta.fields_found.tags);
    }

    #[test]
    fn container_detection() {
        assert!(find_container(&fixtures::studio_edit_page()).is_some());
        assert!(find_container(&fixtures::no_editor_page()).is_none());
    }
}
