//! Curated keyword vocabularies shared by the scoring engine and the
//! fallback generator.

/// Words that historically pull clicks without being clickbait.
pub const ENGAGEMENT: &[&str] = &["best", "top", "ultimate", "essential", "proven", "complete"];

/// Words that signal freshness.
pub const TEMPORAL: &[&str] = &["new", "latest", "today", "now", "update"];

/// Words that carry an emotional hook.
pub const EMOTIONAL: &[&str] = &["amazing", "incredible", "stunning", "epic", "surprising"];

/// Phrases that promise something actionable.
pub const ACTIONABLE: &[&str] = &["how to", "guide", "tutorial", "tips", "tricks", "learn", "diy"];

/// Number of curated keywords (any category) found in `text_lower`.
/// Case-normalization is the caller's job.
pub fn curated_matches(text_lower: &str) -> usize {
    [ENGAGEMENT, TEMPORAL, EMOTIONAL, ACTIONABLE]
        .iter()
        .flat_map(|category| category.iter())
        .filter(|word| text_lower.contains(**word))
        .count()
}

/// Whether a single tag contains any curated keyword.
pub fn tag_has_keyword(tag_lower: &str) -> bool {
    curated_matches(tag_lower) > 0
}

/// Tokens dropped during fallback tag extraction. Everything under three
/// characters is dropped separately, so only longer filler words appear.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "from", "your", "you", "are", "was", "have",
    "has", "will", "can", "how", "what", "when", "where", "why", "its", "our", "out", "not", "but",
    "all", "one", "two", "get", "use", "using", "into", "about", "over", "more", "most", "some",
    "just", "like", "very", "than", "then", "them", "they", "their", "there", "here", "been",
    "being", "also", "each", "only", "other", "such", "these", "those", "which", "while",
    "would", "could", "should", "does", "doing", "make", "made", "video",
];

/// Call-to-action phrases of the subscribe/like/comment family. Used both to
/// reward descriptions that already engage and to keep the fallback
/// generator idempotent.
pub const CTA_PHRASES: &[&str] = &[
    "subscribe",
    "like this video",
    "like and",
    "comment below",
    "leave a comment",
    "turn on notifications",
];

/// Whether `text_lower` already carries an engagement call to action.
pub fn has_call_to_action(text_lower: &str) -> bool {
    CTA_PHRASES.iter().any(|phrase| text_lower.contains(phrase))
}
