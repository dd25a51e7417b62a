pub mod engine;
pub mod fallback;
pub mod keywords;

pub use engine::{score, MAX_CONDENSED_SUGGESTIONS};
pub use fallback::{
    classify, fallback_description, fallback_tags, fallback_title, ContentKind, MAX_FALLBACK_TAGS,
};
