pub mod cache;
pub mod element;
pub mod fixtures;
pub mod resolver;

pub use cache::MetadataCache;
pub use element::{ElementId, ElementNode, HostPage, PageSnapshot};
pub use resolver::{FieldResolver, SelectorStrategy, TierKind};
