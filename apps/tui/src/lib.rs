pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;

pub use catalog::Catalog;
pub use domain::{MappingKind, SearchCategory, Tab};
pub use engine::Store;
