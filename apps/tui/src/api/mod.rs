pub mod actions;
pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod models;

pub use actions::Action;
pub use backend::Backend;
pub use client::{ApiClient, ApiEnvelope, Transport};
pub use error::ApiError;
pub use http::HttpTransport;
pub use memory::{MemoryTransport, Tables};
