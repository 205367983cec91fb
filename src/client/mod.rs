pub mod ollama;
pub mod service;

pub use ollama::*;
pub use service::*;
