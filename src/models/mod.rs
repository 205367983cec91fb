pub mod ollama;
pub mod recipe;

pub use ollama::*;
pub use recipe::*;
