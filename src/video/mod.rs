pub mod extract;
pub mod resolver;

pub use extract::*;
pub use resolver::*;
