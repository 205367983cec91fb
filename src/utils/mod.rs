pub mod config;
pub mod logger;
pub mod parser;
pub mod prompt;

pub use config::*;
pub use logger::*;
pub use parser::{ParseReport, parse, parse_report};
pub use prompt::*;
