pub mod assets;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::Settings;
pub use error::ScrapeError;
pub use parser::{PageData, Row};
pub use pipeline::{Outcome, RunReport};
