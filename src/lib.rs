pub mod analyzers;
pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod source;
pub mod stats;
pub mod store;
