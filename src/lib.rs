pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;
pub mod server;
pub mod types;
