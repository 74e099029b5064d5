pub mod changes;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod load_config;
pub mod process;
pub mod report;

pub use cli::{run, Cli};
