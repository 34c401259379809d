pub mod config;
pub mod interactive_cmd;
pub mod report;
pub mod snapshot;
