//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and the loaded configuration.

pub mod config;
pub mod output;
pub mod select;

pub use config::execute as config;
pub use select::execute as select;
