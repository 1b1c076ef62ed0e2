pub mod actions;
pub mod config;
pub mod error;
pub mod format;
pub mod query;
pub mod state;
pub mod store;
pub mod upload;
pub mod upstream;
