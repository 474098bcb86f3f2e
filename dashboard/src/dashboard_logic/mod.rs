pub mod config;
pub mod input;
pub mod logger;
pub mod terminal;
