pub mod action;
pub mod client;
pub mod config;
pub mod interactive;
pub mod storage;
pub mod style;
pub mod testing;

pub use crate::config::Config;
