pub mod config;
pub mod dtr;
pub mod error;
pub mod store;
pub mod utils;
pub mod web;
