include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod dev_utils;
pub mod extension;
pub mod models;
pub mod state;
pub mod system;
