// src/core/mod.rs

pub mod alias;
pub mod arg_parser;
pub mod commons;
pub mod config_loader;
pub mod environment;
pub mod parameters;
pub mod paths;
pub mod tokenizer;
