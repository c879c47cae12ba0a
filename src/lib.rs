pub mod cache;
pub mod catalog_io;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod sampler;
pub mod scanner;
