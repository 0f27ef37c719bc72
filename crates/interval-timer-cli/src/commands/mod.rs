pub mod config;
pub mod preset;
pub mod timer;
