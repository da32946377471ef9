// Frameworks layer: process bootstrap, env configuration and the demo runner.

pub mod config;
pub mod demo;
pub mod runtime;
