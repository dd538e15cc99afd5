pub mod args;
pub mod camera;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod dispatcher;
pub mod font;
pub mod gate;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod gate_tests;
