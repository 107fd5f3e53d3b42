pub mod action;
mod assets;
pub mod catalog;
pub mod checker;
pub mod config;
pub mod interactive;
pub mod problem;
pub mod progress;
pub mod sandbox;
pub mod stats;
pub mod style;

pub use crate::config::Config;
