//! Runtime module - drives the model without a window
//!
//! - `headless` - executes commands and applies startup options

pub mod headless;

pub use headless::Runner;
