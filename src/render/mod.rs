//! Rendering module for writing outline results as JSON.

mod json;

pub use json::{to_json, write_json, JsonFormat};
