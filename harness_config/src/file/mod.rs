//! Helpers for reading configuration documents from disk.

mod error;
mod loader;
mod parser;

pub use loader::{ensure_json_extension, load_document, require_file};
