//! Parser module — dispatch by file extension.

pub mod python;

use crate::model::ParsedModule;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Parse a source file into a ParsedModule based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<ParsedModule> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("py") => python::parse(content),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}
