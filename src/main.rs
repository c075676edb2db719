//! docforge — generate a Markdown summary of one Python file's functions,
//! classes, and docstrings.
//!
//! One linear pass per invocation: parse `Template.py` into a syntax tree,
//! render the extracted definitions as Markdown, write the result to
//! `Generated_Readmes/README.md`. Both paths are fixed, relative to the
//! working directory.

mod model;
mod mtime;
mod parser;
mod render;

use anyhow::{Context, Result};
use render::RenderContext;
use std::fs;
use std::path::Path;
use std::process;

const INPUT_FILE: &str = "Template.py";
const OUTPUT_FILE: &str = "Generated_Readmes/README.md";

const TOOL_NAME: &str = "DocForge";
const AUTHOR: &str = "Tristan-BS";

fn main() -> Result<()> {
    let input = Path::new(INPUT_FILE);

    // The one curated failure; everything after this surfaces as a raw
    // diagnostic from the error chain.
    if !input.exists() {
        println!("Error: {} not found", INPUT_FILE);
        process::exit(1);
    }

    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let module = parser::parse_file(input, &source)?;
    let last_modified = mtime::last_modified(input)?;

    let ctx = RenderContext {
        tool_name: TOOL_NAME,
        author: AUTHOR,
        version: env!("CARGO_PKG_VERSION"),
        last_modified: &last_modified,
    };
    let markdown = render::render(&module, &ctx);

    write_markdown(Path::new(OUTPUT_FILE), &markdown)?;
    println!("Markdown file generated: {}", OUTPUT_FILE);
    Ok(())
}

/// Write the rendered document, creating parent directories as needed and
/// overwriting any existing file.
fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory: {}", parent.display())
        })?;
    }
    fs::write(path, markdown).with_context(|| format!("failed to write {}", path.display()))
}
