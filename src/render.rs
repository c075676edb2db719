//! Markdown renderer.
//!
//! Produces the fixed section layout (Functions, Classes, Methods, Credits)
//! byte-for-byte: the same module and context always render to the same
//! string, so generated files are reproducible.

use crate::model::ParsedModule;

/// Placeholder for entities without an attached docstring.
const NO_DOC: &str = "No documentation available.";

/// Tool identity and timestamp handed to the renderer as configuration
/// rather than embedded literals.
pub struct RenderContext<'a> {
    pub tool_name: &'a str,
    pub author: &'a str,
    pub version: &'a str,
    pub last_modified: &'a str,
}

/// Render a ParsedModule into the final Markdown document.
pub fn render(module: &ParsedModule, ctx: &RenderContext) -> String {
    let mut output = String::from("# Documentation\n\n");

    if !module.functions.is_empty() {
        output.push_str("## Functions\n\n");
        for func in &module.functions {
            output.push_str(&format!("### {}\n", func.name));
            output.push_str(&format!("{}\n\n", func.doc.as_deref().unwrap_or(NO_DOC)));
        }
    }

    if !module.classes.is_empty() {
        output.push_str("## Classes\n\n");
        for class in &module.classes {
            output.push_str(&format!("### {}\n", class.name));
            output.push_str(&format!("{}\n\n", class.doc.as_deref().unwrap_or(NO_DOC)));
            if !class.methods.is_empty() {
                output.push_str("#### Methods\n");
                for method in &class.methods {
                    output.push_str(&format!(
                        "- **{}**: {}\n",
                        method.name,
                        method.doc.as_deref().unwrap_or(NO_DOC)
                    ));
                }
                output.push('\n');
            }
        }
    }

    output.push_str("\n## Credits\n");
    output.push_str(&format!(
        "This README was generated using **{}** (created by {}).\n",
        ctx.tool_name, ctx.author
    ));
    output.push_str(&format!("{} version: {}\n", ctx.tool_name, ctx.version));
    output.push_str(&format!("Last modified on: {}\n", ctx.last_modified));

    output
}
