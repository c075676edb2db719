//! Python syntax-tree extractor.
//!
//! Parses a source file with the tree-sitter Python grammar and walks the
//! whole tree breadth-first, collecting:
//!
//! - every `function_definition`, at any nesting depth, into a flat list
//! - every `class_definition`, with methods taken from its immediate body
//!
//! The flat function list deliberately includes nested functions and class
//! methods; discovery order is breadth-first, so shallower definitions come
//! before deeper ones regardless of source position.

use crate::model::{DocumentedClass, DocumentedFunction, DocumentedMethod, ParsedModule};
use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use tree_sitter::{Node, Parser};

/// Parse Python source text into a ParsedModule.
///
/// Fails when the text is not syntactically valid Python.
pub fn parse(source: &str) -> Result<ParsedModule> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .context("failed to load Python grammar")?;

    let tree = parser
        .parse(source, None)
        .context("tree-sitter returned no syntax tree")?;
    if tree.root_node().has_error() {
        bail!("syntax error in Python source");
    }

    let src = source.as_bytes();
    let mut module = ParsedModule::default();

    let mut queue = VecDeque::new();
    queue.push_back(tree.root_node());
    while let Some(node) = queue.pop_front() {
        match node.kind() {
            "function_definition" => {
                if let Some((name, doc)) = definition_parts(node, src) {
                    module.functions.push(DocumentedFunction { name, doc });
                }
            }
            "class_definition" => {
                if let Some(class) = documented_class(node, src) {
                    module.classes.push(class);
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            // Decorators wrap the real definition one level down; unwrap so
            // discovery order does not depend on whether a definition is
            // decorated.
            let child = if child.kind() == "decorated_definition" {
                child.child_by_field_name("definition").unwrap_or(child)
            } else {
                child
            };
            queue.push_back(child);
        }
    }

    Ok(module)
}

/// Name and docstring of a function or class definition node.
fn definition_parts(def: Node, src: &[u8]) -> Option<(String, Option<String>)> {
    let name = def
        .child_by_field_name("name")?
        .utf8_text(src)
        .ok()?
        .to_string();
    if name.is_empty() {
        return None;
    }
    Some((name, docstring(def, src)))
}

fn documented_class(def: Node, src: &[u8]) -> Option<DocumentedClass> {
    let (name, doc) = definition_parts(def, src)?;
    let body = def.child_by_field_name("body")?;

    // Methods come from the class's immediate body only, one level deep.
    let mut methods = Vec::new();
    let mut cursor = body.walk();
    for stmt in body.named_children(&mut cursor) {
        let method = match stmt.kind() {
            "function_definition" => Some(stmt),
            // Decorators wrap the definition one level down.
            "decorated_definition" => stmt
                .child_by_field_name("definition")
                .filter(|d| d.kind() == "function_definition"),
            _ => None,
        };
        if let Some(method) = method {
            if let Some((name, doc)) = definition_parts(method, src) {
                methods.push(DocumentedMethod { name, doc });
            }
        }
    }

    Some(DocumentedClass { name, doc, methods })
}

/// Docstring of a definition: the first statement of its body, if and only
/// if that statement is a plain string literal.
fn docstring(def: Node, src: &[u8]) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    let raw = string_value(expr, src)?;
    let cleaned = clean_docstring(&raw);
    // A whitespace-only docstring cleans to nothing; treat it as absent so
    // the renderer falls back to the placeholder.
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned)
}

/// Literal value of a string node, with escape sequences decoded.
///
/// Bytes literals and f-strings are not docstrings; a prefix carrying `b` or
/// `f` (or any interpolation) disqualifies the node.
fn string_value(string: Node, src: &[u8]) -> Option<String> {
    let mut is_raw = false;
    let mut value = String::new();
    let mut cursor = string.walk();
    for part in string.named_children(&mut cursor) {
        match part.kind() {
            "string_start" => {
                let prefix = part.utf8_text(src).ok()?.to_ascii_lowercase();
                if prefix.contains('b') || prefix.contains('f') {
                    return None;
                }
                is_raw = prefix.contains('r');
            }
            "string_content" => {
                let text = part.utf8_text(src).ok()?;
                if is_raw {
                    value.push_str(text);
                } else {
                    value.push_str(&decode_escapes(text));
                }
            }
            "interpolation" => return None,
            _ => {}
        }
    }
    Some(value)
}

fn decode_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // Line continuation swallows the newline.
            Some('\n') => {}
            // Unrecognized escapes stay verbatim, as in Python.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Normalize a docstring the way the Python convention prescribes: expand
/// tabs, strip leading whitespace from the first line, remove the common
/// leading indentation from the remaining lines, and drop surrounding blank
/// lines.
fn clean_docstring(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let mut lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim_start_matches(' ').is_empty())
        .map(|l| l.len() - l.trim_start_matches(' ').len())
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start_matches(' ').to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }

    lines.join("\n")
}

/// Replace each tab with spaces up to the next 8-column tab stop, so mixed
/// space-and-tab indentation measures the same margin as it displays.
fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                for _ in 0..pad {
                    out.push(' ');
                }
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_with_docstring() {
        let module =
            parse("def add(a, b):\n    \"\"\"Adds two numbers.\"\"\"\n    return a + b\n").unwrap();
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].name, "add");
        assert_eq!(module.functions[0].doc.as_deref(), Some("Adds two numbers."));
        assert!(module.classes.is_empty());
    }

    #[test]
    fn function_without_docstring() {
        let module = parse("def noop():\n    pass\n").unwrap();
        assert_eq!(module.functions.len(), 1);
        assert!(module.functions[0].doc.is_none());
    }

    #[test]
    fn leading_non_string_statement_is_not_a_docstring() {
        let module = parse("def f():\n    x = 'not a docstring'\n    return x\n").unwrap();
        assert!(module.functions[0].doc.is_none());
    }

    #[test]
    fn fstring_is_not_a_docstring() {
        let module = parse("def f():\n    f\"hello {name}\"\n").unwrap();
        assert!(module.functions[0].doc.is_none());
    }

    #[test]
    fn nested_functions_go_into_the_flat_list() {
        let source = "\
def outer():
    def inner():
        \"\"\"Hidden.\"\"\"
        pass

def later():
    pass
";
        let module = parse(source).unwrap();
        let names: Vec<&str> = module.functions.iter().map(|f| f.name.as_str()).collect();
        // Breadth-first: both top-level definitions precede the nested one.
        assert_eq!(names, ["outer", "later", "inner"]);
        assert_eq!(module.functions[2].doc.as_deref(), Some("Hidden."));
    }

    #[test]
    fn class_with_docstring_and_methods() {
        let source = "\
class Greeter:
    \"\"\"Greets people.\"\"\"

    def hello(self):
        pass
";
        let module = parse(source).unwrap();
        assert_eq!(module.classes.len(), 1);
        let class = &module.classes[0];
        assert_eq!(class.name, "Greeter");
        assert_eq!(class.doc.as_deref(), Some("Greets people."));
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "hello");
        assert!(class.methods[0].doc.is_none());
    }

    #[test]
    fn methods_also_land_in_the_flat_function_list() {
        let source = "\
class Greeter:
    def hello(self):
        pass
";
        let module = parse(source).unwrap();
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].name, "hello");
    }

    #[test]
    fn class_without_methods_keeps_empty_list() {
        let module = parse("class Empty:\n    \"\"\"Nothing here.\"\"\"\n").unwrap();
        assert_eq!(module.classes.len(), 1);
        assert!(module.classes[0].methods.is_empty());
    }

    #[test]
    fn function_nested_inside_a_method_is_not_a_method() {
        let source = "\
class C:
    def m(self):
        def helper():
            pass
";
        let module = parse(source).unwrap();
        let class = &module.classes[0];
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "m");
        // ...but the deep walk still finds it as a function.
        let names: Vec<&str> = module.functions.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"helper"));
    }

    #[test]
    fn decorated_method_is_collected() {
        let source = "\
class C:
    @staticmethod
    def build():
        \"\"\"Builds a C.\"\"\"
        pass
";
        let module = parse(source).unwrap();
        let class = &module.classes[0];
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "build");
        assert_eq!(class.methods[0].doc.as_deref(), Some("Builds a C."));
    }

    #[test]
    fn non_function_class_members_are_ignored() {
        let source = "\
class C:
    VERSION = 1

    def m(self):
        pass
";
        let module = parse(source).unwrap();
        assert_eq!(module.classes[0].methods.len(), 1);
    }

    #[test]
    fn empty_module_is_valid() {
        let module = parse("x = 1\n").unwrap();
        assert!(module.functions.is_empty());
        assert!(module.classes.is_empty());
    }

    #[test]
    fn syntax_error_is_rejected() {
        let err = parse("def broken(:\n    pass\n").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn multiline_docstring_is_unindented() {
        let source = "\
def f():
    \"\"\"Summary line.

    Indented detail.
    \"\"\"
    pass
";
        let module = parse(source).unwrap();
        assert_eq!(
            module.functions[0].doc.as_deref(),
            Some("Summary line.\n\nIndented detail.")
        );
    }

    #[test]
    fn single_quoted_docstring() {
        let module = parse("def f():\n    'short doc'\n").unwrap();
        assert_eq!(module.functions[0].doc.as_deref(), Some("short doc"));
    }

    #[test]
    fn escape_sequences_are_decoded() {
        let module = parse("def f():\n    \"line one\\nline two\"\n").unwrap();
        assert_eq!(module.functions[0].doc.as_deref(), Some("line one\nline two"));
    }

    #[test]
    fn raw_docstring_keeps_backslashes() {
        let module = parse("def f():\n    r\"matches \\d+\"\n").unwrap();
        assert_eq!(module.functions[0].doc.as_deref(), Some("matches \\d+"));
    }

    #[test]
    fn bytes_literal_is_not_a_docstring() {
        let module = parse("def f():\n    b\"raw bytes\"\n").unwrap();
        assert!(module.functions[0].doc.is_none());
    }

    #[test]
    fn whitespace_only_docstring_is_absent() {
        let module = parse("def f():\n    \"\"\"   \"\"\"\n").unwrap();
        assert!(module.functions[0].doc.is_none());
    }

    #[test]
    fn empty_docstring_is_absent() {
        let module = parse("class C:\n    \"\"\"\"\"\"\n").unwrap();
        assert!(module.classes[0].doc.is_none());
    }

    #[test]
    fn tabs_expand_to_tab_stops() {
        // A space followed by a tab lands on the same 8-column stop as
        // eight spaces, so both lines share one margin.
        let source = "\
def f():
    \"\"\"Top
 \tindented
        also
    \"\"\"
    pass
";
        let module = parse(source).unwrap();
        assert_eq!(
            module.functions[0].doc.as_deref(),
            Some("Top\nindented\nalso")
        );
    }

    #[test]
    fn decorator_does_not_delay_discovery_order() {
        let source = "\
@cached
def first():
    pass

def second():
    def inner():
        pass
";
        let module = parse(source).unwrap();
        let names: Vec<&str> = module.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "inner"]);
    }

    #[test]
    fn comment_before_docstring_is_skipped() {
        let module = parse("def f():\n    # leading comment\n    \"\"\"Doc.\"\"\"\n").unwrap();
        assert_eq!(module.functions[0].doc.as_deref(), Some("Doc."));
    }
}
