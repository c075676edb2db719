//! Data model for extracted documentation, independent of the output format.

/// A function definition found anywhere in the tree, at any nesting depth.
#[derive(Debug, Default)]
pub struct DocumentedFunction {
    pub name: String,
    /// Docstring text, absent when the body has no leading string literal.
    pub doc: Option<String>,
}

/// A function definition sitting directly inside a class body.
#[derive(Debug, Default)]
pub struct DocumentedMethod {
    pub name: String,
    pub doc: Option<String>,
}

/// A class definition together with the methods from its immediate body.
///
/// A class with no methods keeps an empty `methods` list rather than being
/// dropped from the output.
#[derive(Debug, Default)]
pub struct DocumentedClass {
    pub name: String,
    pub doc: Option<String>,
    pub methods: Vec<DocumentedMethod>,
}

/// Everything extracted from one source file, in tree-walk discovery order.
#[derive(Debug, Default)]
pub struct ParsedModule {
    pub functions: Vec<DocumentedFunction>,
    pub classes: Vec<DocumentedClass>,
}
