/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kinds and the shared node trait
/// - expressions: Definitions for the expression nodes
/// - items: Definitions for the program root and top level declarations
pub mod ast;
pub mod expressions;
pub mod items;
