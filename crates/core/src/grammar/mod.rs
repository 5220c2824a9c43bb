/// Menu definition abstract syntax tree types.
pub mod ast;
/// JSON serialization helpers for the tree, used by `--debug` dumps.
pub mod dump;
/// Line-oriented tokenizer.
pub mod lexer;
/// Recursive-descent parser that turns tokens into a [`ast::MenuFile`].
pub mod parser;
