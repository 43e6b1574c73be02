//! Plain-text vCard documents (`BEGIN:VCARD` ... `END:VCARD`).
//!
//! Handles versions 2.1, 3.0 and 4.0: line folding, text escaping, RFC 6868
//! caret encoding of parameter values and 2.1 nameless `TYPE` parameters.

pub mod escape;
pub mod fold;
pub mod lexer;
pub mod reader;
pub mod writer;

pub use reader::{ReadOptions, read, read_single};
pub use writer::{write, write_single};
