//! The VM translator pipeline: stack-machine commands to Hack assembly.

pub mod code_writer;
pub mod parser;
pub mod translator;

pub use code_writer::{CodeWriter, Segment};
pub use parser::{CommandType, Parser};
pub use translator::translate;
