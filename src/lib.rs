//! Toolchain for the Hack platform
//!
//! This crate provides the two translators that bridge the stack-oriented
//! VM language and the 16-bit Hack instruction set:
//!
//! - the **assembler** turns symbolic `.asm` programs into `.hack` machine
//!   code, one 16-bit ASCII word per line;
//! - the **VM translator** turns one or more `.vm` files into a single
//!   `.asm` program implementing a global stack machine with memory
//!   segments, branching, and a function calling convention.
//!
//! # Architecture
//!
//! Both pipelines consume logical lines from [`source`] and share the
//! error taxonomy in [`error`]:
//! - [`asm::parser`]: zero-copy classification of assembly commands
//! - [`asm::code`]: binary encoding using perfect hash functions (PHF)
//! - [`asm::symbol_table`]: symbol management with predefined symbols
//! - [`asm::assembler`]: the two-pass driver
//! - [`vm::parser`]: streaming classification of VM commands
//! - [`vm::code_writer`]: stateful emission of assembly blocks
//! - [`vm::translator`]: file resolution, bootstrap, and the command loop
//!
//! # Example
//!
//! ```rust
//! use hack_toolchain::asm::assemble;
//!
//! let lines = vec![
//!     "@2".to_string(),
//!     "D=A".to_string(),
//!     "@3".to_string(),
//!     "D=D+A".to_string(),
//! ];
//! let mut out = Vec::new();
//! assemble(&lines, &mut out).unwrap();
//!
//! let output = String::from_utf8(out).unwrap();
//! assert_eq!(output.lines().count(), 4);
//! assert_eq!(output.lines().next(), Some("0000000000000010"));
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod asm;
pub mod error;
pub mod logging;
pub mod source;
pub mod vm;

// Re-export commonly used types for convenience
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_full_assembly_workflow() {
        let source = "\
// Computes R0 = 2 + 3
@2
D=A
@3
D=D+A
@0
M=D
";
        let lines: Vec<String> = source::LineReader::new(Cursor::new(source))
            .collect::<std::io::Result<_>>()
            .unwrap();
        let mut out = Vec::new();
        asm::assemble(&lines, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let words: Vec<&str> = output.lines().collect();
        assert_eq!(words.len(), 6);
        assert_eq!(words[0], "0000000000000010"); // @2
        assert_eq!(words[1], "1110110000010000"); // D=A
        assert!(words.iter().all(|w| w.len() == 16));
    }

    #[test]
    fn test_full_translation_workflow() {
        let source = "push constant 7\npush constant 8\nadd\n";
        let mut parser = vm::Parser::new(Cursor::new(source)).unwrap();
        let mut writer = vm::CodeWriter::new(Vec::new());
        writer.set_file_name("Simple");
        vm::translator::translate_commands(&mut parser, &mut writer).unwrap();

        let assembly = String::from_utf8(writer.into_inner()).unwrap();
        assert!(assembly.contains("@7"));
        assert!(assembly.contains("@8"));
        assert!(assembly.contains("M=D+M"));

        // The emitted assembly is itself valid assembler input.
        let lines: Vec<String> = source::LineReader::new(Cursor::new(assembly.as_str()))
            .collect::<std::io::Result<_>>()
            .unwrap();
        let mut binary = Vec::new();
        asm::assemble(&lines, &mut binary).unwrap();
        assert!(!binary.is_empty());
    }
}
