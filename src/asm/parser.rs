//! Parser for Hack assembly commands.
//!
//! Operates over the logical-line vector produced by [`crate::source`],
//! so the assembler's two passes can walk the same input with two parser
//! instances. Classification is byte-level; C-instruction fields are
//! extracted with zero-copy slicing.

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommandType {
    /// @Xxx where Xxx is either a symbol or a decimal number
    ACommand,
    /// dest=comp;jump
    CCommand,
    /// (Xxx) label pseudo-command; defines a symbol, consumes no ROM address
    LCommand,
}

/// Parser for assembly lines with zero-copy string slicing.
pub struct Parser<'a> {
    lines: std::slice::Iter<'a, String>,
    current_line: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned before the first command.
    #[inline]
    #[must_use]
    pub fn from_lines(lines: &'a [String]) -> Self {
        Self {
            lines: lines.iter(),
            current_line: "",
        }
    }

    /// Advances to the next command; returns false at end of input.
    #[inline]
    pub fn advance(&mut self) -> bool {
        match self.lines.next() {
            Some(line) => {
                self.current_line = line;
                true
            }
            None => {
                self.current_line = "";
                false
            }
        }
    }

    /// The verbatim text of the current command, for error reporting.
    #[inline]
    #[must_use]
    pub fn current_line(&self) -> &'a str {
        self.current_line
    }

    /// Classifies the current command by its first byte.
    #[inline]
    pub fn command_type(&self) -> Result<CommandType> {
        match self.current_line.as_bytes().first() {
            Some(b'@') => Ok(CommandType::ACommand),
            Some(b'(') => Ok(CommandType::LCommand),
            Some(_) => Ok(CommandType::CCommand),
            None => Err(Error::lex(self.current_line)),
        }
    }

    /// The symbol of an A-command (`@X` → `X`) or L-command (`(X)` → `X`).
    ///
    /// An empty symbol, or an unterminated `(`, is a lex error.
    pub fn symbol(&self) -> Result<&'a str> {
        match self.command_type()? {
            CommandType::ACommand => {
                let symbol = &self.current_line[1..];
                if symbol.is_empty() {
                    return Err(Error::lex(self.current_line));
                }
                Ok(symbol)
            }
            CommandType::LCommand => self
                .current_line
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::lex(self.current_line)),
            CommandType::CCommand => Err(Error::lex(self.current_line)),
        }
    }

    /// The dest field of a C-command: everything before the first `=`.
    ///
    /// Empty when absent; validity is checked by the encoder tables.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> &'a str {
        match self.current_line.find('=') {
            Some(pos) => &self.current_line[..pos],
            None => "",
        }
    }

    /// The comp field of a C-command: between the first `=` and the last `;`.
    #[inline]
    #[must_use]
    pub fn comp(&self) -> &'a str {
        let start = self.current_line.find('=').map_or(0, |pos| pos + 1);
        let end = self
            .current_line
            .rfind(';')
            .filter(|&pos| pos >= start)
            .unwrap_or(self.current_line.len());
        &self.current_line[start..end]
    }

    /// The jump field of a C-command: everything after the last `;`.
    ///
    /// Empty when absent.
    #[inline]
    #[must_use]
    pub fn jump(&self) -> &'a str {
        match self.current_line.rfind(';') {
            Some(pos) => &self.current_line[pos + 1..],
            None => "",
        }
    }
}
