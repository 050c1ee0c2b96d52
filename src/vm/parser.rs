//! Parser for VM commands.
//!
//! Streams logical lines lazily with one command of lookahead, so
//! `has_more_commands` stays a pure query. Tokens of the current command
//! are split once and cached.

use std::io::{self, BufRead};

use crate::error::{Error, Result};
use crate::source::LineReader;

/// The nine kinds of VM command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Arithmetic,
    Push,
    Pop,
    Label,
    Goto,
    IfGoto,
    Function,
    Call,
    Return,
}

pub struct Parser<R> {
    lines: LineReader<R>,
    current: String,
    parts: Vec<String>,
    next: Option<String>,
}

impl<R: BufRead> Parser<R> {
    /// Primes the lookahead. There is no current command until the first
    /// `advance`.
    pub fn new(input: R) -> io::Result<Self> {
        let mut lines = LineReader::new(input);
        let next = lines.next().transpose()?;
        Ok(Self {
            lines,
            current: String::new(),
            parts: Vec::new(),
            next,
        })
    }

    #[inline]
    #[must_use]
    pub fn has_more_commands(&self) -> bool {
        self.next.is_some()
    }

    /// Makes the next command current and refills the lookahead.
    ///
    /// Call only while `has_more_commands` is true.
    pub fn advance(&mut self) -> io::Result<()> {
        if let Some(line) = self.next.take() {
            self.current = line;
            self.parts.clear();
            self.parts
                .extend(self.current.split_whitespace().map(str::to_string));
            self.next = self.lines.next().transpose()?;
        }
        Ok(())
    }

    /// The verbatim text of the current command, for error reporting.
    #[inline]
    #[must_use]
    pub fn current_command(&self) -> &str {
        &self.current
    }

    /// Classifies the current command by its first token.
    pub fn command_type(&self) -> Result<CommandType> {
        let keyword = self.parts.first().map_or("", String::as_str);
        match keyword {
            "add" | "sub" | "neg" | "eq" | "gt" | "lt" | "and" | "or" | "not" => {
                Ok(CommandType::Arithmetic)
            }
            "push" => Ok(CommandType::Push),
            "pop" => Ok(CommandType::Pop),
            "label" => Ok(CommandType::Label),
            "goto" => Ok(CommandType::Goto),
            "if-goto" => Ok(CommandType::IfGoto),
            "function" => Ok(CommandType::Function),
            "call" => Ok(CommandType::Call),
            "return" => Ok(CommandType::Return),
            _ => Err(Error::lex(self.current.as_str())),
        }
    }

    /// The first argument; for arithmetic commands, the operator itself.
    ///
    /// Must not be called for `return`.
    pub fn arg1(&self) -> Result<&str> {
        match self.command_type()? {
            CommandType::Arithmetic => Ok(&self.parts[0]),
            CommandType::Return => {
                Err(Error::bad_argument(self.current.as_str(), "return takes no arguments"))
            }
            _ => self
                .parts
                .get(1)
                .map(String::as_str)
                .ok_or_else(|| Error::bad_argument(self.current.as_str(), "missing argument")),
        }
    }

    /// The second argument, as a non-negative decimal integer.
    ///
    /// Defined only for `push`, `pop`, `function`, and `call`.
    pub fn arg2(&self) -> Result<u16> {
        let raw = self
            .parts
            .get(2)
            .ok_or_else(|| Error::bad_argument(self.current.as_str(), "missing numeric argument"))?;
        raw.parse().map_err(|_| {
            Error::bad_argument(
                self.current.as_str(),
                format!("`{raw}` is not a non-negative decimal"),
            )
        })
    }
}
