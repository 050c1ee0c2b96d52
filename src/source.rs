//! Logical source lines, shared by both pipelines.
//!
//! A logical line is what remains of a raw line after the `//` comment is
//! dropped and surrounding whitespace is trimmed; empty results are
//! skipped. Internal whitespace is preserved for the VM parser, which
//! splits commands on whitespace runs.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Lazy, forward-only iterator over the logical lines of a stream.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    #[inline]
    #[must_use]
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = String::new();
        loop {
            raw.clear();
            match self.input.read_line(&mut raw) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            let logical = strip_comment(&raw).trim();
            if !logical.is_empty() {
                return Some(Ok(logical.to_string()));
            }
        }
    }
}

/// Strips the `//` comment from a line using a byte scan.
#[inline]
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        if bytes[i] == b'/' && bytes[i + 1] == b'/' {
            return &line[..i];
        }
    }
    line
}

/// Reads a whole source file into its logical-line vector.
///
/// The assembler walks the result twice; materializing here avoids any
/// seeking on the underlying stream.
pub fn read_logical_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::input_io(path, e))?;
    LineReader::new(BufReader::new(file))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| Error::input_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines_of(source: &str) -> Vec<String> {
        LineReader::new(Cursor::new(source))
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("@100 // comment"), "@100 ");
        assert_eq!(strip_comment("D=M"), "D=M");
        assert_eq!(strip_comment("// only comment"), "");
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        let lines = lines_of("// header\n\n@100\n   \nD=M // inline\n");
        assert_eq!(lines, vec!["@100", "D=M"]);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let lines = lines_of("   @100   \n\t(LOOP)\t\n");
        assert_eq!(lines, vec!["@100", "(LOOP)"]);
    }

    #[test]
    fn test_internal_whitespace_is_preserved() {
        let lines = lines_of("push   local \t 3\n");
        assert_eq!(lines, vec!["push   local \t 3"]);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let lines = lines_of("@1\n@2");
        assert_eq!(lines, vec!["@1", "@2"]);
    }
}
