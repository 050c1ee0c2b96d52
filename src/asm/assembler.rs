//! Two-pass assembler driver.
//!
//! Pass 1 records label addresses; pass 2 re-walks the same logical-line
//! vector and emits one 16-bit ASCII word per instruction.

use std::io::Write;

use crate::asm::code;
use crate::asm::parser::{CommandType, Parser};
use crate::asm::symbol_table::SymbolTable;
use crate::error::{Error, Result};

/// RAM address where variable allocation starts.
const VARIABLE_BASE: u16 = 16;

/// Pass 1: record the ROM address of every label.
///
/// A- and C-commands advance the ROM address; label pseudo-commands mark
/// the next instruction and consume nothing.
pub fn first_pass(lines: &[String], symbols: &mut SymbolTable) -> Result<()> {
    let mut rom_address = 0u16;
    let mut parser = Parser::from_lines(lines);

    while parser.advance() {
        match parser.command_type()? {
            CommandType::LCommand => {
                symbols.add_entry(parser.symbol()?, rom_address);
            }
            CommandType::ACommand | CommandType::CCommand => {
                rom_address += 1;
            }
        }
    }

    Ok(())
}

/// Pass 2: emit machine code, resolving symbols as they appear.
///
/// Unbound symbols are allocated RAM slots from 16 upward; slots are
/// never reused and stay disjoint from the predefined addresses.
pub fn second_pass<W: Write>(
    lines: &[String],
    symbols: &mut SymbolTable,
    output: &mut W,
) -> Result<()> {
    let mut next_ram = VARIABLE_BASE;
    let mut parser = Parser::from_lines(lines);

    while parser.advance() {
        match parser.command_type()? {
            CommandType::ACommand => {
                let address = resolve_operand(
                    parser.symbol()?,
                    parser.current_line(),
                    symbols,
                    &mut next_ram,
                )?;
                writeln!(output, "{}", code::encode_a_instruction(address))?;
            }
            CommandType::CCommand => {
                let comp = code::comp(parser.comp()).ok_or_else(|| {
                    Error::unknown_mnemonic("comp", parser.comp(), parser.current_line())
                })?;
                let dest = code::dest(parser.dest()).ok_or_else(|| {
                    Error::unknown_mnemonic("dest", parser.dest(), parser.current_line())
                })?;
                let jump = code::jump(parser.jump()).ok_or_else(|| {
                    Error::unknown_mnemonic("jump", parser.jump(), parser.current_line())
                })?;
                writeln!(output, "111{comp}{dest}{jump}")?;
            }
            CommandType::LCommand => {}
        }
    }

    output.flush()?;
    Ok(())
}

/// Resolves an A-operand: decimal literal, or symbol lookup/allocation.
///
/// An operand starting with a digit must be a valid decimal address;
/// anything else takes the symbol path.
fn resolve_operand(
    operand: &str,
    line: &str,
    symbols: &mut SymbolTable,
    next_ram: &mut u16,
) -> Result<u16> {
    if operand.as_bytes()[0].is_ascii_digit() {
        operand.parse().map_err(|_| Error::lex(line))
    } else {
        Ok(symbols.get_or_insert(operand, next_ram))
    }
}

/// Assembles a logical-line vector into the output sink.
///
/// # Example
/// ```
/// use hack_toolchain::asm::assemble;
///
/// let lines = vec!["@2".to_string(), "D=A".to_string()];
/// let mut out = Vec::new();
/// assemble(&lines, &mut out).unwrap();
/// assert_eq!(out, b"0000000000000010\n1110110000010000\n");
/// ```
pub fn assemble<W: Write>(lines: &[String], output: &mut W) -> Result<()> {
    let mut symbols = SymbolTable::new();
    first_pass(lines, &mut symbols)?;
    second_pass(lines, &mut symbols, output)
}
