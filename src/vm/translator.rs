//! Driver for the VM-to-assembly pipeline.
//!
//! Resolves the input to a list of `.vm` files, decides whether the
//! bootstrap preamble is needed, and streams each file's commands into a
//! single code writer.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::vm::code_writer::{CodeWriter, Segment};
use crate::vm::parser::{CommandType, Parser};

/// Translates a `.vm` file or a directory of them.
///
/// The output lands in the working directory: `<stem>.asm` for a file
/// input, `<dirname>.asm` for a directory. Returns the output path.
pub fn translate(source: &Path) -> Result<PathBuf> {
    let files = resolve_sources(source)?;
    let output_path = output_name(source);

    let output = File::create(&output_path).map_err(|e| Error::output_io(&output_path, e))?;
    let mut writer = CodeWriter::new(BufWriter::new(output));

    translate_files(&files, &mut writer).map_err(|e| e.with_output_path(&output_path))?;
    writer.flush().map_err(|e| Error::output_io(&output_path, e))?;

    Ok(output_path)
}

/// Translates an ordered set of `.vm` files into one writer.
///
/// The bootstrap preamble is emitted if and only if the set contains a
/// file named `Sys.vm`, before any translated code.
pub fn translate_files<W: Write>(files: &[PathBuf], writer: &mut CodeWriter<W>) -> Result<()> {
    let defines_sys = files
        .iter()
        .any(|f| f.file_name().is_some_and(|name| name == "Sys.vm"));
    if defines_sys {
        writer.write_init()?;
    }

    for file in files {
        translate_file(file, writer)?;
    }
    Ok(())
}

fn translate_file<W: Write>(path: &Path, writer: &mut CodeWriter<W>) -> Result<()> {
    let file = File::open(path).map_err(|e| Error::input_io(path, e))?;
    let mut parser = Parser::new(BufReader::new(file)).map_err(|e| Error::input_io(path, e))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    writer.set_file_name(stem);

    translate_commands(&mut parser, writer)
}

/// Feeds every command of one parsed source into the writer.
pub fn translate_commands<R: BufRead, W: Write>(
    parser: &mut Parser<R>,
    writer: &mut CodeWriter<W>,
) -> Result<()> {
    while parser.has_more_commands() {
        parser.advance()?;
        writer.write_comment(parser.current_command())?;

        match parser.command_type()? {
            CommandType::Arithmetic => writer.write_arithmetic(parser.arg1()?)?,
            CommandType::Push => {
                let segment = parse_segment(parser)?;
                writer.write_push(segment, parser.arg2()?)?;
            }
            CommandType::Pop => {
                let segment = parse_segment(parser)?;
                if segment == Segment::Constant {
                    return Err(Error::bad_argument(
                        parser.current_command(),
                        "cannot pop to the constant segment",
                    ));
                }
                writer.write_pop(segment, parser.arg2()?)?;
            }
            CommandType::Label => writer.write_label(parser.arg1()?)?,
            CommandType::Goto => writer.write_goto(parser.arg1()?)?,
            CommandType::IfGoto => writer.write_if(parser.arg1()?)?,
            CommandType::Function => writer.write_function(parser.arg1()?, parser.arg2()?)?,
            CommandType::Call => writer.write_call(parser.arg1()?, parser.arg2()?)?,
            CommandType::Return => writer.write_return()?,
        }
    }
    Ok(())
}

fn parse_segment<R: BufRead>(parser: &Parser<R>) -> Result<Segment> {
    let name = parser.arg1()?;
    Segment::from_name(name).ok_or_else(|| {
        Error::bad_argument(
            parser.current_command(),
            format!("`{name}` is not a memory segment"),
        )
    })
}

fn resolve_sources(source: &Path) -> Result<Vec<PathBuf>> {
    let invalid = |message: &str| {
        Error::input_io(
            source,
            io::Error::new(io::ErrorKind::InvalidInput, message.to_string()),
        )
    };

    let metadata = fs::metadata(source).map_err(|e| Error::input_io(source, e))?;
    if metadata.is_dir() {
        let entries = fs::read_dir(source).map_err(|e| Error::input_io(source, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::input_io(source, e))?.path();
            if path.extension().is_some_and(|ext| ext == "vm") {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(invalid("directory contains no .vm files"));
        }
        // Directory-entry order is filesystem-dependent; pin it down.
        files.sort();
        Ok(files)
    } else if source.extension().is_some_and(|ext| ext == "vm") {
        Ok(vec![source.to_path_buf()])
    } else {
        Err(invalid("expected a .vm file or a directory"))
    }
}

/// Output file name per the platform convention, in the working directory.
fn output_name(source: &Path) -> PathBuf {
    let stem = if source.is_dir() {
        source.file_name()
    } else {
        source.file_stem()
    };
    let stem = stem.map_or_else(|| "out".into(), |s| s.to_string_lossy());
    PathBuf::from(format!("{stem}.asm"))
}
