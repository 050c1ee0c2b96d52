//! Command-line entry point: one root command, two subcommands.
//!
//! The subcommands are thin routers over the library pipelines; all
//! translation logic lives in [`hack_toolchain::asm`] and
//! [`hack_toolchain::vm`].

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use hack_toolchain::{asm, logging, source, vm, Error};

#[derive(Parser)]
#[command(name = "hack-toolchain", version, about = "Translators for the Hack platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a .asm file into .hack machine code
    Assembler {
        /// Symbolic Hack assembly source
        file: PathBuf,
    },
    /// Translate a .vm file, or a directory of them, into one .asm file
    Vmtranslator {
        /// An Xxx.vm file, or a directory containing .vm files
        source: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Assembler { file } => run_assembler(file),
        Command::Vmtranslator { source } => vm::translate(source),
    };

    match result {
        Ok(output) => {
            println!("wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            logging::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run_assembler(input: &Path) -> Result<PathBuf, Error> {
    let lines = source::read_logical_lines(input)?;

    let output_path = input.with_extension("hack");
    let file = File::create(&output_path)
        .map_err(|e| Error::OutputIo {
            path: output_path.clone(),
            source: e,
        })?;
    let mut writer = BufWriter::new(file);

    asm::assemble(&lines, &mut writer).map_err(|e| e.with_output_path(&output_path))?;
    Ok(output_path)
}
