//! Translation of VM commands into Hack assembly.
//!
//! `SP` always points to the free slot above the top value; true is -1
//! (0xFFFF) and false is 0. Binary operations treat the value pushed
//! first as the left operand.

use std::io::{self, Write};

// Emits a fixed block of instructions in a single write.
macro_rules! write_asm {
    ($writer:expr, $($line:literal)*) => {
        $writer.write_all(concat!($($line, "\n"),*).as_bytes())
    };
}

/// Memory segments addressable by push/pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
}

impl Segment {
    /// Parses a VM segment name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "constant" => Some(Segment::Constant),
            "local" => Some(Segment::Local),
            "argument" => Some(Segment::Argument),
            "this" => Some(Segment::This),
            "that" => Some(Segment::That),
            "temp" => Some(Segment::Temp),
            "pointer" => Some(Segment::Pointer),
            "static" => Some(Segment::Static),
            _ => None,
        }
    }

    /// The assembly symbol holding (or being) the segment base.
    fn base(self) -> &'static str {
        match self {
            Segment::Local => "LCL",
            Segment::Argument => "ARG",
            Segment::This => "THIS",
            Segment::That => "THAT",
            Segment::Temp => "5",
            Segment::Pointer => "3",
            Segment::Constant | Segment::Static => unreachable!("segment has no base register"),
        }
    }

    /// Whether the base symbol is the address itself rather than a
    /// pointer to it (`temp` and `pointer` live at fixed addresses).
    fn is_direct(self) -> bool {
        matches!(self, Segment::Temp | Segment::Pointer)
    }
}

/// Stateful emitter translating VM commands into blocks of assembly.
///
/// Construct one writer per output file: the comparison and call-return
/// counters are per-instance, which keeps every generated label unique
/// within a translation unit.
pub struct CodeWriter<W: Write> {
    output: W,
    /// Comparison-label counter; incremented before each use.
    boolean: u32,
    /// Call-return-label counter; incremented before each use.
    return_index: u32,
    /// Stem of the file being translated, for static name mangling.
    file_name: String,
    /// Enclosing function, for label scoping.
    function_name: String,
}

impl<W: Write> CodeWriter<W> {
    #[must_use]
    pub fn new(output: W) -> Self {
        CodeWriter {
            output,
            boolean: 0,
            return_index: 0,
            file_name: String::new(),
            function_name: String::new(),
        }
    }

    /// Informs the writer that translation of a new VM file has started.
    ///
    /// `static i` in this file will reference the symbol `<stem>.<i>`.
    pub fn set_file_name(&mut self, stem: &str) {
        self.file_name.clear();
        self.file_name.push_str(stem);
    }

    /// Echoes the source command above its translation.
    pub fn write_comment(&mut self, command: &str) -> io::Result<()> {
        writeln!(self.output, "// {command}")
    }

    pub fn write_arithmetic(&mut self, command: &str) -> io::Result<()> {
        match command {
            "add" => self.write_binary_op("D+M"),
            "sub" => self.write_binary_op("M-D"),
            "and" => self.write_binary_op("D&M"),
            "or" => self.write_binary_op("D|M"),
            "neg" => self.write_unary_op("-M"),
            "not" => self.write_unary_op("!M"),
            "eq" => self.write_comparison("EQ"),
            "gt" => self.write_comparison("GT"),
            "lt" => self.write_comparison("LT"),
            _ => unreachable!("arithmetic command validated by the parser"),
        }
    }

    // Pop the right operand into D, then operate on the new stack top
    // in place. `sub` computes left - right as M-D.
    fn write_binary_op(&mut self, operation: &str) -> io::Result<()> {
        write_asm!(self.output,
            "@SP"
            "AM=M-1"
            "D=M"
            "A=A-1"
        )?;
        writeln!(self.output, "M={operation}")
    }

    fn write_unary_op(&mut self, result: &str) -> io::Result<()> {
        write_asm!(self.output,
            "@SP"
            "A=M-1"
        )?;
        writeln!(self.output, "M={result}")
    }

    // Pop-subtract, jump to the true branch on the matching condition;
    // the false branch writes 0 and skips over it.
    fn write_comparison(&mut self, op: &str) -> io::Result<()> {
        self.boolean += 1;
        let count = self.boolean;

        write_asm!(self.output,
            "@SP"
            "AM=M-1"
            "D=M"
            "A=A-1"
            "D=M-D"
        )?;
        writeln!(self.output, "@{op}.true.{count}")?;
        writeln!(self.output, "D;J{op}")?;
        write_asm!(self.output,
            "@SP"
            "A=M-1"
            "M=0"
        )?;
        writeln!(self.output, "@{op}.after.{count}")?;
        write_asm!(self.output, "0;JMP")?;
        writeln!(self.output, "({op}.true.{count})")?;
        write_asm!(self.output,
            "@SP"
            "A=M-1"
            "M=-1"
        )?;
        writeln!(self.output, "({op}.after.{count})")
    }

    /// Emits `push segment index`.
    pub fn write_push(&mut self, segment: Segment, index: u16) -> io::Result<()> {
        match segment {
            Segment::Constant => {
                writeln!(self.output, "@{index}")?;
                write_asm!(self.output, "D=A")?;
            }
            Segment::Static => {
                writeln!(self.output, "@{}.{index}", self.file_name)?;
                write_asm!(self.output, "D=M")?;
            }
            _ => {
                self.load_effective_address(segment, index)?;
                write_asm!(self.output,
                    "A=D"
                    "D=M"
                )?;
            }
        }
        self.write_push_d()
    }

    /// Emits `pop segment index`; `constant` is rejected upstream.
    pub fn write_pop(&mut self, segment: Segment, index: u16) -> io::Result<()> {
        match segment {
            Segment::Static => {
                self.write_pop_to_d()?;
                writeln!(self.output, "@{}.{index}", self.file_name)?;
                write_asm!(self.output, "M=D")
            }
            _ => {
                // Stage the effective address in R13 before the pop
                // clobbers D.
                self.load_effective_address(segment, index)?;
                write_asm!(self.output,
                    "@R13"
                    "M=D"
                )?;
                self.write_pop_to_d()?;
                write_asm!(self.output,
                    "@R13"
                    "A=M"
                    "M=D"
                )
            }
        }
    }

    // Computes base + index into D.
    fn load_effective_address(&mut self, segment: Segment, index: u16) -> io::Result<()> {
        writeln!(self.output, "@{}", segment.base())?;
        if segment.is_direct() {
            write_asm!(self.output, "D=A")?;
        } else {
            write_asm!(self.output, "D=M")?;
        }
        writeln!(self.output, "@{index}")?;
        write_asm!(self.output, "D=D+A")
    }

    pub fn write_label(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.output, "({})", self.scoped_label(label))
    }

    pub fn write_goto(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.output, "@{}", self.scoped_label(label))?;
        write_asm!(self.output, "0;JMP")
    }

    /// The branch is taken on any non-zero value.
    pub fn write_if(&mut self, label: &str) -> io::Result<()> {
        self.write_pop_to_d()?;
        writeln!(self.output, "@{}", self.scoped_label(label))?;
        write_asm!(self.output, "D;JNE")
    }

    // Labels are scoped to the enclosing function; toplevel labels stay
    // unmangled.
    fn scoped_label(&self, label: &str) -> String {
        if self.function_name.is_empty() {
            label.to_string()
        } else {
            format!("{}${label}", self.function_name)
        }
    }

    /// Emits the entry point of `function name locals` and zeroes the
    /// local segment.
    pub fn write_function(&mut self, name: &str, locals: u16) -> io::Result<()> {
        writeln!(self.output, "({name})")?;
        self.function_name.clear();
        self.function_name.push_str(name);
        for _ in 0..locals {
            write_asm!(self.output,
                "@SP"
                "A=M"
                "M=0"
                "@SP"
                "M=M+1"
            )?;
        }
        Ok(())
    }

    /// Emits a call site: save the caller's frame, reposition ARG and
    /// LCL, jump, and land on a fresh return label.
    pub fn write_call(&mut self, name: &str, args: u16) -> io::Result<()> {
        self.return_index += 1;
        let index = self.return_index;

        // Push the return address, then LCL, ARG, THIS, THAT.
        writeln!(self.output, "@ret.{index}")?;
        write_asm!(self.output, "D=A")?;
        self.write_push_d()?;
        for register in ["LCL", "ARG", "THIS", "THAT"] {
            writeln!(self.output, "@{register}")?;
            write_asm!(self.output, "D=M")?;
            self.write_push_d()?;
        }

        // ARG = SP - args - 5; the 5 accounts for the words just pushed.
        write_asm!(self.output,
            "@SP"
            "D=M"
        )?;
        writeln!(self.output, "@{}", u32::from(args) + 5)?;
        write_asm!(self.output,
            "D=D-A"
            "@ARG"
            "M=D"
        )?;

        // LCL = SP
        write_asm!(self.output,
            "@SP"
            "D=M"
            "@LCL"
            "M=D"
        )?;

        writeln!(self.output, "@{name}")?;
        write_asm!(self.output, "0;JMP")?;
        writeln!(self.output, "(ret.{index})")
    }

    /// Restores the caller's frame and jumps to the saved return address.
    pub fn write_return(&mut self) -> io::Result<()> {
        // R13 = frame; R14 = return address, read before the restores
        // walk over it.
        write_asm!(self.output,
            "@LCL"
            "D=M"
            "@R13"
            "M=D"
            "@5"
            "A=D-A"
            "D=M"
            "@R14"
            "M=D"
        )?;

        // Return value lands where the callee's arguments began.
        self.write_pop_to_d()?;
        write_asm!(self.output,
            "@ARG"
            "A=M"
            "M=D"
            "@ARG"
            "D=M+1"
            "@SP"
            "M=D"
        )?;

        // Walk the frame downward restoring the saved registers.
        for register in ["THAT", "THIS", "ARG", "LCL"] {
            write_asm!(self.output,
                "@R13"
                "AM=M-1"
                "D=M"
            )?;
            writeln!(self.output, "@{register}")?;
            write_asm!(self.output, "M=D")?;
        }

        write_asm!(self.output,
            "@R14"
            "A=M"
            "0;JMP"
        )
    }

    /// Emits the bootstrap: SP = 256, then `call Sys.init 0`.
    pub fn write_init(&mut self) -> io::Result<()> {
        write_asm!(self.output,
            "@256"
            "D=A"
            "@SP"
            "M=D"
        )?;
        self.write_call("Sys.init", 0)
    }

    fn write_push_d(&mut self) -> io::Result<()> {
        write_asm!(self.output,
            "@SP"
            "A=M"
            "M=D"
            "@SP"
            "M=M+1"
        )
    }

    fn write_pop_to_d(&mut self) -> io::Result<()> {
        write_asm!(self.output,
            "@SP"
            "AM=M-1"
            "D=M"
        )
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.output
    }
}
