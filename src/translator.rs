use log::{debug, trace};

use crate::{
    ast::{Command::*, Segment::*, *},
    error::TranslateError,
};

macro_rules! svec {
    ($($x:expr),* $(,)?) => (vec![$($x.to_string()),*]);
}

/// Stack pointer cell.
const SP: &str = "@SP";
/// Scratch register holding the destination address during a pop.
const SCRATCH: &str = "@R13";

fn at_c(arg: u16) -> String {
    format!("@{arg}", arg = arg)
}

fn at_s(arg: &str) -> String {
    format!("@{arg}", arg = arg)
}

fn static_sym(file: &str, arg: u16) -> String {
    format!("{}.{}", file, arg)
}

/// Issues comparison label numbers. One allocator is shared by everything
/// compiled in a run, so numbers never repeat across files.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: usize,
}

impl LabelAllocator {
    pub fn new() -> Self {
        LabelAllocator::default()
    }

    pub fn next(&mut self) -> usize {
        let tmp = self.next;
        self.next += 1;
        tmp
    }

    /// How many labels have been handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// D = base(segment) + index
fn address(segment: Segment, arg: u16) -> Result<Vec<String>, TranslateError> {
    let base = match segment.addressing() {
        Addressing::Indirect(sym) => svec![at_s(sym), "D=M"],
        Addressing::Direct(sym) => svec![at_s(sym), "D=A"],
        Addressing::Immediate | Addressing::FileLabel => {
            return Err(TranslateError::InvalidCommand(format!(
                "segment {} has no base address",
                segment
            )))
        }
    };
    Ok(base.into_iter().chain(svec![at_c(arg), "D=D+A"]).collect())
}

fn push(segment: Segment, arg: u16, file: &str) -> Result<Vec<String>, TranslateError> {
    let mut asm = svec![format!("// push {} {}", segment, arg)];

    match segment {
        Constant => asm.extend(svec![at_c(arg), "D=A"]),
        Local | Argument | This | That | Pointer | Temp => {
            asm.extend(address(segment, arg)?);
            asm.extend(svec!["A=D", "D=M"]);
        }
        Static => asm.extend(svec![at_s(&static_sym(file, arg)), "D=M"]),
    }

    asm.extend(svec![SP, "A=M", "M=D", SP, "M=M+1"]);
    Ok(asm)
}

fn pop(segment: Segment, arg: u16, file: &str) -> Result<Vec<String>, TranslateError> {
    let mut asm = svec![format!("// pop {} {}", segment, arg)];

    match segment {
        Constant => {
            return Err(TranslateError::InvalidCommand(format!(
                "cannot pop into constant {}",
                arg
            )))
        }
        Local | Argument | This | That | Pointer | Temp => asm.extend(address(segment, arg)?),
        Static => asm.extend(svec![at_s(&static_sym(file, arg)), "D=A"]),
    }

    asm.extend(svec![
        SCRATCH,
        "M=D", // Destination address in R13
        SP,
        "M=M-1",
        "A=M",
        "D=M", // Popped value
        SCRATCH,
        "A=M",
        "M=D"
    ]);
    Ok(asm)
}

fn simple_un_op(name: &str, op: char) -> Vec<String> {
    svec![format!("// {}", name), SP, "A=M-1", format!("M={}M", op)]
}

// i.e. no conditions or jumps, just pop and run
fn simple_bin_op(name: &str, op: char) -> Vec<String> {
    svec![
        format!("// {}", name),
        SP,
        "M=M-1",
        "A=M",                 // Looking at top of stack now
        "D=M",                 // Right arg in D
        "A=A-1",               // Second arg of stack, will overwrite
        format!("M=M{}D", op)  // Op and overwrite second element
    ]
}

/// Compiles commands to Hack assembly. Owns the label counter for the run;
/// create one per run and feed it every file.
#[derive(Debug, Default)]
pub struct Translator {
    labels: LabelAllocator,
}

impl Translator {
    pub fn new() -> Self {
        Translator::default()
    }

    pub fn labels(&self) -> &LabelAllocator {
        &self.labels
    }

    fn compare(&mut self, cmp_name: &str, jump: &str) -> Vec<String> {
        let sym = format!("CMP_{}", self.labels.next());
        trace!("{} uses label {}", cmp_name, sym);
        svec![
            format!("// {}", cmp_name),
            SP,
            "M=M-1",
            "A=M",
            "D=M",   // Right arg in D
            "A=A-1", // Second arg, will hold the result
            "D=M-D",
            "M=-1", // Assume true
            at_s(&sym),
            format!("D;{}", jump),
            SP,
            "A=M-1",
            "M=0",
            format!("({})", sym)
        ]
    }

    /// Expands a single command.
    pub fn compile(&mut self, command: &Command) -> Result<Vec<String>, TranslateError> {
        debug!("compiling {}", command);
        Ok(match command {
            Push(seg, arg, file) => push(*seg, *arg, file)?,
            Pop(seg, arg, file) => pop(*seg, *arg, file)?,
            Not => simple_un_op("not", '!'),
            Neg => simple_un_op("neg", '-'),
            Add => simple_bin_op("add", '+'),
            Sub => simple_bin_op("sub", '-'),
            And => simple_bin_op("and", '&'),
            Or => simple_bin_op("or", '|'),
            Eq => self.compare("eq", "JEQ"),
            Gt => self.compare("gt", "JGT"),
            Lt => self.compare("lt", "JLT"),
        })
    }

    /// Expands commands in order. Stops at the first failure.
    pub fn translate(&mut self, commands: &[Command]) -> Result<Vec<String>, TranslateError> {
        let mut instructions: Vec<String> = vec![];

        for command in commands {
            instructions.extend(self.compile(command)?);
        }

        Ok(instructions)
    }
}
