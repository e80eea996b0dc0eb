use std::{fmt, str::FromStr};

use crate::error::TranslateError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Segment {
    Constant,
    Local,
    Static,
    Argument,
    This,
    That,
    Pointer,
    Temp,
}

/// How `base + index` is formed for a segment.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Addressing {
    /// The index itself is the value (`constant`).
    Immediate,
    /// One cell per source file and index, named `<file>.<index>` (`static`).
    FileLabel,
    /// The base address is the value stored at the symbol.
    Indirect(&'static str),
    /// The symbol's own address is the base.
    Direct(&'static str),
}

impl Segment {
    /// Maps a VM segment name onto its variant. Names are lowercase only.
    pub fn resolve(name: &str) -> Result<Segment, TranslateError> {
        use Segment::*;
        Ok(match name {
            "local" => Local,
            "argument" => Argument,
            "this" => This,
            "that" => That,
            "constant" => Constant,
            "static" => Static,
            "pointer" => Pointer,
            "temp" => Temp,
            _ => return Err(TranslateError::InvalidSegment(name.to_string())),
        })
    }

    pub fn name(&self) -> &'static str {
        use Segment::*;
        match self {
            Constant => "constant",
            Local => "local",
            Static => "static",
            Argument => "argument",
            This => "this",
            That => "that",
            Pointer => "pointer",
            Temp => "temp",
        }
    }

    pub fn addressing(&self) -> Addressing {
        use Segment::*;
        match self {
            Constant => Addressing::Immediate,
            Static => Addressing::FileLabel,
            Local => Addressing::Indirect("LCL"),
            Argument => Addressing::Indirect("ARG"),
            This => Addressing::Indirect("THIS"),
            That => Addressing::Indirect("THAT"),
            Pointer => Addressing::Direct("R3"),
            Temp => Addressing::Direct("R5"),
        }
    }
}

impl FromStr for Segment {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Segment::resolve(s)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single VM instruction. Push and pop carry the base name of the file
/// they came from, which only matters for `static`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    // Memory access
    Push(Segment, u16, String),
    Pop(Segment, u16, String),

    // Arithmetic / logic
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl Command {
    pub fn name(&self) -> &'static str {
        use Command::*;
        match self {
            Push(..) => "push",
            Pop(..) => "pop",
            Add => "add",
            Sub => "sub",
            Neg => "neg",
            Eq => "eq",
            Gt => "gt",
            Lt => "lt",
            And => "and",
            Or => "or",
            Not => "not",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(seg, index, _) | Command::Pop(seg, index, _) => {
                write!(f, "{} {} {}", self.name(), seg, index)
            }
            _ => f.write_str(self.name()),
        }
    }
}
