//! Minimal Hack CPU used to check generated code by running it.

use std::collections::HashMap;

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;
pub const STACK_BASE: i16 = 256;

enum Op {
    Load(String),
    Compute {
        dest: String,
        comp: String,
        jump: Option<String>,
    },
}

pub struct Cpu {
    pub ram: Vec<i16>,
    symbols: HashMap<String, usize>,
    next_var: usize,
}

impl Cpu {
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        for (name, addr) in [("SP", 0), ("LCL", 1), ("ARG", 2), ("THIS", 3), ("THAT", 4)] {
            symbols.insert(name.to_string(), addr);
        }
        for r in 0..16 {
            symbols.insert(format!("R{}", r), r);
        }
        let mut ram = vec![0; 32768];
        ram[SP] = STACK_BASE;
        Cpu {
            ram,
            symbols,
            next_var: 16,
        }
    }

    pub fn sp(&self) -> i16 {
        self.ram[SP]
    }

    pub fn top(&self) -> i16 {
        self.ram[self.sp() as usize - 1]
    }

    /// Address a symbol resolves to, allocating variables the way the
    /// Hack assembler does.
    pub fn symbol(&mut self, name: &str) -> usize {
        if let Some(addr) = self.symbols.get(name) {
            return *addr;
        }
        let addr = self.next_var;
        self.next_var += 1;
        self.symbols.insert(name.to_string(), addr);
        addr
    }

    pub fn run(&mut self, lines: &[String]) {
        let mut program = vec![];
        for line in lines.iter().map(|l| l.trim()) {
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if let Some(label) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
                assert!(
                    self.symbols
                        .insert(label.to_string(), program.len())
                        .is_none(),
                    "label {} defined twice",
                    label
                );
                continue;
            }
            program.push(parse_op(line));
        }

        let (mut a, mut d, mut pc) = (0i16, 0i16, 0usize);
        let mut steps = 0;
        while pc < program.len() {
            steps += 1;
            assert!(steps < 100_000, "program does not terminate");
            match &program[pc] {
                Op::Load(target) => {
                    a = match target.parse::<i16>() {
                        Ok(n) => n,
                        Err(_) => self.symbol(target) as i16,
                    };
                    pc += 1;
                }
                Op::Compute { dest, comp, jump } => {
                    let m = self.ram[a as u16 as usize];
                    let value = eval(comp, a, d, m);
                    if dest.contains('M') {
                        self.ram[a as u16 as usize] = value;
                    }
                    if dest.contains('D') {
                        d = value;
                    }
                    let target = a;
                    if dest.contains('A') {
                        a = value;
                    }
                    let taken = match jump.as_deref() {
                        None => false,
                        Some("JEQ") => value == 0,
                        Some("JGT") => value > 0,
                        Some("JLT") => value < 0,
                        Some("JGE") => value >= 0,
                        Some("JLE") => value <= 0,
                        Some("JNE") => value != 0,
                        Some("JMP") => true,
                        Some(other) => panic!("unknown jump {}", other),
                    };
                    pc = if taken { target as usize } else { pc + 1 };
                }
            }
        }
    }
}

fn parse_op(line: &str) -> Op {
    if let Some(target) = line.strip_prefix('@') {
        return Op::Load(target.to_string());
    }
    let (rest, jump) = match line.split_once(';') {
        Some((rest, jump)) => (rest, Some(jump.to_string())),
        None => (line, None),
    };
    let (dest, comp) = match rest.split_once('=') {
        Some((dest, comp)) => (dest.to_string(), comp.to_string()),
        None => (String::new(), rest.to_string()),
    };
    Op::Compute { dest, comp, jump }
}

fn operand(name: &str, a: i16, d: i16, m: i16) -> i16 {
    match name {
        "A" => a,
        "D" => d,
        "M" => m,
        "0" => 0,
        "1" => 1,
        other => panic!("bad operand {}", other),
    }
}

fn eval(comp: &str, a: i16, d: i16, m: i16) -> i16 {
    if let Some(x) = comp.strip_prefix('-') {
        return operand(x, a, d, m).wrapping_neg();
    }
    if let Some(x) = comp.strip_prefix('!') {
        return !operand(x, a, d, m);
    }
    if let Some(pos) = comp[1..].find(|c: char| matches!(c, '+' | '-' | '&' | '|')) {
        let (x, op, y) = (&comp[..pos + 1], &comp[pos + 1..pos + 2], &comp[pos + 2..]);
        let (x, y) = (operand(x, a, d, m), operand(y, a, d, m));
        return match op {
            "+" => x.wrapping_add(y),
            "-" => x.wrapping_sub(y),
            "&" => x & y,
            _ => x | y,
        };
    }
    operand(comp, a, d, m)
}
