//! Minimal Hack CPU used to execute translator output in tests.

#![allow(dead_code)]

use std::collections::HashMap;

use hackvm::{Options, Translator};

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

const RAM_SIZE: usize = 0x8000;
const FIRST_VARIABLE: u16 = 16;

#[derive(Debug, Clone)]
enum Op {
    A(u16),
    C {
        dest: String,
        comp: String,
        jump: Option<String>,
    },
}

pub struct Cpu {
    pub ram: Vec<i16>,
    rom: Vec<Op>,
    symbols: HashMap<String, u16>,
    pc: usize,
    a: i16,
    d: i16,
}

fn predefined() -> HashMap<String, u16> {
    let mut symbols: HashMap<String, u16> = [
        ("SP", 0),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 0x4000),
        ("KBD", 0x6000),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    for r in 0..16 {
        symbols.insert(format!("R{}", r), r);
    }
    symbols
}

impl Cpu {
    /// Assembles `source` (labels, variables, comments) into ROM.
    pub fn load(source: &str) -> Cpu {
        let lines: Vec<&str> = source
            .lines()
            .map(|l| l.split_once("//").map(|(s, _)| s).unwrap_or(l).trim())
            .filter(|l| !l.is_empty())
            .collect();

        let mut symbols = predefined();
        let mut address = 0u16;
        for line in &lines {
            if let Some(label) = line.strip_prefix('(').and_then(|l| l.strip_suffix(')')) {
                assert!(
                    symbols.insert(label.to_string(), address).is_none(),
                    "duplicate label {}",
                    label
                );
            } else {
                address += 1;
            }
        }

        let mut next_variable = FIRST_VARIABLE;
        let mut rom = vec![];
        for line in &lines {
            if line.starts_with('(') {
                continue;
            }
            if let Some(target) = line.strip_prefix('@') {
                let value = match target.parse::<u16>() {
                    Ok(n) => n,
                    Err(_) => *symbols.entry(target.to_string()).or_insert_with(|| {
                        next_variable += 1;
                        next_variable - 1
                    }),
                };
                rom.push(Op::A(value));
            } else {
                let (dest, rest) = line.split_once('=').unwrap_or(("", line));
                let (comp, jump) = match rest.split_once(';') {
                    Some((comp, jump)) => (comp, Some(jump.to_string())),
                    None => (rest, None),
                };
                rom.push(Op::C {
                    dest: dest.to_string(),
                    comp: comp.to_string(),
                    jump,
                });
            }
        }

        Cpu {
            ram: vec![0; RAM_SIZE],
            rom,
            symbols,
            pc: 0,
            a: 0,
            d: 0,
        }
    }

    /// ROM or RAM address of a symbol.
    pub fn address(&self, symbol: &str) -> u16 {
        *self
            .symbols
            .get(symbol)
            .unwrap_or_else(|| panic!("unknown symbol {}", symbol))
    }

    pub fn halted(&self) -> bool {
        self.pc >= self.rom.len()
    }

    fn operand(&self, c: u8) -> i16 {
        match c {
            b'A' => self.a,
            b'D' => self.d,
            b'M' => self.ram[self.a as u16 as usize],
            b'0' => 0,
            b'1' => 1,
            _ => panic!("bad operand {}", c as char),
        }
    }

    fn eval(&self, comp: &str) -> i16 {
        match comp.as_bytes() {
            [x] => self.operand(*x),
            [b'-', x] => self.operand(*x).wrapping_neg(),
            [b'!', x] => !self.operand(*x),
            [x, op, y] => {
                let (x, y) = (self.operand(*x), self.operand(*y));
                match op {
                    b'+' => x.wrapping_add(y),
                    b'-' => x.wrapping_sub(y),
                    b'&' => x & y,
                    b'|' => x | y,
                    _ => panic!("bad comp {}", comp),
                }
            }
            _ => panic!("bad comp {}", comp),
        }
    }

    pub fn step(&mut self) {
        match self.rom[self.pc].clone() {
            Op::A(value) => {
                self.a = value as i16;
                self.pc += 1;
            }
            Op::C { dest, comp, jump } => {
                let value = self.eval(&comp);
                let target = self.a as u16 as usize;
                if dest.contains('M') {
                    self.ram[target] = value;
                }
                if dest.contains('A') {
                    self.a = value;
                }
                if dest.contains('D') {
                    self.d = value;
                }
                let taken = match jump.as_deref() {
                    None => false,
                    Some("JGT") => value > 0,
                    Some("JEQ") => value == 0,
                    Some("JGE") => value >= 0,
                    Some("JLT") => value < 0,
                    Some("JNE") => value != 0,
                    Some("JLE") => value <= 0,
                    Some("JMP") => true,
                    Some(other) => panic!("bad jump {}", other),
                };
                self.pc = if taken { target } else { self.pc + 1 };
            }
        }
    }

    /// Runs until the program falls off the end of ROM.
    pub fn run(&mut self, max_steps: usize) {
        for _ in 0..max_steps {
            if self.halted() {
                return;
            }
            self.step();
        }
        panic!("still running after {} steps", max_steps);
    }

    /// Runs until execution reaches `label`.
    pub fn run_until(&mut self, label: &str, max_steps: usize) {
        let stop = self.address(label) as usize;
        for _ in 0..max_steps {
            if self.pc == stop {
                return;
            }
            assert!(!self.halted(), "fell off the end before {}", label);
            self.step();
        }
        panic!("{} not reached after {} steps", label, max_steps);
    }

    pub fn stack(&self) -> &[i16] {
        &self.ram[256..self.ram[SP] as usize]
    }
}

/// Translates `files` as one session and renders the output.
pub fn translate(options: Options, files: &[(&str, &str)]) -> String {
    let mut translator = Translator::new(options);
    for (stem, source) in files {
        translator
            .translate_source(stem, source)
            .unwrap_or_else(|e| panic!("{}: {}", stem, e));
    }
    translator.finish().render()
}

/// Loads a single file translated without bootstrap, with SP at 256.
pub fn load_bare(source: &str) -> Cpu {
    let mut cpu = Cpu::load(&translate(Options::default(), &[("Test", source)]));
    cpu.ram[SP] = 256;
    cpu
}
