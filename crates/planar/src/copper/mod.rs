// STD Dependencies -----------------------------------------------------------
use std::fmt::Write;


// External Dependencies ------------------------------------------------------
use log::debug;


// Modules --------------------------------------------------------------------
pub mod registers;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;


// Statics --------------------------------------------------------------------
pub const WAIT_MASK: u16 = 0xfffe;
pub const END_WORDS: [u16; 2] = [0xffff, 0xfffe];

const MAX_WAIT_X: u16 = 0x7f;
const MAX_WAIT_Y: u16 = 0xff;


// Operands -------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Symbol(String)
}

impl Operand {
    pub fn parse(text: &str, line: usize) -> Result<Self, ConversionError> {
        let starts_numeric = text.chars().next().map_or(false, |c| c.is_ascii_digit() || c == '-');
        if starts_numeric {
            parse_literal(text).map(Operand::Literal).ok_or_else(|| ConversionError::InvalidOperand {
                operand: text.to_string(),
                line,
                message: "not a valid integer literal".to_string()
            })

        } else if text.is_empty() {
            Err(ConversionError::InvalidOperand {
                operand: text.to_string(),
                line,
                message: "operand is empty".to_string()
            })

        } else {
            Ok(Operand::Symbol(text.to_string()))
        }
    }

    /// Resolves symbols against the register table and range checks the
    /// result as a 16-bit word.
    pub fn resolve(&self, line: usize) -> Result<u16, ConversionError> {
        match self {
            Operand::Literal(value) => u16::try_from(*value).map_err(|_| ConversionError::InvalidOperand {
                operand: value.to_string(),
                line,
                message: "value does not fit into 16 bits".to_string()
            }),
            Operand::Symbol(name) => registers::lookup(name).ok_or_else(|| ConversionError::UnknownSymbol {
                name: name.clone(),
                line
            })
        }
    }
}

fn parse_literal(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text)
    };
    let (radix, digits) = if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, rest)

    } else if let Some(rest) = digits.strip_prefix("0o").or_else(|| digits.strip_prefix("0O")) {
        (8, rest)

    } else if let Some(rest) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, rest)

    } else {
        (10, digits)
    };
    if digits.is_empty() || digits.starts_with('-') || digits.starts_with('+') {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}


// Instructions ---------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Move {
        dest: Operand,
        value: Operand
    },
    Wait {
        x: Operand,
        y: Operand
    },
    End,
    Label(String)
}

impl Instruction {
    /// Parses a single source line, comments and blank lines yield `None`.
    pub fn parse(text: &str, line: usize) -> Result<Option<Self>, ConversionError> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = text.split_whitespace();
        let mnemonic = tokens.next().unwrap_or_default();
        let operands = tokens.next();
        if let Some(extra) = tokens.next() {
            return Err(ConversionError::InvalidOperand {
                operand: extra.to_string(),
                line,
                message: "unexpected input after the operand list".to_string()
            });
        }

        match mnemonic {
            "CMOVE" => {
                let [dest, value] = operand_pair(mnemonic, operands, line)?;
                Ok(Some(Instruction::Move {
                    dest,
                    value
                }))
            },
            "CWAIT" => {
                let [x, y] = operand_pair(mnemonic, operands, line)?;
                Ok(Some(Instruction::Wait {
                    x,
                    y
                }))
            },
            "CEND" => if let Some(operands) = operands {
                Err(ConversionError::InvalidOperand {
                    operand: operands.to_string(),
                    line,
                    message: "CEND takes no operands".to_string()
                })

            } else {
                Ok(Some(Instruction::End))
            },
            label if label.ends_with(':') && operands.is_none() => {
                let name = &label[..label.len() - 1];
                if name.is_empty() {
                    Err(ConversionError::UnknownInstruction {
                        mnemonic: label.to_string(),
                        line
                    })

                } else {
                    Ok(Some(Instruction::Label(name.to_string())))
                }
            },
            _ => Err(ConversionError::UnknownInstruction {
                mnemonic: mnemonic.to_string(),
                line
            })
        }
    }

    /// Raw instruction words, labels emit nothing.
    pub fn encode(&self, line: usize) -> Result<Vec<u16>, ConversionError> {
        match self {
            Instruction::Move { dest, value } => Ok(vec![dest.resolve(line)?, value.resolve(line)?]),
            Instruction::Wait { x, y } => {
                let x = bounded(x, MAX_WAIT_X, "horizontal wait position", line)?;
                let y = bounded(y, MAX_WAIT_Y, "vertical wait position", line)?;
                Ok(vec![(y << 8) | (x << 1) | 1, WAIT_MASK])
            },
            Instruction::End => Ok(END_WORDS.to_vec()),
            Instruction::Label(_) => Ok(Vec::new())
        }
    }
}

fn operand_pair(mnemonic: &str, operands: Option<&str>, line: usize) -> Result<[Operand; 2], ConversionError> {
    let text = operands.unwrap_or_default();
    let parts: Vec<&str> = text.split(',').collect();
    match parts.as_slice() {
        [first, second] => Ok([Operand::parse(first, line)?, Operand::parse(second, line)?]),
        // TODO: support the optional x/y compare masks and the blitter
        // finished disable bit as a third CWAIT operand.
        [_, _, mask] if mnemonic == "CWAIT" => Err(ConversionError::InvalidOperand {
            operand: mask.to_string(),
            line,
            message: "masked waits are not supported".to_string()
        }),
        _ => Err(ConversionError::InvalidOperand {
            operand: text.to_string(),
            line,
            message: format!("{} expects exactly 2 operands", mnemonic)
        })
    }
}

fn bounded(operand: &Operand, max: u16, what: &str, line: usize) -> Result<u16, ConversionError> {
    let value = operand.resolve(line)?;
    if value > max {
        return Err(ConversionError::InvalidOperand {
            operand: value.to_string(),
            line,
            message: format!("{} must be at most {}", what, max)
        });
    }
    Ok(value)
}


// Copper Program -------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopperProgram {
    pub words: Vec<u16>,
    /// Label names with their word offset, in order of definition.
    pub labels: Vec<(String, usize)>
}

impl CopperProgram {
    pub fn assemble(source: &str) -> Result<Self, ConversionError> {
        let mut program = Self::default();
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            if let Some(instruction) = Instruction::parse(text, line)? {
                if let Instruction::Label(name) = &instruction {
                    program.define_label(name, line);
                }
                program.words.extend(instruction.encode(line)?);
            }
        }
        debug!("copper list: {} words, {} labels", program.words.len(), program.labels.len());
        Ok(program)
    }

    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.iter().find(|(n, _)| n == name).map(|(_, offset)| *offset)
    }

    /// Redefining a label moves it to the current offset.
    fn define_label(&mut self, name: &str, line: usize) {
        let offset = self.words.len();
        if let Some(entry) = self.labels.iter_mut().find(|(n, _)| n == name) {
            debug!("label \"{}\" redefined on line {}", name, line);
            entry.1 = offset;

        } else {
            self.labels.push((name.to_string(), offset));
        }
    }

    pub fn to_c_source(&self) -> String {
        let words: Vec<String> = self.words.iter().map(|w| format!("0x{:03x}", w)).collect();
        let mut out = String::from("#include <ratr0/data_types.h>\n\n");
        out.push_str("\nUINT16 __chip clist[] = {\n");
        out.push('\t');
        out.push_str(&words.join(", "));
        out.push_str("\n};\n");
        out
    }

    pub fn to_c_header(&self) -> String {
        let mut out = String::from("#pragma once\n#ifndef __COPPER__\n#define __COPPER__\n");
        for (name, offset) in &self.labels {
            let _ = writeln!(out, "#define {} ({})", name, offset);
        }
        out.push_str("#endif /* __COPPER__ */\n");
        out
    }
}
