//! Quad (three-address instruction) representation
//!
//! A quad is one operation with up to two operands and a destination. The operation
//! mnemonic is classified into a [`QuadKind`] once, when the quad is built, so that the
//! renderer and the loop unroller can match on it instead of re-inspecting text.
//!
//! The destination is a [`Destination`] rather than plain text. For jumps it holds the
//! target instruction index once known, or [`Destination::Unresolved`] until the jump is
//! backpatched.

use std::fmt;

/// Placeholder printed for jumps whose target was never backpatched
pub const UNRESOLVED_MARKER: &str = "???";

/// Instruction kinds, assigned at emission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuadKind {
    /// `IF <arg1> <relation> <arg2> GOTO <target>`
    CondJump { relation: String },
    /// `GOTO <target>`
    Goto,
    Halt,
    /// `arg1[arg2] := res`
    ArrayStore,
    /// `res := arg1[arg2]`
    ArrayLoad,
    Param,
    Call,
    /// `res := arg1`
    Assign,
    /// Any other mnemonic: binary/unary arithmetic, conversions, labels...
    Op(String),
}

impl QuadKind {
    /// Classify a mnemonic as written by grammar actions (`"IF LTI"`, `"GOTO"`, `"ADDI"`...)
    pub fn from_mnemonic(op: &str) -> Self {
        if let Some(rest) = op.strip_prefix("IF") {
            return QuadKind::CondJump {
                relation: rest.trim_start().to_string(),
            };
        }
        match op {
            "GOTO" => QuadKind::Goto,
            "HALT" => QuadKind::Halt,
            "arr_set" => QuadKind::ArrayStore,
            "arr_get" => QuadKind::ArrayLoad,
            "PARAM" => QuadKind::Param,
            "CALL" => QuadKind::Call,
            ":=" => QuadKind::Assign,
            other => QuadKind::Op(other.to_string()),
        }
    }

    /// Jumps are the only quads whose destination names an instruction index
    pub fn is_jump(&self) -> bool {
        matches!(self, QuadKind::CondJump { .. } | QuadKind::Goto)
    }
}

impl fmt::Display for QuadKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadKind::CondJump { relation } => write!(f, "IF {}", relation),
            QuadKind::Goto => write!(f, "GOTO"),
            QuadKind::Halt => write!(f, "HALT"),
            QuadKind::ArrayStore => write!(f, "arr_set"),
            QuadKind::ArrayLoad => write!(f, "arr_get"),
            QuadKind::Param => write!(f, "PARAM"),
            QuadKind::Call => write!(f, "CALL"),
            QuadKind::Assign => write!(f, ":="),
            QuadKind::Op(op) => write!(f, "{}", op),
        }
    }
}

/// Destination field of a quad
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Empty,
    /// Variable, temporary, literal, or a symbolic label name
    Operand(String),
    /// Resolved 1-based instruction index
    Target(usize),
    /// Jump waiting for backpatch
    Unresolved,
}

impl Destination {
    /// Interpret caller-supplied destination text for a quad of the given kind
    pub fn for_kind(kind: &QuadKind, res: Option<&str>) -> Self {
        match (kind.is_jump(), res) {
            (true, None) => Destination::Unresolved,
            (true, Some(text)) => match text.parse::<usize>() {
                Ok(index) => Destination::Target(index),
                Err(_) => Destination::Operand(text.to_string()),
            },
            (false, None) => Destination::Empty,
            (false, Some(text)) => Destination::Operand(text.to_string()),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Destination::Empty)
    }

    pub fn target(&self) -> Option<usize> {
        match self {
            Destination::Target(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Destination::Empty => Ok(()),
            Destination::Operand(text) => write!(f, "{}", text),
            Destination::Target(index) => write!(f, "{}", index),
            Destination::Unresolved => write!(f, "{}", UNRESOLVED_MARKER),
        }
    }
}

/// One three-address instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quad {
    pub kind: QuadKind,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
    pub res: Destination,
}

impl Quad {
    /// Build a quad from the four text fields grammar actions pass around
    pub fn new(op: &str, arg1: Option<&str>, arg2: Option<&str>, res: Option<&str>) -> Self {
        let kind = QuadKind::from_mnemonic(op);
        let res = Destination::for_kind(&kind, res);
        Quad {
            kind,
            arg1: arg1.map(str::to_string),
            arg2: arg2.map(str::to_string),
            res,
        }
    }

    pub fn goto(target: Option<usize>) -> Self {
        Quad {
            kind: QuadKind::Goto,
            arg1: None,
            arg2: None,
            res: target.map_or(Destination::Unresolved, Destination::Target),
        }
    }

    pub fn cond_jump(relation: &str, arg1: &str, arg2: &str) -> Self {
        Quad {
            kind: QuadKind::CondJump {
                relation: relation.to_string(),
            },
            arg1: Some(arg1.to_string()),
            arg2: Some(arg2.to_string()),
            res: Destination::Unresolved,
        }
    }

    pub fn assign(res: &str, value: &str) -> Self {
        Quad::new(":=", Some(value), None, Some(res))
    }

    pub fn is_jump(&self) -> bool {
        self.kind.is_jump()
    }

    pub fn is_unresolved_jump(&self) -> bool {
        self.is_jump() && matches!(self.res, Destination::Unresolved)
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arg1 = field(&self.arg1);
        let arg2 = field(&self.arg2);
        match &self.kind {
            QuadKind::CondJump { relation } => {
                write!(f, "IF {} {} {} GOTO {}", arg1, relation, arg2, self.res)
            }
            QuadKind::Goto => write!(f, "GOTO {}", self.res),
            QuadKind::Halt => write!(f, "HALT"),
            QuadKind::ArrayStore => write!(f, "{}[{}] := {}", arg1, arg2, self.res),
            QuadKind::ArrayLoad => write!(f, "{} := {}[{}]", self.res, arg1, arg2),
            QuadKind::Param => write!(f, "PARAM {}", arg1),
            QuadKind::Call => write!(f, "CALL {}, {}", arg1, arg2),
            QuadKind::Assign => write!(f, "{} := {}", self.res, arg1),
            QuadKind::Op(op) => match (&self.arg1, &self.arg2, self.res.is_present()) {
                (Some(a), Some(b), true) => write!(f, "{} := {} {} {}", self.res, a, op, b),
                (Some(a), None, true) => write!(f, "{} := {} {}", self.res, op, a),
                _ => {
                    // Structural fallback: every present field, space separated
                    write!(f, "{}", op)?;
                    for part in [&self.arg1, &self.arg2].into_iter().flatten() {
                        write!(f, " {}", part)?;
                    }
                    if self.res.is_present() {
                        write!(f, " {}", self.res)?;
                    }
                    Ok(())
                }
            },
        }
    }
}
