// Semantic value types and type-directed opcode selection

use std::fmt;

/// Semantic type of a value flowing through the code generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    String,
    Error,
}

impl ValueType {
    pub fn is_float(self) -> bool {
        matches!(self, ValueType::Float)
    }

    /// Opcode discriminator: floats get `F`, every other type is integer-class
    pub fn opcode_suffix(self) -> char {
        match self {
            ValueType::Float => 'F',
            ValueType::Int | ValueType::Bool | ValueType::String | ValueType::Error => 'I',
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::String => write!(f, "string"),
            ValueType::Error => write!(f, "error"),
        }
    }
}

/// Select the concrete opcode for `base` given the operand type (e.g. `ADD` -> `ADDF`)
pub fn resolve_opcode(base: &str, ty: ValueType) -> String {
    let mut opcode = String::with_capacity(base.len() + 1);
    opcode.push_str(base);
    opcode.push(ty.opcode_suffix());
    opcode
}
