// Code Generation Error Handling

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CodegenError {
    // Buffer errors
    CapacityExceeded { limit: usize },
    InvalidRange { start: usize, end: usize, next: usize }, // next = current end index

    // Configuration errors
    Config(String),

    // Replay script errors
    Script(String, usize), // message, line

    // IO errors
    IOError(String),
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::CapacityExceeded { limit } => {
                write!(f, "Instruction limit exceeded: buffer holds at most {} quads", limit)
            }
            CodegenError::InvalidRange { start, end, next } => {
                write!(
                    f,
                    "Invalid instruction range [{}, {}) (next free index is {})",
                    start, end, next
                )
            }
            CodegenError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            CodegenError::Script(msg, line) => {
                write!(f, "Script error at line {}: {}", line, msg)
            }
            CodegenError::IOError(msg) => {
                write!(f, "IO error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CodegenError {}

impl From<std::io::Error> for CodegenError {
    fn from(err: std::io::Error) -> Self {
        CodegenError::IOError(err.to_string())
    }
}
