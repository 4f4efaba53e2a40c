// Three-Address Code Generation Module
// Instruction buffer, backpatching, loop unrolling and rendering for quad-based IR

pub mod config;
pub mod error;
pub mod jump_list;
pub mod quad;
pub mod render;
pub mod session;
pub mod types;
pub mod unroll;
pub mod values;

pub use config::CodegenConfig;
pub use error::CodegenError;
pub use jump_list::JumpList;
pub use quad::{Destination, Quad, QuadKind};
pub use session::CodegenSession;
pub use types::{resolve_opcode, ValueType};
pub use values::{SemanticValue, UnrollHint, ValueInfo};
