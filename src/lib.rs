//! Three-address code generation backend
//!
//! Grammar actions drive a [`codegen::CodegenSession`]: they emit quads, allocate
//! temporaries and labels, build pending-jump lists and backpatch them, and unroll loop
//! bodies. The finished buffer is rendered one instruction per line.

pub mod codegen;
pub mod script;

pub use codegen::{CodegenConfig, CodegenError, CodegenSession, JumpList};
