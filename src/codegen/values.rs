// Value records shared with the parser and the symbol table

use crate::codegen::error::CodegenError;
use crate::codegen::jump_list::JumpList;
use crate::codegen::session::CodegenSession;
use crate::codegen::types::ValueType;
use std::mem;

/// What the symbol table stores for a declared name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueInfo {
    pub ty: ValueType,
    pub is_array: bool,
    pub length: usize, // Declared element count; 0 for scalars
}

impl ValueInfo {
    pub fn scalar(ty: ValueType) -> Self {
        Self {
            ty,
            is_array: false,
            length: 0,
        }
    }

    pub fn array(ty: ValueType, length: usize) -> Self {
        Self {
            ty,
            is_array: true,
            length,
        }
    }
}

/// Loop unrolling hints collected while parsing a loop header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnrollHint {
    pub eligible: bool,
    pub times: i64,
    pub body_start: usize,
}

impl UnrollHint {
    pub fn new(times: i64, body_start: usize) -> Self {
        Self {
            eligible: true,
            times,
            body_start,
        }
    }

    /// Duplicate the loop body `[body_start, body_end)` if the loop qualified
    pub fn apply(&self, session: &mut CodegenSession, body_end: usize) -> Result<(), CodegenError> {
        if !self.eligible {
            return Ok(());
        }
        session.clone_range(self.body_start, body_end, self.times)
    }
}

/// Synthesized attribute carried up the parse tree
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticValue {
    pub addr: String,
    pub ty: ValueType,
    pub offset: Option<String>, // Array element offset operand

    pub true_list: JumpList,
    pub false_list: JumpList,
    pub next_list: JumpList,
    pub break_list: JumpList,

    pub label: usize, // Marker: index of the first quad of a construct

    pub unroll: UnrollHint,
}

impl SemanticValue {
    pub fn new(addr: impl Into<String>, ty: ValueType) -> Self {
        Self {
            addr: addr.into(),
            ty,
            offset: None,
            true_list: JumpList::new(),
            false_list: JumpList::new(),
            next_list: JumpList::new(),
            break_list: JumpList::new(),
            label: 0,
            unroll: UnrollHint::default(),
        }
    }

    /// Marker placed at the current end of the buffer (the `M -> ε` action)
    pub fn marker(session: &CodegenSession) -> Self {
        let mut value = Self::new("", ValueType::Int);
        value.label = session.current_end_index();
        value
    }

    pub fn take_true_list(&mut self) -> JumpList {
        mem::take(&mut self.true_list)
    }

    pub fn take_false_list(&mut self) -> JumpList {
        mem::take(&mut self.false_list)
    }

    pub fn take_next_list(&mut self) -> JumpList {
        mem::take(&mut self.next_list)
    }

    pub fn take_break_list(&mut self) -> JumpList {
        mem::take(&mut self.break_list)
    }

    /// `ty`-specific opcode for `base`, e.g. `ADD` on a float value -> `ADDF`
    pub fn opcode(&self, base: &str) -> String {
        crate::codegen::types::resolve_opcode(base, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_value_info_constructors() {
        let scalar = ValueInfo::scalar(ValueType::Float);
        assert!(!scalar.is_array);
        assert_eq!(scalar.length, 0);

        let array = ValueInfo::array(ValueType::Int, 10);
        assert!(array.is_array);
        assert_eq!(array.length, 10);
    }

    #[test]
    fn test_take_lists_leaves_empty() {
        let mut value = SemanticValue::new("$t01", ValueType::Bool);
        value.true_list = JumpList::singleton(3);
        let taken = value.take_true_list();
        assert!(taken.contains(3));
        assert!(value.true_list.is_empty());
    }

    #[test]
    fn test_marker_records_next_index() {
        let mut session = CodegenSession::new();
        session.emit("HALT", None, None, None).unwrap();
        assert_eq!(SemanticValue::marker(&session).label, 2);
    }

    #[test]
    fn test_ineligible_hint_does_nothing() {
        let mut session = CodegenSession::new();
        session.emit(":=", Some("0"), None, Some("i")).unwrap();
        UnrollHint::default().apply(&mut session, 2).unwrap();
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_hint_unrolls_body() {
        let mut session = CodegenSession::new();
        session.emit("ADDI", Some("i"), Some("1"), Some("i")).unwrap();
        let hint = UnrollHint::new(3, 1);
        hint.apply(&mut session, 2).unwrap();
        assert_eq!(session.len(), 4);
    }

    #[test]
    fn test_opcode_follows_type() {
        let value = SemanticValue::new("x", ValueType::Float);
        assert_eq!(value.opcode("MUL"), "MULF");
    }
}
