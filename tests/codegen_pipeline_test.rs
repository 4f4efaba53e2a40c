// End-to-end tests for the code generation pipeline
// Drive a session the way grammar actions do, then check the rendered quads

use std::fs;
use std::path::PathBuf;

use tacgen::codegen::{
    resolve_opcode, CodegenConfig, CodegenError, CodegenSession, JumpList, SemanticValue,
    UnrollHint, ValueType,
};
use tacgen::script::run_script;
use test_log::test;

fn demo_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("demos");
    path.push(name);
    path
}

#[test]
fn test_conditional_false_branch_backpatched() {
    let mut session = CodegenSession::new();
    let t1 = session.new_temporary();
    session.emit(":=", Some("x"), None, Some(&t1)).unwrap();
    session.emit("MULI", Some(&t1), Some("2"), Some(&t1)).unwrap();

    // if ($t01 < 5) ... : true branch falls through, false branch jumps past the block
    let op = format!("IF {}", resolve_opcode("LT", ValueType::Int));
    let cond = session.emit(&op, Some(&t1), Some("5"), None).unwrap();
    assert_eq!(cond, 3);
    let mut condition = SemanticValue::new(t1.clone(), ValueType::Bool);
    condition.false_list = JumpList::singleton(cond);

    assert_eq!(session.current_end_index(), 4);
    for _ in 4..10 {
        session.emit("ADDI", Some("y"), Some("1"), Some("y")).unwrap();
    }
    let after = session.current_end_index();
    assert_eq!(after, 10);
    session.backpatch(condition.take_false_list(), after);
    session.emit("HALT", None, None, None).unwrap();

    let rendered = session.render_to_string();
    let line = rendered.lines().nth(2).unwrap();
    assert_eq!(line, "3: IF $t01 LTI 5 GOTO 10");
    assert!(session.unresolved_jumps().is_empty());
}

#[test]
fn test_while_loop_with_break_and_unroll() {
    let mut session = CodegenSession::new();

    // while (i < n) { if (i == 7) break; i := i + 1 }
    let start = SemanticValue::marker(&session);
    let exit = session.emit("IF GEI", Some("i"), Some("n"), None).unwrap();
    let brk = session.emit("IF EQI", Some("i"), Some("7"), None).unwrap();
    session.emit("ADDI", Some("i"), Some("1"), Some("i")).unwrap();
    let back = session.emit("GOTO", None, None, None).unwrap();
    session.backpatch(JumpList::singleton(back), start.label);

    let mut loop_value = SemanticValue::new("", ValueType::Int);
    loop_value.next_list = JumpList::singleton(exit);
    loop_value.break_list = JumpList::singleton(brk);
    let leaving = loop_value
        .take_next_list()
        .merge(loop_value.take_break_list());
    let end = session.current_end_index();
    session.backpatch(leaving, end);

    // Unroll the whole loop once more
    loop_value.unroll = UnrollHint::new(1, start.label);
    loop_value.unroll.apply(&mut session, end).unwrap();
    session.emit("HALT", None, None, None).unwrap();

    assert_eq!(
        session.render_to_string(),
        "1: IF i GEI n GOTO 5\n\
         2: IF i EQI 7 GOTO 5\n\
         3: i := i ADDI 1\n\
         4: GOTO 1\n\
         5: IF i GEI n GOTO 5\n\
         6: IF i EQI 7 GOTO 5\n\
         7: i := i ADDI 1\n\
         8: GOTO 5\n\
         9: HALT\n"
    );
}

#[test]
fn test_capacity_stops_compilation() {
    let mut session = CodegenSession::with_config(CodegenConfig::with_max_quads(10));
    let mut failure = None;
    for n in 0..20 {
        if let Err(err) = session.emit(":=", Some(&n.to_string()), None, Some("x")) {
            failure = Some(err);
            break;
        }
    }
    assert_eq!(failure, Some(CodegenError::CapacityExceeded { limit: 10 }));
    assert_eq!(session.len(), 10);
    assert_eq!(session.render_to_string().lines().count(), 10);
}

#[test]
fn test_independent_sessions() {
    let mut a = CodegenSession::new();
    let mut b = CodegenSession::new();
    assert_eq!(a.new_temporary(), "$t01");
    assert_eq!(b.new_temporary(), "$t01");
    a.emit("HALT", None, None, None).unwrap();
    assert!(b.is_empty());
}

#[test]
fn test_demo_script_renders() {
    let source = fs::read_to_string(demo_path("count_loop.tac")).unwrap();
    let config = CodegenConfig::from_file(demo_path("tacgen.toml")).unwrap();
    assert_eq!(config.max_quads, 2000);

    let mut session = CodegenSession::with_config(config);
    run_script(&mut session, &source).unwrap();

    let mut out = Vec::new();
    session.render(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1: i := 0\n\
         2: s := 0\n\
         3: IF i EQI 1 GOTO 5\n\
         4: s := s ADDI i\n\
         5: i := i ADDI 1\n\
         6: IF i EQI 1 GOTO 8\n\
         7: s := s ADDI i\n\
         8: i := i ADDI 1\n\
         9: IF i EQI 1 GOTO 11\n\
         10: s := s ADDI i\n\
         11: i := i ADDI 1\n\
         12: PARAM s\n\
         13: CALL put_i, 1\n\
         14: HALT\n"
    );
}
