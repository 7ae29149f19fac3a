use qs_compiler::ast::{command, CmpOp, Condition, Stmt};
use qs_compiler::emitter::chunk::Chunk;
use qs_compiler::CompileError;

// ── Render-time invariant violations ─────────────────────────────────────
// A branching statement in a chunk body means the split pass has a bug;
// rendering must stop with a diagnostic naming the offending statement.

#[test]
fn branching_statement_in_chunk_body_fails_rendering() {
    let chunk = Chunk::new(
        0,
        None,
        vec![
            command("msgbox", &["A"]),
            Stmt::While {
                condition: Condition::new("x", CmpOp::Gt, "0"),
                body: Vec::new(),
            },
        ],
    );
    let mut out = String::new();
    let err = chunk
        .render("script", &mut out)
        .expect_err("non-command statement must abort rendering");
    match err {
        CompileError::NonCommandStatement { literal } => {
            assert_eq!(literal, "while", "diagnostic should carry the statement literal");
        }
    }
}

#[test]
fn invariant_diagnostic_names_the_statement() {
    let chunk = Chunk::new(
        2,
        Some(3),
        vec![Stmt::Switch {
            operand: "v".to_string(),
            cases: Vec::new(),
            default_body: None,
        }],
    );
    let mut out = String::new();
    let err = chunk
        .render("script", &mut out)
        .expect_err("non-command statement must abort rendering");
    assert!(
        err.to_string().contains("'switch'"),
        "error message should quote the offending literal, got: {}",
        err
    );
}
