pub mod ast;
pub mod emitter;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("cannot render chunk statement '{literal}' because it is not a command statement")]
    NonCommandStatement { literal: String },
}

/// Emit the bytecode text for a single script.
pub fn compile_script(script: &ast::Script) -> Result<String, CompileError> {
    emitter::emit_script(script)
}

/// Emit the bytecode text for a whole program, one labeled script after another.
pub fn compile_program(program: &ast::Program) -> Result<String, CompileError> {
    emitter::emit_program(program)
}
