//! Bytecode emission — lowers statement trees to labeled script chunks.
//!
//! Module layout:
//! - `chunk`  — chunk data model, branch splitting, and text rendering
//! - `branch` — per-construct branch behaviors (conditional jump lowering)

pub mod branch;
pub mod chunk;

use crate::ast::{Program, Script, Stmt};
use crate::CompileError;

use branch::{BranchArm, IfBehavior, LoopBehavior, SwitchBehavior};
use chunk::Chunk;

/// Emit the bytecode text for every script in the program, separated by a
/// blank line.
pub fn emit_program(program: &Program) -> Result<String, CompileError> {
    let texts = program
        .scripts
        .iter()
        .map(emit_script)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(texts.join("\n"))
}

/// Emit the bytecode text for a single script.
pub fn emit_script(script: &Script) -> Result<String, CompileError> {
    let mut emitter = Emitter::new(&script.name, script.statements.clone());
    emitter.split_chunks();
    emitter.render()
}

/// Emitter owns the chunk list and id counter for one script. Splitting and
/// rendering are script-scoped; separate scripts never share state.
struct Emitter {
    script_name: String,
    chunks: Vec<Chunk>,
    counter: usize,
}

impl Emitter {
    fn new(script_name: &str, statements: Vec<Stmt>) -> Self {
        Self {
            script_name: script_name.to_string(),
            // Chunk 0 is the script entrypoint and ends the script when no
            // later split redirects it.
            chunks: vec![Chunk::new(0, None, statements)],
            counter: 0,
        }
    }

    /// Split chunks until no chunk body contains a branching statement.
    ///
    /// Chunks are processed in increasing id order; chunks created by a
    /// split are appended and handled when the walk reaches them, so nested
    /// branches resolve in creation order. Statements before the first
    /// branch of a chunk are always plain commands, so one split per chunk
    /// visit suffices.
    fn split_chunks(&mut self) {
        let mut i = 0;
        while i < self.chunks.len() {
            if let Some(index) = self.chunks[i].first_branch_index() {
                self.split_at(i, index);
            }
            i += 1;
        }
    }

    /// Consume the branching statement at `statement_index` of chunk
    /// `chunk_index`, creating its destination chunks and attaching the
    /// matching branch behavior.
    fn split_at(&mut self, chunk_index: usize, statement_index: usize) {
        let (branch, post, continuation) =
            self.chunks[chunk_index].split_for_branch(statement_index, &mut self.counter);
        if let Some(post) = post {
            self.chunks.push(post);
        }

        match branch {
            Stmt::If {
                branches,
                else_body,
            } => {
                let arms = branches
                    .into_iter()
                    .map(|b| BranchArm {
                        condition: b.condition,
                        destination: self.add_chunk(continuation, b.body),
                    })
                    .collect();
                let else_destination =
                    else_body.map(|body| self.add_chunk(continuation, body));
                self.chunks[chunk_index].branch_behavior = Some(Box::new(IfBehavior {
                    arms,
                    else_destination,
                }));
            }
            Stmt::While { condition, body } => {
                // The back edge must re-test the condition without replaying
                // the current chunk's body, so the test lives in a dedicated
                // header chunk that the body loops back to.
                let header_id = self.add_chunk(continuation, Vec::new());
                let body_id = self.add_chunk(Some(header_id), body);
                self.chunks[header_id].branch_behavior = Some(Box::new(LoopBehavior {
                    condition,
                    body_destination: body_id,
                }));
                self.chunks[chunk_index].return_id = Some(header_id);
            }
            Stmt::DoWhile { condition, body } => {
                // Bottom-tested: the body chunk jumps back to itself while
                // the condition holds.
                let body_id = self.add_chunk(continuation, body);
                self.chunks[body_id].branch_behavior = Some(Box::new(LoopBehavior {
                    condition,
                    body_destination: body_id,
                }));
                self.chunks[chunk_index].return_id = Some(body_id);
            }
            Stmt::Switch {
                operand,
                cases,
                default_body,
            } => {
                let cases = cases
                    .into_iter()
                    .map(|c| (c.value, self.add_chunk(continuation, c.body)))
                    .collect();
                let default_destination =
                    default_body.map(|body| self.add_chunk(continuation, body));
                self.chunks[chunk_index].branch_behavior = Some(Box::new(SwitchBehavior {
                    operand,
                    cases,
                    default_destination,
                }));
            }
            Stmt::Command { .. } => {
                unreachable!("split_at invoked on a non-branching statement")
            }
        }
    }

    /// Allocate the next chunk id and append a chunk for `statements` that
    /// returns to `return_id`. Keeps `chunks[i].id == i`.
    fn add_chunk(&mut self, return_id: Option<usize>, statements: Vec<Stmt>) -> usize {
        self.counter += 1;
        let id = self.counter;
        self.chunks.push(Chunk::new(id, return_id, statements));
        id
    }

    /// Render every chunk in id order into one contiguous text stream.
    fn render(&self) -> Result<String, CompileError> {
        let mut out = String::new();
        for chunk in &self.chunks {
            chunk.render(&self.script_name, &mut out)?;
        }
        Ok(out)
    }
}
