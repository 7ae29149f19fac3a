use crate::ast::Stmt;
use crate::CompileError;

use super::branch::BranchBehavior;

/// A single chunk of script output. Each chunk gets its own label in the
/// emitted bytecode, and chunks reference each other by id only.
pub struct Chunk {
    pub id: usize,
    /// Fallthrough target once the chunk's body (and branch conditions, if
    /// any) are done. `None` means the chunk ends the script with `return`.
    pub return_id: Option<usize>,
    pub statements: Vec<Stmt>,
    pub branch_behavior: Option<Box<dyn BranchBehavior>>,
}

impl Chunk {
    pub fn new(id: usize, return_id: Option<usize>, statements: Vec<Stmt>) -> Self {
        Self {
            id,
            return_id,
            statements,
            branch_behavior: None,
        }
    }

    /// Render the chunk's label, body, and branch epilogue in order.
    pub fn render(&self, script_name: &str, out: &mut String) -> Result<(), CompileError> {
        self.render_label(script_name, out);
        self.render_statements(out)?;
        self.render_branching(script_name, out);
        Ok(())
    }

    fn render_label(&self, script_name: &str, out: &mut String) {
        if self.id == 0 {
            // Main script entrypoint, so it gets a global label.
            out.push_str(&format!("{}::\n", script_name));
        } else {
            out.push_str(&format!("{}:\n", local_label(script_name, self.id)));
        }
    }

    fn render_statements(&self, out: &mut String) -> Result<(), CompileError> {
        // Only basic non-branching commands may remain here; anything else
        // escaped the split pass and compilation cannot continue.
        for stmt in &self.statements {
            match stmt {
                Stmt::Command { name, args } => out.push_str(&render_command(name, args)),
                other => {
                    return Err(CompileError::NonCommandStatement {
                        literal: other.token_literal(),
                    })
                }
            }
        }
        Ok(())
    }

    fn render_branching(&self, script_name: &str, out: &mut String) {
        let mut requires_tail_jump = true;
        if let Some(behavior) = &self.branch_behavior {
            behavior.render_branch_conditions(script_name, out);
            requires_tail_jump = behavior.requires_tail_jump();
        }
        // Sometimes a tail jump/return isn't needed. For example, a chunk
        // that ends in an "else" branch already ends with a "goto" command.
        if requires_tail_jump {
            match self.return_id {
                None => out.push_str("\treturn\n"),
                Some(id) => out.push_str(&format!("\tgoto {}\n", local_label(script_name, id))),
            }
        }
    }

    /// Split the chunk at the branching statement at `statement_index`.
    ///
    /// Statements after the branch move into a new post-logic chunk that
    /// inherits this chunk's return target, and this chunk falls through to
    /// it. When the branch is the last statement no new chunk is needed and
    /// the return target is unchanged. Returns the removed branching
    /// statement, the new chunk (if any), and the continuation id the
    /// branch's destinations should return to.
    pub fn split_for_branch(
        &mut self,
        statement_index: usize,
        counter: &mut usize,
    ) -> (Stmt, Option<Chunk>, Option<usize>) {
        let mut tail = self.statements.split_off(statement_index);
        let branch = tail.remove(0);

        if tail.is_empty() {
            // The branch was the last statement of the current chunk, so it
            // has the same return point as the current chunk.
            return (branch, None, self.return_id);
        }

        // The branch needs to return to the logic that occurs directly after
        // it, so that logic becomes a new chunk.
        *counter += 1;
        let post = Chunk::new(*counter, self.return_id, tail);
        self.return_id = Some(post.id);
        let continuation = Some(post.id);
        (branch, Some(post), continuation)
    }

    /// Index of the first branching statement in the body, if any.
    pub fn first_branch_index(&self) -> Option<usize> {
        self.statements.iter().position(Stmt::is_branching)
    }
}

/// Script-local label for a non-entry chunk, unique per (script, id).
pub fn local_label(script_name: &str, id: usize) -> String {
    format!("{}_{}", script_name, id)
}

fn render_command(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        format!("\t{}\n", name)
    } else {
        format!("\t{} {}\n", name, args.join(", "))
    }
}
