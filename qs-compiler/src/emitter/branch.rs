use crate::ast::Condition;

use super::chunk::local_label;

/// Branch-construct-specific lowering of conditional jumps.
///
/// Each branching statement kind gets a behavior attached to the chunk whose
/// control flow it governs. The behavior writes the conditional jump
/// instructions for that construct and reports whether it already transfers
/// control unconditionally on every path, in which case the chunk epilogue
/// must not add its own goto/return.
pub trait BranchBehavior {
    fn render_branch_conditions(&self, script_name: &str, out: &mut String);
    fn requires_tail_jump(&self) -> bool;
}

/// One lowered `if`/`elif` arm: jump to `destination` when the condition holds.
pub struct BranchArm {
    pub condition: Condition,
    pub destination: usize,
}

/// if/elif chain, with an optional else destination.
pub struct IfBehavior {
    pub arms: Vec<BranchArm>,
    pub else_destination: Option<usize>,
}

impl BranchBehavior for IfBehavior {
    fn render_branch_conditions(&self, script_name: &str, out: &mut String) {
        for arm in &self.arms {
            render_conditional_jump(&arm.condition, script_name, arm.destination, out);
        }
        if let Some(dest) = self.else_destination {
            out.push_str(&format!("\tgoto {}\n", local_label(script_name, dest)));
        }
    }

    fn requires_tail_jump(&self) -> bool {
        // With an else arm the condition list ends in an unconditional goto.
        self.else_destination.is_none()
    }
}

/// Loop test: jump to the body while the condition holds, fall through to the
/// chunk's return target once it fails. Carried by the header chunk for
/// `while` loops and by the body chunk itself for `do..while`.
pub struct LoopBehavior {
    pub condition: Condition,
    pub body_destination: usize,
}

impl BranchBehavior for LoopBehavior {
    fn render_branch_conditions(&self, script_name: &str, out: &mut String) {
        render_conditional_jump(&self.condition, script_name, self.body_destination, out);
    }

    fn requires_tail_jump(&self) -> bool {
        true
    }
}

/// Multi-way dispatch on one operand, with an optional default destination.
pub struct SwitchBehavior {
    pub operand: String,
    pub cases: Vec<(String, usize)>,
    pub default_destination: Option<usize>,
}

impl BranchBehavior for SwitchBehavior {
    fn render_branch_conditions(&self, script_name: &str, out: &mut String) {
        for (value, dest) in &self.cases {
            out.push_str(&format!("\tcompare {}, {}\n", self.operand, value));
            out.push_str(&format!("\tgoto_if_eq {}\n", local_label(script_name, *dest)));
        }
        if let Some(dest) = self.default_destination {
            out.push_str(&format!("\tgoto {}\n", local_label(script_name, dest)));
        }
    }

    fn requires_tail_jump(&self) -> bool {
        self.default_destination.is_none()
    }
}

fn render_conditional_jump(
    condition: &Condition,
    script_name: &str,
    destination: usize,
    out: &mut String,
) {
    out.push_str(&format!("\tcompare {}, {}\n", condition.left, condition.right));
    out.push_str(&format!(
        "\tgoto_if_{} {}\n",
        condition.op,
        local_label(script_name, destination)
    ));
}
