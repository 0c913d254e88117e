//! Compliance check and plan display

use super::planner::{Plan, Step};
use crate::state::{Discovered, JavaState, TargetSpec};
use colored::Colorize;

/// Whether `current` already satisfies `target`.
///
/// Versions compare with the build dropped, since `-version` output never
/// reports builds.
pub fn is_compliant(current: &Discovered, target: &TargetSpec) -> bool {
    if current.state != target.state {
        return false;
    }
    if target.state == JavaState::None {
        return true;
    }
    match (current.version, target.version) {
        (Some(have), Some(want)) => have >= want.without_build(),
        (_, None) => true,
        (None, Some(_)) => false,
    }
}

fn describe(state: JavaState, version: Option<String>) -> String {
    match version {
        Some(v) if state != JavaState::None => format!("{state} {v}"),
        _ => state.to_string(),
    }
}

/// Display a plan in a user-friendly format
pub fn display_plan(plan: &Plan) {
    let current = describe(
        plan.current.state,
        plan.current.version.map(|v| v.format_version()),
    );
    let target = describe(
        plan.target.state,
        plan.target.version.map(|v| format!(">= {}", v.without_build().format_version())),
    );

    if plan.is_empty() {
        println!();
        println!("  {} No changes needed ({})", "✓".green(), current);
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Java Plan".bold()
    );
    println!("│");
    println!("│ {:<10} {}", "Current".bold(), current.dimmed());
    println!("│ {:<10} {}", "Target".bold(), target);
    println!("│");

    for step in &plan.steps {
        let symbol = match step {
            Step::Uninstall { .. } => "-".red(),
            Step::Install { .. } => "+".green(),
            Step::Verify { .. } => "?".dimmed(),
        };
        println!("│   {} {}", symbol, step);
    }

    let mutating = plan
        .steps
        .iter()
        .filter(|s| !matches!(s, Step::Verify { .. }))
        .count();

    println!("│");
    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} steps ({} change the host)",
        plan.steps.len().to_string().bold(),
        mutating.to_string().yellow()
    );
    println!("└─────────────────────────────────────────────────────┘");
}
