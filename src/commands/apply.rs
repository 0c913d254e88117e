use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::cli::ApplyArgs;
use crate::discovery::Discovery;
use crate::engine::{Reconciler, differ};
use crate::state::{Outcome, TargetSpec};
use crate::ui;

use super::Host;

pub fn run(ctx: &Context, args: ApplyArgs, config: Option<&Path>) -> Result<()> {
    let target = TargetSpec::new(args.state, args.version.as_deref())?;

    let host = Host::load(config, args.package_location)?;
    let installer = host.installer()?;
    let reconciler = Reconciler::new(Discovery::new(&host.runner), installer.as_ref());

    let report = reconciler.reconcile(&target, args.dry_run)?;

    if ctx.json {
        return ui::json(&report.outcome);
    }

    if !ctx.quiet && (args.dry_run || ctx.verbose > 0) {
        differ::display_plan(&report.plan);
    }
    if args.dry_run && !report.plan.is_empty() {
        println!();
        ui::info("Dry run - no changes made");
    }

    print_outcome(ctx, &report.outcome);
    Ok(())
}

fn print_outcome(ctx: &Context, outcome: &Outcome) {
    println!();
    if outcome.changed {
        ui::success(&format!("Java is now {}", outcome.state));
    } else {
        ui::success(&format!("Java is already {}", outcome.state));
    }
    if ctx.quiet {
        return;
    }
    ui::kv("Version", &ui::or_none(&outcome.version));
    ui::kv("JAVA_HOME", &ui::or_none(&outcome.java_home));
    ui::kv("Changed", &outcome.changed.to_string());
}
