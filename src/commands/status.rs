use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::Context;
use crate::discovery::Discovery;
use crate::engine::Reconciler;
use crate::state::Outcome;
use crate::ui;

use super::Host;

#[derive(Serialize)]
struct Status<'a> {
    distribution: &'a str,
    family: &'a str,
    #[serde(flatten)]
    java: Outcome,
}

pub fn run(ctx: &Context, config: Option<&Path>) -> Result<()> {
    let host = Host::load(config, None)?;
    let installer = host.installer()?;
    let outcome = Reconciler::new(Discovery::new(&host.runner), installer.as_ref()).observe()?;

    if ctx.json {
        return ui::json(&Status {
            distribution: &host.distribution.id,
            family: host.distribution.family.name(),
            java: outcome,
        });
    }

    ui::header("Java Status");

    ui::section("Host");
    ui::kv("Distribution", &host.distribution.id);
    ui::kv("Family", host.distribution.family.name());
    if let Some(version) = &host.distribution.version_id {
        ui::kv("Release", version);
    }

    ui::section("Java");
    ui::kv("State", &outcome.state.to_string());
    ui::kv("Version", &ui::or_none(&outcome.version));
    ui::kv("JAVA_HOME", &ui::or_none(&outcome.java_home));

    if ctx.verbose > 0 {
        ui::dim(&format!("env file: {}", host.settings.env_file.display()));
    }
    println!();
    Ok(())
}
