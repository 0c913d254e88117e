//! Reconciliation engine for javactl
//!
//! The engine orchestrates:
//! 1. Diffing - Discover the active Java and compare it to the target
//! 2. Planning - Turn a non-compliant diff into ordered steps
//! 3. Executing - Uninstall, install, and verify the host after each

pub mod differ;
pub mod executor;
pub mod planner;

pub use planner::Plan;

use crate::discovery::Discovery;
use crate::error::Result;
use crate::installer::JavaInstaller;
use crate::state::{JavaState, Outcome, TargetSpec};
use javakit::JavaVersion;
use std::path::Path;

/// Result of one reconciliation.
#[derive(Debug, Clone)]
pub struct Report {
    pub outcome: Outcome,
    pub plan: Plan,
}

pub struct Reconciler<'a> {
    discovery: Discovery<'a>,
    installer: &'a dyn JavaInstaller,
}

impl<'a> Reconciler<'a> {
    pub fn new(discovery: Discovery<'a>, installer: &'a dyn JavaInstaller) -> Self {
        Self {
            discovery,
            installer,
        }
    }

    /// The active Java, without changing anything.
    pub fn observe(&self) -> Result<Outcome> {
        let current = self.discovery.discover()?;
        Ok(self.outcome(false, current.state, current.version))
    }

    /// Bring the host to `target`.
    ///
    /// With `dry_run`, the plan is built and reported as if it had run but
    /// the host is left alone.
    pub fn reconcile(&self, target: &TargetSpec, dry_run: bool) -> Result<Report> {
        let current = self.discovery.discover()?;
        log::info!(
            "Found {}{}",
            current.state,
            current
                .version
                .map(|v| format!(" {}", v.format_version()))
                .unwrap_or_default()
        );

        let plan = planner::plan(current, target, self.installer)?;
        if plan.is_empty() {
            log::info!("Already compliant with {}", target.state);
            let outcome = self.outcome(false, current.state, current.version);
            return Ok(Report { outcome, plan });
        }

        if dry_run {
            let outcome = match plan.install() {
                Some((_, version, home)) => Outcome {
                    changed: true,
                    state: target.state,
                    version: version.format_version(),
                    java_home: display(home),
                },
                None => self.outcome(true, JavaState::None, None),
            };
            return Ok(Report { outcome, plan });
        }

        let executed = executor::execute(&plan, &self.discovery, self.installer)?;
        let java_home = plan.install().map(|(_, _, home)| display(home)).unwrap_or_default();
        let outcome = Outcome {
            changed: executed.changed,
            state: target.state,
            version: executed
                .version
                .map(|v| v.format_version())
                .unwrap_or_default(),
            java_home,
        };
        Ok(Report { outcome, plan })
    }

    fn outcome(&self, changed: bool, state: JavaState, version: Option<JavaVersion>) -> Outcome {
        let home = match (state.variant(), version) {
            (Some(variant), Some(found)) => {
                let version = JavaVersion::latest(found.major).unwrap_or(found);
                display(&self.installer.java_home(variant, &version))
            }
            _ => String::new(),
        };
        Outcome {
            changed,
            state,
            version: version.map(|v| v.format_version()).unwrap_or_default(),
            java_home: home,
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
