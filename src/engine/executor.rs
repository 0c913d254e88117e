//! Run a plan step by step, checking the host after each mutation.

use super::planner::{Plan, Step};
use crate::discovery::Discovery;
use crate::error::{Error, Result};
use crate::installer::JavaInstaller;
use crate::state::JavaState;
use javakit::JavaVersion;

/// What running a plan did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Executed {
    pub changed: bool,
    /// Version reported by the last verification
    pub version: Option<JavaVersion>,
}

pub fn execute(plan: &Plan, discovery: &Discovery<'_>, installer: &dyn JavaInstaller) -> Result<Executed> {
    let mut executed = Executed::default();

    for step in &plan.steps {
        log::info!("Step: {}", step);
        match step {
            Step::Uninstall { .. } => {
                executed.changed |= installer.uninstall()?;
            }
            Step::Install {
                variant, version, ..
            } => {
                executed.changed |= installer.install(*variant, version)?;
            }
            Step::Verify {
                expect,
                minimum,
                want_sdk,
            } => {
                executed.version = verify(discovery, *expect, *minimum, *want_sdk)?;
            }
        }
    }

    Ok(executed)
}

fn verify(
    discovery: &Discovery<'_>,
    expect: JavaState,
    minimum: Option<JavaVersion>,
    want_sdk: bool,
) -> Result<Option<JavaVersion>> {
    let found = discovery.reported_version(want_sdk)?;
    log::debug!(
        "Verify {}: found {}",
        expect,
        found.map_or_else(|| "nothing".to_string(), |v| v.format_version())
    );

    match (expect, found) {
        (JavaState::None, None) => Ok(None),
        (JavaState::None, Some(version)) => Err(Error::PostCondition(format!(
            "Java {} is still active after uninstall",
            version.format_version()
        ))),
        (_, None) => Err(Error::PostCondition(format!(
            "no {expect} reported after install"
        ))),
        (_, Some(version)) => match minimum {
            Some(min) if version < min => Err(Error::PostCondition(format!(
                "{expect} {} reported after install, wanted at least {}",
                version.format_version(),
                min.format_version()
            ))),
            _ => Ok(Some(version)),
        },
    }
}
