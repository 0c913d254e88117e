//! Turn a non-compliant diff into ordered steps.
//!
//! Installs always target the newest known build of the requested major.
//! A host that cannot install that build is rejected here, before any
//! step runs.

use super::differ::is_compliant;
use crate::error::{Error, Result};
use crate::installer::JavaInstaller;
use crate::state::{Discovered, JavaState, TargetSpec};
use javakit::{JavaVersion, Variant};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Remove whatever Java is active.
    Uninstall { from: JavaState },
    /// Install and register `variant` at `version`.
    Install {
        variant: Variant,
        version: JavaVersion,
        home: PathBuf,
    },
    /// Re-discover and check the host against `expect`.
    Verify {
        expect: JavaState,
        /// Lowest acceptable version, build dropped
        minimum: Option<JavaVersion>,
        /// Ask the compiler instead of the runtime
        want_sdk: bool,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninstall { from } => write!(f, "uninstall {from}"),
            Self::Install {
                variant,
                version,
                home,
            } => write!(f, "install {variant} {version} into {}", home.display()),
            Self::Verify {
                expect, minimum, ..
            } => match minimum {
                Some(min) => write!(f, "verify {expect} >= {min}"),
                None => write!(f, "verify {expect}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub current: Discovered,
    pub target: TargetSpec,
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The install step, if the plan has one.
    pub fn install(&self) -> Option<(Variant, JavaVersion, &PathBuf)> {
        self.steps.iter().find_map(|step| match step {
            Step::Install {
                variant,
                version,
                home,
            } => Some((*variant, *version, home)),
            _ => None,
        })
    }
}

/// Build the steps that take the host from `current` to `target`.
pub fn plan(current: Discovered, target: &TargetSpec, installer: &dyn JavaInstaller) -> Result<Plan> {
    let mut steps = Vec::new();

    if is_compliant(&current, target) {
        return Ok(Plan {
            current,
            target: *target,
            steps,
        });
    }

    // Must fail before any uninstall step exists.
    let install = match (target.variant(), target.version) {
        (Some(variant), Some(requested)) => {
            let version = install_version(variant, &requested, installer)?;
            Some((variant, requested, version))
        }
        _ => None,
    };

    if current.state != JavaState::None {
        steps.push(Step::Uninstall {
            from: current.state,
        });
        steps.push(Step::Verify {
            expect: JavaState::None,
            minimum: None,
            want_sdk: current.state == JavaState::Jdk,
        });
    }

    if let Some((variant, requested, version)) = install {
        steps.push(Step::Install {
            variant,
            version,
            home: installer.java_home(variant, &version),
        });
        steps.push(Step::Verify {
            expect: target.state,
            minimum: Some(requested.without_build()),
            want_sdk: variant.is_sdk(),
        });
    }

    Ok(Plan {
        current,
        target: *target,
        steps,
    })
}

/// Newest known build of the requested major, if this host can install it.
fn install_version(
    variant: Variant,
    requested: &JavaVersion,
    installer: &dyn JavaInstaller,
) -> Result<JavaVersion> {
    let latest = JavaVersion::latest(requested.major).ok_or_else(|| {
        Error::Unsupported(format!("no installable build of Java {}", requested.major))
    })?;

    if requested.without_build() > latest.without_build() {
        return Err(Error::Unsupported(format!(
            "{} is newer than the latest known build {}",
            requested.format_version(),
            latest.format_version()
        )));
    }

    if !installer.supports(variant, &latest) {
        return Err(Error::Unsupported(format!(
            "{} {} cannot be installed on {}",
            variant,
            latest.format_version(),
            installer.family().name()
        )));
    }

    Ok(latest)
}
