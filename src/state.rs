//! Java states, the validated target, and the run outcome.

use crate::error::{Error, Result};
use clap::ValueEnum;
use javakit::{JavaVersion, Variant};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which Java, if any, is active on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JavaState {
    None,
    #[default]
    Jre,
    Jdk,
}

impl JavaState {
    pub fn variant(self) -> Option<Variant> {
        match self {
            Self::None => None,
            Self::Jre => Some(Variant::Jre),
            Self::Jdk => Some(Variant::Jdk),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Jre => "jre",
            Self::Jdk => "jdk",
        }
    }
}

impl From<Variant> for JavaState {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Jre => Self::Jre,
            Variant::Jdk => Self::Jdk,
        }
    }
}

impl fmt::Display for JavaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared target, validated once before anything runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub state: JavaState,
    /// Minimum acceptable version; `None` only when `state` is `None`.
    pub version: Option<JavaVersion>,
}

impl TargetSpec {
    /// Validate a requested state and optional version string.
    ///
    /// A missing version means any release of the newest supported major. The version is
    /// ignored when the target state is `none`.
    pub fn new(state: JavaState, version: Option<&str>) -> Result<Self> {
        if state == JavaState::None {
            if let Some(v) = version {
                log::warn!("Ignoring version {} for state none", v);
            }
            return Ok(Self {
                state,
                version: None,
            });
        }

        let version = match version.map(str::trim).filter(|v| !v.is_empty()) {
            Some(text) => JavaVersion::parse(text)
                .ok_or_else(|| Error::InvalidInput(format!("unparseable version '{text}'")))?,
            None => JavaVersion::default_latest()
                .map(|latest| JavaVersion::new(latest.major, 0, 0, 0))
                .ok_or_else(|| {
                    Error::Unsupported("no supported major has a known build".to_string())
                })?,
        };

        if !JavaVersion::is_supported_major(version.major) {
            return Err(Error::InvalidInput(format!(
                "Java {} is not a supported major version",
                version.major
            )));
        }

        Ok(Self {
            state,
            version: Some(version),
        })
    }

    pub fn variant(&self) -> Option<Variant> {
        self.state.variant()
    }
}

/// What discovery found on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovered {
    pub state: JavaState,
    pub version: Option<JavaVersion>,
}

impl Discovered {
    pub fn none() -> Self {
        Self {
            state: JavaState::None,
            version: None,
        }
    }
}

/// The single externally observed result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub changed: bool,
    pub state: JavaState,
    /// `1.major.minor_release`, or empty when no Java is active
    pub version: String,
    /// Home directory of the active Java, or empty
    pub java_home: String,
}
