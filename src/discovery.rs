//! Finding out which Java is active.
//!
//! The compiler is asked first: a host that answers `javac -version` is
//! treated as having a JDK, otherwise `java -version` decides between a JRE
//! and nothing.

use crate::error::{Error, Result};
use crate::state::{Discovered, JavaState};
use hostexec::{CommandRunner, CommandSpec};
use javakit::JavaVersion;

pub struct Discovery<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Discovery<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Version reported by `javac` (`want_sdk`) or `java`.
    ///
    /// A missing binary or a missing version line is `None`; a version line
    /// that does not parse is an error.
    pub fn reported_version(&self, want_sdk: bool) -> Result<Option<JavaVersion>> {
        let program = if want_sdk { "javac" } else { "java" };
        let output = match self.runner.run(&CommandSpec::new(program).arg("-version")) {
            Ok(output) => output,
            Err(e) if e.is_not_found() => {
                log::debug!("{} not found", program);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let text = output.combined_str();
        let version = if want_sdk {
            parse_javac_output(&text)?
        } else {
            parse_java_output(&text)?
        };
        log::debug!(
            "{} reports {}",
            program,
            version.map_or_else(|| "nothing".to_string(), |v| v.format_version())
        );
        Ok(version)
    }

    pub fn discover(&self) -> Result<Discovered> {
        if let Some(version) = self.reported_version(true)? {
            return Ok(Discovered {
                state: JavaState::Jdk,
                version: Some(version),
            });
        }
        if let Some(version) = self.reported_version(false)? {
            return Ok(Discovered {
                state: JavaState::Jre,
                version: Some(version),
            });
        }
        Ok(Discovered::none())
    }
}

/// `javac 1.7.0_40`
fn parse_javac_output(text: &str) -> Result<Option<JavaVersion>> {
    let Some(line) = text.lines().find(|l| l.starts_with("javac ")) else {
        return Ok(None);
    };
    let field = line.split(' ').nth(1).unwrap_or_default().trim();
    parse_reported(field).map(Some)
}

/// `java version "1.7.0_40"` or `openjdk version "1.7.0_25"`
fn parse_java_output(text: &str) -> Result<Option<JavaVersion>> {
    let Some(line) = text
        .lines()
        .find(|l| l.contains("java version") || l.contains("openjdk version"))
    else {
        return Ok(None);
    };
    let quoted = line.split('"').nth(1).unwrap_or_default();
    parse_reported(quoted).map(Some)
}

fn parse_reported(text: &str) -> Result<JavaVersion> {
    JavaVersion::parse(text).ok_or_else(|| Error::Discovery(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostexec::{CommandOutput, MockRunner};

    const JAVA_7: &str = "java version \"1.7.0_40\"\n\
Java(TM) SE Runtime Environment (build 1.7.0_40-b43)\n\
Java HotSpot(TM) 64-Bit Server VM (build 24.0-b56, mixed mode)\n";

    /// The JDK tools print their version on stderr.
    fn on_stderr(text: &str) -> CommandOutput {
        CommandOutput {
            code: Some(0),
            stdout: Vec::new(),
            stderr: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_parse_javac() {
        assert_eq!(
            parse_javac_output("javac 1.7.0_40\n").unwrap(),
            Some(JavaVersion::new(7, 0, 40, 0))
        );
        assert_eq!(parse_javac_output("Picked up _JAVA_OPTIONS\n").unwrap(), None);
        assert!(matches!(
            parse_javac_output("javac 1.8.0_20\n"),
            Err(Error::Discovery(_))
        ));
    }

    #[test]
    fn test_parse_java() {
        assert_eq!(
            parse_java_output(JAVA_7).unwrap(),
            Some(JavaVersion::new(7, 0, 40, 0))
        );
        assert_eq!(
            parse_java_output("openjdk version \"1.7.0_25\"\n").unwrap(),
            Some(JavaVersion::new(7, 0, 25, 0))
        );
        assert_eq!(parse_java_output("").unwrap(), None);
        assert!(parse_java_output("openjdk version \"11.0.2\" 2019-01-15\n").is_err());
    }

    #[test]
    fn test_discover_prefers_sdk() {
        let runner = MockRunner::new();
        runner.on(&["javac"], on_stderr("javac 1.7.0_40\n"));
        runner.on(&["java"], on_stderr(JAVA_7));

        let found = Discovery::new(&runner).discover().unwrap();
        assert_eq!(found.state, JavaState::Jdk);
        assert_eq!(runner.count(&["java"]), 0);
    }

    #[test]
    fn test_discover_runtime_only() {
        let runner = MockRunner::new();
        runner.on(&["java", "-version"], on_stderr(JAVA_7));

        let found = Discovery::new(&runner).discover().unwrap();
        assert_eq!(found.state, JavaState::Jre);
        assert_eq!(found.version, Some(JavaVersion::new(7, 0, 40, 0)));
    }

    #[test]
    fn test_discover_nothing() {
        let runner = MockRunner::new();
        assert_eq!(Discovery::new(&runner).discover().unwrap(), Discovered::none());
    }

    #[test]
    fn test_unparseable_is_fatal() {
        let runner = MockRunner::new();
        runner.on(&["javac"], CommandOutput::success("javac 9-ea\n"));
        let err = Discovery::new(&runner).discover().unwrap_err();
        assert!(matches!(err, Error::Discovery(ref v) if v == "9-ea"));
    }
}
