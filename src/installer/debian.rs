//! Debian-family flow: packaged installers from third-party APT sources.
//!
//! The development kit comes from a PPA whose installer package downloads
//! the vendor media itself; the runtime comes from a plain APT source with
//! its own signing key.

use super::{HostContext, JavaInstaller};
use crate::environment::EnvironmentRegistrar;
use crate::error::{Error, Result};
use javakit::version::SUPPORTED_MAJORS;
use javakit::{JavaVersion, Variant};
use pkgkit::apt::{AptKey, AptRepository, SourcesConfig};
use pkgkit::{AptBackend, Backend, DebconfSelection, Family, RepoSpec};
use std::fs;
use std::path::PathBuf;

const JDK_PPA: &str = "webupd8team/java";

const LICENSE_QUESTION: &str = "shared/accepted-oracle-license-v1-1";

const JRE_LIST_FILE: &str = "duinsoft.list";
const JRE_SOURCE_LINE: &str = "deb http://www.duinsoft.nl/pkg debs all";
const JRE_KEY: &str = "5CB26B26";
const JRE_PACKAGE: &str = "update-sun-jre";

/// Only this major is published as a runtime package.
const JRE_MAJOR: u32 = 7;

fn jdk_package(major: u32) -> String {
    format!("oracle-java{major}-installer")
}

pub struct DebianInstaller<'a> {
    apt: AptBackend<'a>,
    repositories: AptRepository<'a>,
    keys: AptKey<'a>,
    sources: SourcesConfig,
    install_root: PathBuf,
    registrar: EnvironmentRegistrar<'a>,
}

impl<'a> DebianInstaller<'a> {
    pub fn new(ctx: &HostContext<'a>) -> Self {
        let debian = &ctx.settings.debian;
        let sources = SourcesConfig {
            sources_list: debian.sources_list.clone(),
            sources_dir: debian.sources_dir.clone(),
        };
        let repositories = AptRepository::new(AptBackend::new(ctx.runner), sources.clone())
            .assume_yes(ctx.distribution.add_apt_repository_needs_yes())
            .helper_package(&debian.helper_package);

        Self {
            apt: AptBackend::new(ctx.runner),
            repositories,
            keys: AptKey::new(ctx.runner, &debian.keyserver),
            sources,
            install_root: debian.install_root.clone(),
            registrar: ctx.registrar(&debian.install_root),
        }
    }

    fn ppa() -> RepoSpec {
        RepoSpec::Ppa(JDK_PPA.to_string())
    }

    fn list_file(&self) -> PathBuf {
        self.sources.sources_dir.join(JRE_LIST_FILE)
    }

    fn install_jdk(&self, major: u32) -> Result<bool> {
        let mut changed = self.repositories.install(&Self::ppa())?;

        let package = jdk_package(major);
        if !self.apt.installed(&package)? {
            self.apt.preseed(&DebconfSelection::new(
                &package,
                LICENSE_QUESTION,
                "select",
                "true",
            ))?;
        }
        changed |= self.apt.install(&package)?;
        Ok(changed)
    }

    fn install_jre(&self) -> Result<bool> {
        let mut sources_changed = self.add_list_file()?;
        sources_changed |= self.keys.install(JRE_KEY)?;
        if sources_changed {
            self.apt.update()?;
        }
        Ok(self.apt.install(JRE_PACKAGE)? || sources_changed)
    }

    fn add_list_file(&self) -> Result<bool> {
        let spec = RepoSpec::Line(JRE_SOURCE_LINE.to_string());
        if self.repositories.installed(&spec)? {
            return Ok(false);
        }
        let path = self.list_file();
        log::info!("Writing {}", path.display());
        fs::create_dir_all(&self.sources.sources_dir)
            .map_err(|e| Error::io(&self.sources.sources_dir, e))?;
        fs::write(&path, format!("{JRE_SOURCE_LINE}\n")).map_err(|e| Error::io(&path, e))?;
        Ok(true)
    }

    fn remove_list_file(&self) -> Result<bool> {
        let path = self.list_file();
        if !path.exists() {
            return Ok(false);
        }
        log::info!("Removing {}", path.display());
        fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        Ok(true)
    }
}

impl JavaInstaller for DebianInstaller<'_> {
    fn family(&self) -> Family {
        Family::Debian
    }

    fn supports(&self, variant: Variant, version: &JavaVersion) -> bool {
        JavaVersion::latest(version.major).is_some()
            && (variant == Variant::Jdk || version.major == JRE_MAJOR)
    }

    fn install(&self, variant: Variant, version: &JavaVersion) -> Result<bool> {
        let mut changed = match variant {
            Variant::Jdk => self.install_jdk(version.major)?,
            Variant::Jre => self.install_jre()?,
        };
        changed |= self.registrar.install(&self.java_home(variant, version))?;
        Ok(changed)
    }

    fn uninstall(&self) -> Result<bool> {
        let mut changed = false;
        for &major in SUPPORTED_MAJORS {
            changed |= self.apt.uninstall(&jdk_package(major))?;
        }
        changed |= self.repositories.uninstall(&Self::ppa())?;

        changed |= self.apt.uninstall(JRE_PACKAGE)?;
        let mut sources_changed = self.remove_list_file()?;
        sources_changed |= self.keys.uninstall(JRE_KEY)?;
        if sources_changed {
            self.apt.update()?;
        }
        changed |= sources_changed;

        changed |= self.registrar.uninstall(None)?;
        Ok(changed)
    }

    fn java_home(&self, variant: Variant, version: &JavaVersion) -> PathBuf {
        match variant {
            Variant::Jdk => self
                .install_root
                .join(format!("java-{}-oracle", version.major)),
            Variant::Jre => {
                let latest = JavaVersion::latest(version.major).unwrap_or(*version);
                self.install_root
                    .join(format!("jre{}", latest.format_version()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use hostexec::{CommandOutput, MockRunner};
    use javakit::MockDownloader;
    use pkgkit::Distribution;
    use tempfile::TempDir;

    const V7: JavaVersion = JavaVersion::new(7, 0, 40, 43);

    struct Host {
        tmp: TempDir,
        runner: MockRunner,
        downloader: MockDownloader,
        settings: Settings,
        distribution: Distribution,
    }

    impl Host {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let mut settings = Settings::default();
            settings.env_file = tmp.path().join("environment");
            settings.debian.install_root = tmp.path().join("jvm");
            settings.debian.sources_list = tmp.path().join("sources.list");
            settings.debian.sources_dir = tmp.path().join("sources.list.d");
            fs::create_dir_all(&settings.debian.sources_dir).unwrap();

            Self {
                tmp,
                runner: MockRunner::new(),
                downloader: MockDownloader::failing(),
                settings,
                distribution: Distribution::parse("ID=ubuntu\nVERSION_ID=\"12.04\"\n").unwrap(),
            }
        }

        fn installer(&self) -> DebianInstaller<'_> {
            DebianInstaller::new(&HostContext {
                runner: &self.runner,
                downloader: &self.downloader,
                settings: &self.settings,
                distribution: &self.distribution,
                arch: None,
            })
        }

        /// Catch-all answers. The first matching rule wins, so register these last.
        fn fallbacks(&self) {
            self.runner.on(&["update-alternatives", "--display"], CommandOutput::failure(2, ""));
            self.runner.on(&["apt-key", "list"], CommandOutput::success(""));
        }

        fn no_packages(&self) {
            self.runner.on(&["dpkg-query"], CommandOutput::failure(1, ""));
        }

        fn mutations(&self) -> Vec<String> {
            self.runner
                .call_lines()
                .into_iter()
                .filter(|l| {
                    (l.starts_with("apt-get")
                        && (l.ends_with(" update") || l.contains(" install ") || l.contains(" remove ")))
                        || l.starts_with("add-apt-repository")
                        || l.starts_with("apt-key adv")
                        || l.starts_with("apt-key del")
                })
                .collect()
        }
    }

    #[test]
    fn test_supports() {
        let host = Host::new();
        let installer = host.installer();
        assert!(installer.supports(Variant::Jdk, &V7));
        assert!(installer.supports(Variant::Jre, &V7));
        assert!(!installer.supports(Variant::Jdk, &JavaVersion::new(6, 0, 45, 0)));
    }

    #[test]
    fn test_java_home() {
        let host = Host::new();
        let installer = host.installer();
        let root = host.tmp.path().join("jvm");
        assert_eq!(installer.java_home(Variant::Jdk, &V7), root.join("java-7-oracle"));
        assert_eq!(installer.java_home(Variant::Jre, &V7), root.join("jre1.7.0_40"));
        assert_eq!(
            installer.java_home(Variant::Jre, &JavaVersion::new(7, 0, 25, 0)),
            root.join("jre1.7.0_40")
        );
    }

    #[test]
    fn test_java_home_for_runtime_without_known_build() {
        let host = Host::new();
        let jre6 = JavaVersion::new(6, 0, 45, 0);
        assert_eq!(
            host.installer().java_home(Variant::Jre, &jre6),
            host.tmp.path().join("jvm").join("jre1.6.0_45")
        );
    }

    #[test]
    fn test_install_jdk_adds_ppa_and_preseeds() {
        let host = Host::new();
        host.no_packages();
        host.runner.on(&["add-apt-repository"], CommandOutput::success(""));
        host.runner.on(&["apt-get"], CommandOutput::success(""));
        host.runner.on(&["debconf-set-selections"], CommandOutput::success(""));
        host.fallbacks();

        assert!(host.installer().install(Variant::Jdk, &V7).unwrap());

        let calls = host.runner.calls();
        let preseed = calls
            .iter()
            .find(|c| c.program == "debconf-set-selections")
            .unwrap();
        assert_eq!(
            preseed.stdin.as_deref(),
            Some(&b"oracle-java7-installer shared/accepted-oracle-license-v1-1 select true\n"[..])
        );
        assert_eq!(host.runner.count(&["add-apt-repository", "-y", "ppa:webupd8team/java"]), 1);
        assert!(
            host.mutations()
                .iter()
                .any(|l| l.ends_with("install oracle-java7-installer"))
        );

        let env = fs::read_to_string(host.tmp.path().join("environment")).unwrap();
        assert!(env.contains("java-7-oracle"));
    }

    #[test]
    fn test_install_jre_writes_source_and_key_once() {
        let host = Host::new();
        host.no_packages();
        host.runner.on(&["apt-key", "adv"], CommandOutput::success(""));
        host.runner.on(&["apt-get"], CommandOutput::success(""));
        host.fallbacks();

        assert!(host.installer().install(Variant::Jre, &V7).unwrap());

        let list = host.tmp.path().join("sources.list.d").join("duinsoft.list");
        assert_eq!(
            fs::read_to_string(list).unwrap(),
            "deb http://www.duinsoft.nl/pkg debs all\n"
        );
        assert_eq!(
            host.runner
                .count(&["apt-key", "adv", "--keyserver", "keys.gnupg.net", "--recv-keys", "5CB26B26"]),
            1
        );
        assert_eq!(
            host.mutations().iter().filter(|l| l.ends_with("update")).count(),
            1
        );
    }

    #[test]
    fn test_install_jre_skips_update_when_sources_present() {
        let host = Host::new();
        fs::write(
            host.tmp.path().join("sources.list.d").join("duinsoft.list"),
            "deb http://www.duinsoft.nl/pkg debs all\n",
        )
        .unwrap();
        host.runner.on(
            &["apt-key", "list"],
            CommandOutput::success("pub   1024D/5CB26B26 2009-01-02\n"),
        );
        host.runner.on(
            &["dpkg-query"],
            CommandOutput::success("update-sun-jre\t1.6\tinstall ok installed\n"),
        );
        host.fallbacks();

        // Only the environment file changes.
        assert!(host.installer().install(Variant::Jre, &V7).unwrap());
        assert!(host.mutations().is_empty());
        assert!(!host.installer().install(Variant::Jre, &V7).unwrap());
    }

    #[test]
    fn test_uninstall_nothing_installed() {
        let host = Host::new();
        host.no_packages();
        host.fallbacks();

        assert!(!host.installer().uninstall().unwrap());
        assert!(host.mutations().is_empty());
    }

    #[test]
    fn test_uninstall_removes_everything() {
        let host = Host::new();
        host.runner.on(
            &["dpkg-query", "-W", "-f", "${Package}\\t${Version}\\t${Status}\\n", "oracle-java7-installer"],
            CommandOutput::success("oracle-java7-installer\t7u40\tinstall ok installed\n"),
        );
        host.runner.on(&["dpkg-query"], CommandOutput::failure(1, ""));
        host.runner.on(&["apt-get"], CommandOutput::success(""));
        host.runner.on(&["add-apt-repository"], CommandOutput::success(""));
        host.runner.on(
            &["apt-key", "list"],
            CommandOutput::success("pub   1024D/5CB26B26 2009-01-02\n"),
        );
        host.runner.on(&["apt-key", "del"], CommandOutput::success(""));
        host.fallbacks();
        fs::write(
            host.tmp.path().join("sources.list"),
            "deb http://ppa.launchpad.net/webupd8team/java/ubuntu precise main\n",
        )
        .unwrap();
        let list = host.tmp.path().join("sources.list.d").join("duinsoft.list");
        fs::write(&list, "deb http://www.duinsoft.nl/pkg debs all\n").unwrap();
        fs::write(
            host.tmp.path().join("environment"),
            "JAVA_HOME=\"/usr/lib/jvm/java-7-oracle\"\n",
        )
        .unwrap();

        assert!(host.installer().uninstall().unwrap());

        assert!(!list.exists());
        assert_eq!(fs::read_to_string(host.tmp.path().join("environment")).unwrap(), "");
        assert_eq!(
            host.runner
                .count(&["add-apt-repository", "-y", "--remove", "ppa:webupd8team/java"]),
            1
        );
        assert_eq!(host.runner.count(&["apt-key", "del", "5CB26B26"]), 1);
        assert!(
            host.mutations()
                .iter()
                .any(|l| l.ends_with("remove oracle-java7-installer"))
        );
    }
}
