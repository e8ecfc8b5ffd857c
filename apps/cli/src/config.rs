//! Layered settings: built-in defaults → `telephone.toml` (or `--config`) →
//! `TELEPHONE_*` environment → command-line flags (applied by the caller).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use telephone_migrate::MigrateOptions;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "telephone.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log: telephone_log::Config,
    pub migrate: MigrateOptions,
}

impl Settings {
    /// Load settings, reading `path` if given (it must exist) or
    /// `telephone.toml` if present.
    ///
    /// Nested keys come from `TELEPHONE_<SECTION>__<KEY>`, for example
    /// `TELEPHONE_MIGRATE__DRY_RUN=true`. The shorthands `RUST_LOG`,
    /// `TELEPHONE_LOG` and `TELEPHONE_LOG_FORMAT` set the log level and format.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: Option<&Path>) -> Figment {
        let file = match path {
            Some(path) => Toml::file_exact(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::raw().only(&["RUST_LOG"]).map(|_| "log.level".into()))
            .merge(
                Env::prefixed("TELEPHONE_")
                    .ignore(&["config", "log", "log_format"])
                    .split("__"),
            )
            .merge(Env::raw().only(&["TELEPHONE_LOG"]).map(|_| "log.level".into()))
            .merge(
                Env::raw()
                    .only(&["TELEPHONE_LOG_FORMAT"])
                    .map(|_| "log.format".into()),
            )
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use telephone_log::Format;

    use super::*;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            assert_eq!(Settings::load(None)?, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                [log]
                level = "debug"

                [migrate]
                extensions = ["rb", "rake"]
                "#,
            )?;

            let settings = Settings::load(None)?;
            assert_eq!(settings.log.level, "debug");
            assert_eq!(settings.migrate.extensions, vec!["rb", "rake"]);
            assert_eq!(settings.migrate.exclude, MigrateOptions::default().exclude);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[migrate]\ndry_run = false\n")?;
            jail.set_env("TELEPHONE_MIGRATE__DRY_RUN", "true");
            jail.set_env("TELEPHONE_LOG", "trace");
            jail.set_env("TELEPHONE_LOG_FORMAT", "json");

            let settings = Settings::load(Some(Path::new("custom.toml")))?;
            assert!(settings.migrate.dry_run);
            assert_eq!(settings.log.level, "trace");
            assert_eq!(settings.log.format, Format::Json);
            Ok(())
        });
    }

    #[test]
    fn telephone_log_beats_rust_log() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("RUST_LOG", "error");
            assert_eq!(Settings::load(None)?.log.level, "error");

            jail.set_env("TELEPHONE_LOG", "info");
            assert_eq!(Settings::load(None)?.log.level, "info");
            Ok(())
        });
    }

    #[test]
    fn explicit_config_must_exist() {
        Jail::expect_with(|_jail| {
            assert!(Settings::load(Some(Path::new("missing.toml"))).is_err());
            Ok(())
        });
    }
}
