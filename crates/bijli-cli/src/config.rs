//! Configuration management for bijli
//! The default file lives in ~/.bijli/config/bijli.toml

use anyhow::{anyhow, bail, Context, Result};
use bijli_core::{AnalysisProfile, Preset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides the ~/.bijli home directory.
pub const HOME_ENV: &str = "BIJLI_HOME";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BijliConfig {
    /// Profile selection
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Result presentation
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Custom profiles, selectable with `--profile <name>`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<AnalysisProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Built-in profile used when nothing else is selected
    #[serde(default)]
    pub preset: Preset,
    /// Custom profile used instead of `preset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Export every analyzed file here as `<stem>-duplicates.csv`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl BijliConfig {
    /// Pick the profile for a run. Command-line choices win over the file.
    pub fn resolve_profile(
        &self,
        preset: Option<Preset>,
        profile: Option<&str>,
    ) -> Result<AnalysisProfile> {
        let resolved = match (preset, profile.or(self.analysis.profile.as_deref())) {
            (Some(preset), _) => preset.profile(),
            (None, Some(name)) => self.named_profile(name)?,
            (None, None) => self.analysis.preset.profile(),
        };
        resolved
            .validate()
            .with_context(|| format!("checking profile '{}'", resolved.name))?;
        Ok(resolved)
    }

    fn named_profile(&self, name: &str) -> Result<AnalysisProfile> {
        if let Some(profile) = self.profiles.iter().find(|p| p.name == name) {
            return Ok(profile.clone());
        }
        name.parse::<Preset>()
            .map(Preset::profile)
            .map_err(|_| anyhow!("no profile named '{name}' in the configuration"))
    }

    pub fn log_level(&self) -> Option<tracing::Level> {
        self.logging.level.parse().ok()
    }
}

/// Home directory for bijli state (`$BIJLI_HOME`, else ~/.bijli)
pub fn bijli_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|h| h.join(".bijli"))
}

/// Location: ~/.bijli/config/bijli.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(bijli_home()?.join("config").join("bijli.toml"))
}

/// Load `explicit` (which must exist) or the default file (which may not).
pub fn load_config(explicit: Option<&Path>) -> Result<BijliConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("configuration file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = config_path()?;
            if !path.exists() {
                return Ok(BijliConfig::default());
            }
            path
        }
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

pub fn save_config(config: &BijliConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_select_grid_duration() {
        let config = BijliConfig::default();
        let profile = config.resolve_profile(None, None).unwrap();
        assert_eq!(profile.name, "grid-duration");
        assert_eq!(config.log_level(), Some(tracing::Level::INFO));
    }

    #[test]
    fn command_line_preset_wins() {
        let mut config = BijliConfig::default();
        config.analysis.preset = Preset::FullKey;
        let profile = config
            .resolve_profile(Some(Preset::GridFrequency), None)
            .unwrap();
        assert_eq!(profile.name, "grid-frequency");
        let profile = config.resolve_profile(None, None).unwrap();
        assert_eq!(profile.name, "full-key");
    }

    #[test]
    fn custom_profiles_load_from_toml() {
        let text = r#"
[analysis]
profile = "zone-duration"

[logging]
level = "debug"

[[profiles]]
name = "zone-duration"
schema = ["Feeding Grid", "Division", "Outage Reason", "Category", "Feeder", "Diff in mins", "Zone"]
group_key = ["Zone", "Diff in mins"]
projection = ["Zone", "Diff in mins", "count"]
"#;
        let config: BijliConfig = toml::from_str(text).unwrap();
        assert_eq!(config.log_level(), Some(tracing::Level::DEBUG));
        let profile = config.resolve_profile(None, None).unwrap();
        assert_eq!(profile.name, "zone-duration");
        let profile = config.resolve_profile(None, Some("full-key")).unwrap();
        assert_eq!(profile.name, "full-key");
        assert!(config.resolve_profile(None, Some("missing")).is_err());
    }

    #[test]
    fn invalid_custom_profile_is_rejected() {
        let text = r#"
[[profiles]]
name = "broken"
group_key = []
projection = ["count"]
"#;
        let config: BijliConfig = toml::from_str(text).unwrap();
        assert!(config.resolve_profile(None, Some("broken")).is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("bijli.toml");
        let mut config = BijliConfig::default();
        config.output.format = OutputFormat::Csv;
        config.profiles.push(Preset::GridFrequency.profile());
        save_config(&config, &path).unwrap();

        let loaded = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded.output.format, OutputFormat::Csv);
        assert_eq!(loaded.profiles, config.profiles);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("nope.toml").as_path())).is_err());
    }
}
