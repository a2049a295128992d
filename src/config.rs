use std::fs;

use log::LevelFilter;
use serde::Deserialize;

use crate::errors::ConfigError;

/// Which `Scheduler` implementation the hub should use.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerPolicy {
    BruteForce,
    Lp,
    NoDelay,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HubParameters {
    pub lookahead: usize,
    pub scheduler: SchedulerPolicy,
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub solver_timeout_ms: Option<u64>,
    #[serde(default)]
    pub seed_on_start: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub hub: HubParameters,
    pub general: General,
}

/// Loads and parses the TOML configuration file.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_config() {
        let toml = r#"
            [hub]
            lookahead = 20
            scheduler = "lp"
            tick_interval_ms = 1000
            solver_timeout_ms = 5000

            [general]
            log_path = "powerhub.log"
            log_level = "info"
            log_to_stdout = true
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.hub.lookahead, 20);
        assert_eq!(config.hub.scheduler, SchedulerPolicy::Lp);
        assert_eq!(config.hub.solver_timeout_ms, Some(5000));
        assert!(config.general.log_to_stdout);
    }

    #[test]
    fn seed_on_start_defaults_to_false() {
        let toml = r#"
            [hub]
            lookahead = 10
            scheduler = "no_delay"
            tick_interval_ms = 1000

            [general]
            log_path = "powerhub.log"
            log_level = "warn"
            log_to_stdout = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.hub.seed_on_start);
    }

    #[test]
    fn load_config_surfaces_io_error_for_missing_file() {
        assert!(load_config("/nonexistent/powerhub.toml").is_err());
    }
}
