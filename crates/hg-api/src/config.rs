//! # Service Configuration
//!
//! Loaded once at startup from the environment. Every value has a default
//! so a bare `hg-api` runs the shipped game balance against the mock ledger.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PORT` | `8080` |
//! | `HG_CALL_TIMEOUT_SECS` | `10` |
//! | `HG_MINT_COST_FIRST` | `0.0001` |
//! | `HG_MINT_COST_SUBSEQUENT` | `0.001` |
//! | `HG_LIFECYCLE_CONFIG` | unset (built-in table) |
//! | `HG_GAIN_FEED`, `HG_GAIN_PET`, `HG_GAIN_CLEAN` | `10` |
//! | `HG_THRESHOLD_ADULT` / `_BREEDING` / `_MATRIARCH` | `30,30,30` / `100,100,100` / `200,200,200` |
//! | `HG_POPULATION_SEED` | all zero |
//!
//! Environment overrides are applied on top of the YAML file, and the
//! result is validated before the service starts.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use hg_core::{EthAmount, Species, SPECIES_COUNT};
use hg_state::{LifecycleConfig, StatThreshold};

/// 0.0001 ETH.
const DEFAULT_FIRST_MINT_WEI: u128 = 100_000_000_000_000;
/// 0.001 ETH.
const DEFAULT_SUBSEQUENT_MINT_WEI: u128 = 1_000_000_000_000_000;

const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Lifecycle(#[from] hg_state::ConfigError),
}

/// Mint price schedule: an owner's first pet is cheaper than the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MintCostSchedule {
    pub first: EthAmount,
    pub subsequent: EthAmount,
}

impl Default for MintCostSchedule {
    fn default() -> Self {
        Self {
            first: EthAmount::from_wei(DEFAULT_FIRST_MINT_WEI),
            subsequent: EthAmount::from_wei(DEFAULT_SUBSEQUENT_MINT_WEI),
        }
    }
}

impl MintCostSchedule {
    /// Cost of the mint that would take inventory position `sequence_index`.
    pub fn quote(&self, sequence_index: usize) -> EthAmount {
        if sequence_index == 0 {
            self.first
        } else {
            self.subsequent
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Upper bound on every ledger and narrative call.
    pub call_timeout: Duration,
    pub mint_costs: MintCostSchedule,
    pub lifecycle: LifecycleConfig,
    /// Starting population per species, indexed by [`Species::index`].
    pub population_seed: [u64; SPECIES_COUNT],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            mint_costs: MintCostSchedule::default(),
            lifecycle: LifecycleConfig::default(),
            population_seed: [0; SPECIES_COUNT],
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of
    /// an environment variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PORT") {
            config.port = parse_number("PORT", &raw)?;
        }
        if let Some(raw) = get("HG_CALL_TIMEOUT_SECS") {
            let secs: u64 = parse_number("HG_CALL_TIMEOUT_SECS", &raw)?;
            if secs == 0 {
                return Err(ConfigError::Env {
                    var: "HG_CALL_TIMEOUT_SECS",
                    reason: "must be positive".into(),
                });
            }
            config.call_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = get("HG_MINT_COST_FIRST") {
            config.mint_costs.first = parse_amount("HG_MINT_COST_FIRST", &raw)?;
        }
        if let Some(raw) = get("HG_MINT_COST_SUBSEQUENT") {
            config.mint_costs.subsequent = parse_amount("HG_MINT_COST_SUBSEQUENT", &raw)?;
        }

        if let Some(path) = get("HG_LIFECYCLE_CONFIG") {
            let path = PathBuf::from(path);
            let yaml = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Io { path, source })?;
            config.lifecycle = LifecycleConfig::from_yaml_str(&yaml)?;
        }
        let gains = &mut config.lifecycle.gains;
        for (var, slot) in [
            ("HG_GAIN_FEED", &mut gains.feed),
            ("HG_GAIN_PET", &mut gains.pet),
            ("HG_GAIN_CLEAN", &mut gains.clean),
        ] {
            if let Some(raw) = get(var) {
                *slot = parse_number(var, &raw)?;
            }
        }
        let thresholds = &mut config.lifecycle.thresholds;
        for (var, slot) in [
            ("HG_THRESHOLD_ADULT", &mut thresholds.adult),
            ("HG_THRESHOLD_BREEDING", &mut thresholds.breeding),
            ("HG_THRESHOLD_MATRIARCH", &mut thresholds.matriarch),
        ] {
            if let Some(raw) = get(var) {
                *slot = StatThreshold::parse_triple(&raw)?;
            }
        }
        config.lifecycle.validate()?;

        if let Some(raw) = get("HG_POPULATION_SEED") {
            config.population_seed = parse_population_seed(&raw)?;
        }

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Env {
        var,
        reason: format!("{raw:?} is not a valid number"),
    })
}

fn parse_amount(var: &'static str, raw: &str) -> Result<EthAmount, ConfigError> {
    EthAmount::parse(raw.trim()).map_err(|e| ConfigError::Env {
        var,
        reason: e.to_string(),
    })
}

/// Parse `"Dodo=142,Mammoth=89"`. Species not named start at zero.
pub fn parse_population_seed(raw: &str) -> Result<[u64; SPECIES_COUNT], ConfigError> {
    let invalid = |reason: String| ConfigError::Env {
        var: "HG_POPULATION_SEED",
        reason,
    };
    let mut seed = [0; SPECIES_COUNT];
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, count) = entry
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected species=count, got {entry:?}")))?;
        let species: Species = name.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        seed[species.index()] = count
            .trim()
            .parse()
            .map_err(|_| invalid(format!("bad count for {species}: {count:?}")))?;
    }
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| env.get(var).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.call_timeout, Duration::from_secs(10));
        assert_eq!(config.mint_costs.first.to_string(), "0.0001");
        assert_eq!(config.mint_costs.subsequent.to_string(), "0.001");
        assert_eq!(config.lifecycle, LifecycleConfig::default());
        assert_eq!(config.population_seed, [0; SPECIES_COUNT]);
    }

    #[test]
    fn quote_charges_first_mint_less() {
        let costs = MintCostSchedule::default();
        assert_eq!(costs.quote(0), costs.first);
        assert_eq!(costs.quote(1), costs.subsequent);
        assert_eq!(costs.quote(7), costs.subsequent);
    }

    #[test]
    fn env_overrides_gains_and_thresholds() {
        let config = load(&[
            ("HG_GAIN_FEED", "25"),
            ("HG_THRESHOLD_ADULT", "20,20,20"),
            ("HG_MINT_COST_FIRST", "0"),
        ])
        .unwrap();
        assert_eq!(config.lifecycle.gains.feed, 25);
        assert_eq!(config.lifecycle.gains.pet, 10);
        assert_eq!(config.lifecycle.thresholds.adult, StatThreshold::uniform(20));
        assert!(config.mint_costs.first.is_zero());
    }

    #[test]
    fn invalid_lifecycle_is_rejected_at_load() {
        let err = load(&[("HG_THRESHOLD_MATRIARCH", "201,200,200")]).unwrap_err();
        assert!(matches!(err, ConfigError::Lifecycle(_)));
        let err = load(&[("HG_GAIN_PET", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Lifecycle(_)));
    }

    #[test]
    fn bad_numbers_name_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(load(&[("HG_CALL_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("HG_MINT_COST_SUBSEQUENT", "-1")]).is_err());
    }

    #[test]
    fn lifecycle_file_then_env_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gains:\n  clean: 40\nthresholds:\n  adult: {{ hunger: 40, intimacy: 40, health: 40 }}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = load(&[("HG_LIFECYCLE_CONFIG", &path), ("HG_GAIN_CLEAN", "50")]).unwrap();
        assert_eq!(config.lifecycle.gains.clean, 50);
        assert_eq!(config.lifecycle.thresholds.adult, StatThreshold::uniform(40));
        assert_eq!(config.lifecycle.thresholds.breeding, StatThreshold::uniform(100));
    }

    #[test]
    fn missing_lifecycle_file_is_io_error() {
        let err = load(&[("HG_LIFECYCLE_CONFIG", "/nonexistent/hg-lifecycle.yaml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn population_seed_parses_named_species() {
        let seed = parse_population_seed("Dodo=142, Mammoth=89,irish-elk=12").unwrap();
        assert_eq!(seed[Species::Dodo.index()], 142);
        assert_eq!(seed[Species::Mammoth.index()], 89);
        assert_eq!(seed[Species::Thylacine.index()], 0);
        assert_eq!(seed[Species::IrishElk.index()], 12);
        assert!(parse_population_seed("Dodo").is_err());
        assert!(parse_population_seed("Moa=3").is_err());
        assert!(parse_population_seed("Dodo=x").is_err());
    }
}
