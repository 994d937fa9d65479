//! Configuration of the proximity engine.
//!
//! A process normally builds one [`ProximityConfig`] at startup, either
//! deserialized from its own settings file or read from the environment
//! with [`ProximityConfig::from_env`], and installs it with
//! [`init_config`]. Code that doesn't care falls back to the defaults
//! through [`config`].

use std::env;

use once_cell::sync::OnceCell;
use serde::Deserialize;

use super::haversine::DistanceUnit;

/// Environment variable selecting the unit, `km` or `mi`.
pub const ENV_UNIT: &str = "PROXIMITY_UNIT";
/// Environment variable for the default search radius.
pub const ENV_DEFAULT_RADIUS: &str = "PROXIMITY_DEFAULT_RADIUS";
/// Environment variable for the average ambulance speed in km/h.
pub const ENV_AVG_SPEED_KMH: &str = "PROXIMITY_AVG_SPEED_KMH";

/// Radius used when a caller doesn't pass one, in the configured unit.
pub const DEFAULT_RADIUS: f64 = 10.0;
/// Average urban ambulance speed.
pub const DEFAULT_AVG_SPEED_KMH: f64 = 40.0;

static CONFIG: OnceCell<ProximityConfig> = OnceCell::new();

/// Errors raised while building or installing a configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown distance unit {0:?}, expected \"km\" or \"mi\"")]
    InvalidUnit(String),
    #[error("Invalid value {value:?} for {key}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("Configuration already initialized")]
    AlreadyInitialized,
}

/// Settings shared by every query of a session.
///
/// Deserialized values go through [`ProximityConfig::validate`], the
/// same checks the environment loader applies.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct ProximityConfig {
    /// Unit for radii and reported distances.
    pub unit: DistanceUnit,
    /// Radius for nearby searches that don't specify one.
    pub default_radius: f64,
    /// Used to turn a distance into an arrival estimate.
    pub average_speed_kmh: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        ProximityConfig {
            unit: DistanceUnit::Kilometers,
            default_radius: DEFAULT_RADIUS,
            average_speed_kmh: DEFAULT_AVG_SPEED_KMH,
        }
    }
}

/// Unchecked form of [`ProximityConfig`] as it appears in settings files.
#[derive(Deserialize)]
#[serde(default)]
struct RawConfig {
    unit: DistanceUnit,
    default_radius: f64,
    average_speed_kmh: f64,
}

impl Default for RawConfig {
    fn default() -> Self {
        let defaults = ProximityConfig::default();
        RawConfig {
            unit: defaults.unit,
            default_radius: defaults.default_radius,
            average_speed_kmh: defaults.average_speed_kmh,
        }
    }
}

impl TryFrom<RawConfig> for ProximityConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let config = ProximityConfig {
            unit: raw.unit,
            default_radius: raw.default_radius,
            average_speed_kmh: raw.average_speed_kmh,
        };
        config.validate()?;
        Ok(config)
    }
}

impl ProximityConfig {
    /// Reads the configuration from `PROXIMITY_*` environment variables.
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ProximityConfig::default();
        if let Some(unit) = lookup(ENV_UNIT) {
            config.unit = parse_unit(&unit)?;
        }
        if let Some(radius) = lookup(ENV_DEFAULT_RADIUS) {
            config.default_radius = parse_number(ENV_DEFAULT_RADIUS, &radius)?;
        }
        if let Some(speed) = lookup(ENV_AVG_SPEED_KMH) {
            config.average_speed_kmh = parse_number(ENV_AVG_SPEED_KMH, &speed)?;
        }
        config.validate()?;
        debug!("config: {:?}", config);
        Ok(config)
    }

    /// Checks that the radius is finite and non-negative and the speed
    /// finite and positive. A zero speed would make every arrival
    /// estimate infinite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_radius.is_finite() || self.default_radius < 0.0 {
            return Err(ConfigError::InvalidNumber {
                key: "default_radius",
                value: self.default_radius.to_string(),
            });
        }
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(ConfigError::InvalidNumber {
                key: "average_speed_kmh",
                value: self.average_speed_kmh.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_unit(value: &str) -> Result<DistanceUnit, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
        "mi" | "miles" => Ok(DistanceUnit::Miles),
        _ => Err(ConfigError::InvalidUnit(value.to_string())),
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

/// Installs the process-wide configuration. Can only be done once.
pub fn init_config(config: ProximityConfig) -> Result<(), ConfigError> {
    info!("Initializing proximity config: {:?}", config);
    config.validate()?;
    CONFIG.set(config).map_err(|_| {
        warn!("Proximity config already initialized");
        ConfigError::AlreadyInitialized
    })
}

/// Returns the installed configuration, or the defaults if
/// [`init_config`] was never called.
pub fn config() -> &'static ProximityConfig {
    CONFIG.get_or_init(ProximityConfig::default)
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ProximityConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ProximityConfig::default());
        assert_eq!(config.unit, DistanceUnit::Kilometers);
        assert_eq!(config.default_radius, 10.0);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ProximityConfig::from_lookup(lookup(&[
            (ENV_UNIT, "MI"),
            (ENV_DEFAULT_RADIUS, "6.5"),
            (ENV_AVG_SPEED_KMH, "55"),
        ]))
        .unwrap();
        assert_eq!(config.unit, DistanceUnit::Miles);
        assert_eq!(config.default_radius, 6.5);
        assert_eq!(config.average_speed_kmh, 55.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            ProximityConfig::from_lookup(lookup(&[(ENV_UNIT, "leagues")])),
            Err(ConfigError::InvalidUnit("leagues".to_string()))
        );
        assert!(matches!(
            ProximityConfig::from_lookup(lookup(&[(ENV_DEFAULT_RADIUS, "-1")])),
            Err(ConfigError::InvalidNumber { key: "default_radius", .. })
        ));
        assert!(matches!(
            ProximityConfig::from_lookup(lookup(&[(ENV_DEFAULT_RADIUS, "far")])),
            Err(ConfigError::InvalidNumber { key: ENV_DEFAULT_RADIUS, .. })
        ));
        assert!(ProximityConfig::from_lookup(lookup(&[(ENV_AVG_SPEED_KMH, "0")])).is_err());
        assert!(ProximityConfig::from_lookup(lookup(&[(ENV_AVG_SPEED_KMH, "inf")])).is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ProximityConfig = serde_json::from_str(r#"{ "unit": "mi" }"#).unwrap();
        assert_eq!(config.unit, DistanceUnit::Miles);
        assert_eq!(config.average_speed_kmh, DEFAULT_AVG_SPEED_KMH);
    }

    #[test]
    fn test_deserialize_applies_same_checks() {
        let negative = serde_json::from_str::<ProximityConfig>(
            r#"{ "default_radius": -5.0, "average_speed_kmh": -40.0 }"#,
        );
        assert!(negative.is_err());

        let stopped = serde_json::from_str::<ProximityConfig>(r#"{ "average_speed_kmh": 0.0 }"#);
        assert!(stopped.is_err());

        let zero_radius: ProximityConfig =
            serde_json::from_str(r#"{ "default_radius": 0.0 }"#).unwrap();
        assert_eq!(zero_radius.default_radius, 0.0);
    }

    #[test]
    fn test_validate_struct_literal() {
        let config = ProximityConfig {
            average_speed_kmh: 0.0,
            ..ProximityConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidNumber {
                key: "average_speed_kmh",
                value: "0".to_string(),
            })
        );
        assert_eq!(init_config(config), Err(config.validate().unwrap_err()));
        assert!(ProximityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_global_config_is_write_once() {
        // Either this call or an earlier `config()` in the same process
        // settles the value; a second install must always fail.
        let _ = init_config(ProximityConfig::default());
        assert_eq!(
            init_config(ProximityConfig::default()),
            Err(ConfigError::AlreadyInitialized)
        );
        assert_eq!(config().unit, DistanceUnit::Kilometers);
    }
}
