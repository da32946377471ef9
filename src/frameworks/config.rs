use crate::domain::CollisionPairing;
use crate::use_cases::EngineConfig;
use std::{env, fmt, str::FromStr, time::Duration};

// Runtime constants and env overrides (not gameplay tuning).

pub const DEFAULT_FPS: f64 = 60.0;
pub const DEFAULT_DEMO_DURATION: Duration = Duration::from_secs(10);
pub const DEFAULT_BOARD_WIDTH: f64 = 1280.0;
pub const DEFAULT_BOARD_HEIGHT: f64 = 720.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => write!(f, "invalid {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything the headless demo needs to run.
#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    pub engine: EngineConfig,
    pub duration: Duration,
    pub board_width: f64,
    pub board_height: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                fps: DEFAULT_FPS,
                pairing: CollisionPairing::Ordered,
            },
            duration: DEFAULT_DEMO_DURATION,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a key to its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            engine: EngineConfig {
                fps: env_or(&lookup, "ENGINE_FPS", DEFAULT_FPS)?,
                pairing: collision_pairing(&lookup)?,
            },
            duration: Duration::from_secs(env_or(
                &lookup,
                "DEMO_DURATION_SECS",
                defaults.duration.as_secs(),
            )?),
            board_width: env_or(&lookup, "BOARD_WIDTH", defaults.board_width)?,
            board_height: env_or(&lookup, "BOARD_HEIGHT", defaults.board_height)?,
        })
    }
}

fn collision_pairing(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<CollisionPairing, ConfigError> {
    match lookup("COLLISION_PAIRING") {
        None => Ok(CollisionPairing::default()),
        Some(value) => parse_pairing(&value).ok_or(ConfigError::InvalidValue {
            key: "COLLISION_PAIRING",
            value,
        }),
    }
}

fn parse_pairing(value: &str) -> Option<CollisionPairing> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ordered" => Some(CollisionPairing::Ordered),
        "unordered" => Some(CollisionPairing::Unordered),
        _ => None,
    }
}

// Unset means default; set but unparsable is an error.
fn env_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn pairing_names_are_case_insensitive() {
        assert_eq!(parse_pairing("Ordered"), Some(CollisionPairing::Ordered));
        assert_eq!(parse_pairing(" UNORDERED "), Some(CollisionPairing::Unordered));
        assert_eq!(parse_pairing("both"), None);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn unset_key_falls_back_to_default() {
        let fps: f64 = env_or(&vars(&[]), "ENGINE_FPS", 42.0).expect("default");
        assert_eq!(fps, 42.0);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = DemoConfig::from_lookup(vars(&[
            ("ENGINE_FPS", " 30 "),
            ("COLLISION_PAIRING", "unordered"),
            ("DEMO_DURATION_SECS", "2"),
            ("BOARD_WIDTH", "800"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.engine.fps, 30.0);
        assert_eq!(config.engine.pairing, CollisionPairing::Unordered);
        assert_eq!(config.duration, Duration::from_secs(2));
        assert_eq!(config.board_width, 800.0);
        assert_eq!(config.board_height, DEFAULT_BOARD_HEIGHT);
    }

    #[test]
    fn unparsable_fps_names_the_key() {
        let err = DemoConfig::from_lookup(vars(&[("ENGINE_FPS", "abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "ENGINE_FPS",
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = DemoConfig::from_lookup(vars(&[("DEMO_DURATION_SECS", "-1")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "DEMO_DURATION_SECS",
                value: "-1".to_string(),
            }
        );
    }

    #[test]
    fn unknown_pairing_is_rejected() {
        let err = DemoConfig::from_lookup(vars(&[("COLLISION_PAIRING", "both")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "COLLISION_PAIRING", .. }));
    }

    #[test]
    fn defaults_run_sixty_ticks_per_second_for_ten_seconds() {
        let config = DemoConfig::default();
        assert_eq!(config.engine.fps, 60.0);
        assert_eq!(config.engine.pairing, CollisionPairing::Ordered);
        assert_eq!(config.duration, Duration::from_secs(10));
    }
}
