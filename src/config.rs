//! Application configuration.
//!
//! The configuration is a JSON file, by default
//! `$XDG_CONFIG_HOME/bezier-ease/config.json`.  It defines named curves that
//! can be referred to on the command line alongside the CSS presets, and the
//! resolution of the printed sample table.
//!
//! # Example
//!
//! ```json
//! {
//!   "samples": 20,
//!   "curves": {
//!     "snappy": [0.2, 0.0, 0.0, 1.0],
//!     "bounce": "cubic-bezier(0.5, -0.5, 0.5, 1.5)",
//!     "soft": { "x1": 0.3, "y1": 0.1, "x2": 0.3, "y2": 1.0 }
//!   }
//! }
//! ```

use crate::bezier::CubicBezier;
use crate::timing::ParseCurveError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field is optional. A minimal `{}` file is valid and falls back to
/// the compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of intervals in the sample table printed when no inputs are
    /// given.  Must be at least 1.
    pub samples: usize,
    /// User-defined curves by name.  These shadow preset keywords.
    pub curves: BTreeMap<String, CubicBezier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: 10,
            curves: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        if config.samples == 0 {
            return Err(ConfigError(format!(
                "{}: samples must be at least 1",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Resolve a curve by name.
    ///
    /// User-defined curves are looked up first; anything else is parsed as
    /// a preset keyword or a `cubic-bezier(...)` expression.
    pub fn curve(&self, name: &str) -> Result<CubicBezier, ParseCurveError> {
        match self.curves.get(name) {
            Some(curve) => Ok(*curve),
            None => name.parse(),
        }
    }
}

/// The directory holding `config.json`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("bezier-ease")
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::CurveError;
    use crate::timing::TimingFunction;

    /// Write `contents` to a fresh file under the temp dir.
    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bezier-ease-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "samples": 20,
            "curves": {
                "snappy": [0.2, 0.0, 0.0, 1.0],
                "bounce": "cubic-bezier(0.5, -0.5, 0.5, 1.5)",
                "soft": { "x1": 0.3, "y1": 0.1, "x2": 0.3, "y2": 1.0 }
            }
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.samples, 20);
        assert_eq!(cfg.curves.len(), 3);
        assert_eq!(cfg.curves["snappy"].control_points(), [0.2, 0.0, 0.0, 1.0]);
        assert_eq!(cfg.curves["bounce"].control_points(), [0.5, -0.5, 0.5, 1.5]);
        assert_eq!(cfg.curves["soft"].control_points(), [0.3, 0.1, 0.3, 1.0]);
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        let defaults = Config::default();
        assert_eq!(cfg.samples, defaults.samples);
        assert!(cfg.curves.is_empty());
    }

    #[test]
    fn deserialize_partial() {
        let cfg: Config = serde_json::from_str(r#"{ "samples": 4 }"#).unwrap();
        assert_eq!(cfg.samples, 4);
        assert!(cfg.curves.is_empty());

        let cfg: Config = serde_json::from_str(r#"{ "curves": { "a": "ease" } }"#).unwrap();
        assert_eq!(cfg.samples, Config::default().samples);
        assert_eq!(cfg.curves["a"], TimingFunction::Ease.curve());
    }

    #[test]
    fn deserialize_rejects_invalid_curve() {
        let json = r#"{ "curves": { "bad": [1.5, 0.0, 0.5, 1.0] } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn curve_lookup_order() {
        let mut cfg = Config::default();
        let custom = CubicBezier::new(0.1, 0.9, 0.2, 1.0).unwrap();
        cfg.curves.insert("ease".into(), custom);
        cfg.curves.insert("mine".into(), custom);

        assert_eq!(cfg.curve("mine"), Ok(custom));
        assert_eq!(cfg.curve("ease"), Ok(custom));
        assert_eq!(cfg.curve("ease-in"), Ok(TimingFunction::EaseIn.curve()));
        assert_eq!(
            cfg.curve("cubic-bezier(0, 0, 0.5, 1)").map(|c| c.control_points()),
            Ok([0.0, 0.0, 0.5, 1.0])
        );
        assert!(matches!(cfg.curve("nope"), Err(ParseCurveError::Syntax(_))));
        assert_eq!(
            cfg.curve("cubic-bezier(0, 0, 5, 1)"),
            Err(ParseCurveError::Curve(CurveError::OutOfRange))
        );
    }

    #[test]
    fn load_from_file() {
        let path = temp_config(
            "load_from_file.json",
            r#"{ "samples": 5, "curves": { "soft": [0.3, 0.1, 0.3, 1.0] } }"#,
        );
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.samples, 5);
        assert!(cfg.curves.contains_key("soft"));
    }

    #[test]
    fn load_missing_file_fails() {
        let path = std::env::temp_dir().join("bezier-ease-test-does-not-exist.json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("config error: failed to read"), "{}", err);
    }

    #[test]
    fn load_rejects_bad_json_and_zero_samples() {
        let path = temp_config("bad_json.json", "{ not json");
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "{}", err);

        let path = temp_config("zero_samples.json", r#"{ "samples": 0 }"#);
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("samples must be at least 1"), "{}", err);
    }

    #[test]
    fn serialize_round_trip() {
        let mut cfg = Config::default();
        cfg.curves.insert("out".into(), TimingFunction::EaseOut.curve());
        let back: Config = serde_json::from_str(&serde_json::to_string(&cfg).unwrap()).unwrap();
        assert_eq!(back.samples, cfg.samples);
        assert_eq!(back.curves, cfg.curves);
    }
}
