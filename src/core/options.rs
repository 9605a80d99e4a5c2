//! Host configuration snapshot
//!
//! The controlling application launches the host with four registration
//! arguments (`-port`, `-pluginUUID`, `-registerEvent`, `-info`); the same
//! values can also come from a TOML file. The resulting snapshot is one of
//! the four context values injected into every handler at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration snapshot shared with loaded handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOptions {
    /// Socket port of the controlling application
    pub port: u16,

    /// Unique identifier assigned to this host process on registration
    pub host_uuid: String,

    /// Event name sent when registering with the controlling application
    pub register_event: String,

    /// Opaque launch information blob supplied by the controlling application
    pub info: serde_json::Value,

    /// Directory relative bundle paths resolve against
    pub bundle_dir: PathBuf,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            port: 0,
            host_uuid: String::new(),
            register_event: "registerHost".to_string(),
            info: serde_json::Value::Null,
            bundle_dir: default_bundle_dir(),
        }
    }
}

impl HostOptions {
    /// Build a snapshot from the launch arguments supplied by the
    /// controlling application.
    pub fn from_launch_args(args: &[String]) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if !matches!(flag, "-port" | "-pluginUUID" | "-registerEvent" | "-info") {
                return Err(OptionsError::UnknownFlag {
                    flag: flag.to_string(),
                });
            }
            let raw = args.get(i + 1).ok_or_else(|| OptionsError::MissingValue {
                flag: flag.to_string(),
            })?;
            match flag {
                "-port" => {
                    options.port = raw.parse().map_err(|e| OptionsError::InvalidValue {
                        flag: flag.to_string(),
                        cause: format!("{}", e),
                    })?;
                }
                "-pluginUUID" => options.host_uuid = raw.clone(),
                "-registerEvent" => options.register_event = raw.clone(),
                "-info" => {
                    options.info =
                        serde_json::from_str(raw).map_err(|e| OptionsError::InvalidValue {
                            flag: flag.to_string(),
                            cause: format!("{}", e),
                        })?;
                }
                _ => {}
            }
            i += 2;
        }

        Ok(options)
    }

    /// Load a snapshot from a TOML file.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }
}

/// Platform-specific default bundle directory
pub fn default_bundle_dir() -> PathBuf {
    // User-specific bundle directory (preferred)
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("deckhost");
    }

    // Fallback to a local bundles directory
    PathBuf::from("./bundles")
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("missing value for launch argument '{flag}'")]
    MissingValue { flag: String },

    #[error("unrecognized launch argument '{flag}'")]
    UnknownFlag { flag: String },

    #[error("invalid value for launch argument '{flag}': {cause}")]
    InvalidValue { flag: String, cause: String },

    #[error("could not read options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse options file: {0}")]
    Parse(#[from] toml::de::Error),
}
