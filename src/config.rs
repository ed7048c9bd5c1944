//! Layered key-binding configuration.
//!
//! Sources, lowest priority first: built-in defaults, a TOML file, then
//! `SWITCH_CRITIQUE_*` environment variables.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dispatch::{ActionTable, Sink};
use crate::event::is_terminal_key_code;
use crate::keycode::KeyCode;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "switch-critique.toml";

/// Prefix for environment overrides, e.g. `SWITCH_CRITIQUE_QUIT_KEY=81`.
pub const ENV_PREFIX: &str = "SWITCH_CRITIQUE_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Explicitly requested config file does not exist
    Missing(PathBuf),
    /// Layer merge or deserialization failure
    Extract(figment::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Two bindings share a key code
    DuplicateBinding(KeyCode),
    /// Binding with a blank message
    EmptyMessage(KeyCode),
    /// Quit key no terminal key press can produce
    UnreachableQuitKey(KeyCode),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Missing(p) => write!(f, "Config file not found: {}", p.display()),
            Self::Extract(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::DuplicateBinding(code) => write!(f, "Key code {} is bound more than once", code),
            Self::EmptyMessage(code) => write!(f, "Binding for key code {} has no message", code),
            Self::UnreachableQuitKey(code) => {
                write!(f, "Quit key code {} cannot be typed in a terminal", code)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// One key code and the message its action emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub code: KeyCode,
    pub message: String,
}

impl Binding {
    pub fn new(code: KeyCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    /// Key that ends a listener run; never dispatched
    pub quit_key: KeyCode,
    /// Key bindings, replaced wholesale by each layer that sets them
    pub bindings: Vec<Binding>,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            quit_key: KeyCode::ESCAPE,
            bindings: vec![
                Binding::new(KeyCode::SPACE, "space"),
                Binding::new(KeyCode::ENTER, "enter"),
                Binding::new(KeyCode::BACKSPACE, "backspace"),
            ],
        }
    }
}

impl BindingsConfig {
    /// Figment with every layer stacked.
    ///
    /// `path` replaces the default file lookup; it is not checked for
    /// existence here.
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the effective configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.is_file()
        {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        Self::from_figment(&Self::figment(path))
    }

    /// Extract and validate from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        debug!(
            bindings = config.bindings.len(),
            quit_key = %config.quit_key,
            "loaded bindings"
        );
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject duplicate codes, blank messages and a quit key the terminal
    /// cannot send.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_terminal_key_code(self.quit_key) {
            return Err(ConfigError::UnreachableQuitKey(self.quit_key));
        }
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            if !seen.insert(binding.code) {
                return Err(ConfigError::DuplicateBinding(binding.code));
            }
            if binding.message.trim().is_empty() {
                return Err(ConfigError::EmptyMessage(binding.code));
            }
        }
        if seen.contains(&self.quit_key) {
            warn!(code = %self.quit_key, "quit key is also bound; its action will never run in a listener");
        }
        Ok(())
    }

    /// Bindings ordered by key code.
    pub fn sorted_bindings(&self) -> Vec<Binding> {
        let mut bindings = self.bindings.clone();
        bindings.sort_by_key(|b| b.code);
        bindings
    }

    /// Build the action table, routing every message to `sink`.
    pub fn action_table(&self, sink: Sink) -> ActionTable {
        ActionTable::from_bindings(&self.bindings, sink)
    }
}
