//! Module configuration: a read-only view over the JSON tree and file loading.
//!
//! Waybar hands every module a loosely typed JSON object. [`ConfigView`] reads
//! it the way the bar does: every accessor answers "is this key of kind X?"
//! and missing or mistyped keys come back as `None` instead of an error.

use crate::error::{ButtonError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Borrowed, possibly-missing node of a configuration tree.
///
/// Lookups never fail: indexing into a missing node or a node of the wrong
/// kind yields another missing node, so chains like
/// `view.get("format-icons").get("default").index(2)` are always safe.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use waybutton_rs_core::ConfigView;
///
/// let config = json!({ "format-alt-click": 3, "states": { "warning": 80 } });
/// let view = ConfigView::new(&config);
///
/// assert_eq!(view.get("format-alt-click").as_uint(), Some(3));
/// assert_eq!(view.get("states").get("warning").as_uint(), Some(80));
/// assert!(!view.get("format-alt").is_present());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigView<'a> {
    value: Option<&'a Value>,
}

impl<'a> ConfigView<'a> {
    /// Create a view rooted at `value`.
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// A view over nothing.
    #[must_use]
    pub const fn missing() -> Self {
        Self { value: None }
    }

    /// Object member lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> ConfigView<'a> {
        Self {
            value: self.value.and_then(|value| value.as_object()?.get(key)),
        }
    }

    /// Array element lookup.
    #[must_use]
    pub fn index(&self, idx: usize) -> ConfigView<'a> {
        Self {
            value: self.value.and_then(|value| value.as_array()?.get(idx)),
        }
    }

    /// Follow a path of object keys.
    #[must_use]
    pub fn at(&self, path: &[&str]) -> ConfigView<'a> {
        path.iter().fold(*self, |view, key| view.get(key))
    }

    /// The underlying JSON value, if present.
    #[must_use]
    pub const fn raw(&self) -> Option<&'a Value> {
        self.value
    }

    /// Whether the node exists and is not `null`.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self.value, Some(value) if !value.is_null())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        self.value?.as_str()
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// Unsigned integer value.
    ///
    /// Non-negative floats with no fractional part also count, matching how
    /// hand-written configs such as `"interval": 5.0` are usually meant.
    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        let value = self.value?;
        if let Some(uint) = value.as_u64() {
            return Some(uint);
        }
        let float = value.as_f64()?;
        (float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64).then_some(float as u64)
    }

    #[must_use]
    pub fn is_uint(&self) -> bool {
        self.as_uint().is_some()
    }

    /// Any numeric value as a float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        self.value?.as_f64()
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        self.as_float().is_some()
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.value?.as_bool()
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&'a [Value]> {
        self.value?.as_array().map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.as_array().is_some()
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        self.value?.as_object()
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.as_object().is_some()
    }

    /// Members of an object node in sorted key order; empty for anything else.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, ConfigView<'a>)> + 'a {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.iter())
            .map(|(key, value)| (key.as_str(), ConfigView::new(value)))
    }
}

/// Owned configuration of a single module.
///
/// Always holds a JSON object. Objects iterate in sorted key order whatever
/// the order in the source document, which is what state tie-breaking relies
/// on.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleConfig {
    value: Value,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            value: Value::Object(Map::new()),
        }
    }
}

impl ModuleConfig {
    /// Directory name used under the XDG config dir and the home fallback.
    pub const APP_DIR: &'static str = "waybutton-rs";

    /// File names searched for, in order.
    pub const FILE_NAMES: [&'static str; 2] = ["config.json", "config.ron"];

    /// Wrap a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ButtonError::config_with_value(
                "Top-level module config must be an object",
                value.to_string(),
            ));
        }
        Ok(Self { value })
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ButtonError::parse_with_source("Failed to parse JSON config", e))?;
        Self::from_value(value)
    }

    /// Parse a RON document into the same tree shape.
    pub fn from_ron_str(content: &str) -> Result<Self> {
        let value: Value = ron::from_str(content).map_err(|e| ButtonError::Parse {
            message: format!("Failed to parse RON config: {}", e),
            source: None,
        })?;
        Self::from_value(value)
    }

    /// Load configuration from the standard config file location.
    ///
    /// Searches for config in:
    /// 1. ~/.config/waybutton-rs/config.{json,ron}
    /// 2. ~/.waybutton-rs/config.{json,ron} (fallback)
    ///
    /// Returns an empty config if no file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("no config file found, using empty module config");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file, picking the parser by extension.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("ron") => Self::from_ron_str(&content)?,
            _ => return Err(ButtonError::unsupported_file(path)),
        };
        tracing::debug!(path = %path.display(), "loaded module config");
        Ok(config)
    }

    /// Find the config file in standard locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let xdg = dirs::config_dir().map(|dir| dir.join(Self::APP_DIR));
        let home = dirs::home_dir().map(|dir| dir.join(format!(".{}", Self::APP_DIR)));

        [xdg, home]
            .into_iter()
            .flatten()
            .flat_map(|dir| Self::FILE_NAMES.map(|name| dir.join(name)))
            .find(|path| path.exists())
    }

    /// Root view over the configuration.
    #[must_use]
    pub const fn view(&self) -> ConfigView<'_> {
        ConfigView::new(&self.value)
    }
}
