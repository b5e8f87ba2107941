//! Editor configuration.
//!
//! ```toml
//! placeholder = "Tell your story..."
//! disabled = false
//! platform = "mac"
//!
//! [hotkeys]
//! "mod+shift+c" = "code"
//! "mod+r" = "redo"
//! ```

use crate::hotkey::{Keymap, Platform};

/// Placeholder shown while the document is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Write your content here...";

/// Host-supplied settings of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Text shown while the document is the canonical empty document.
    pub placeholder: String,
    /// Read-only mode: every mutating command is rejected.
    pub disabled: bool,
    /// Decides whether `mod` means Cmd or Ctrl.
    pub platform: Platform,
    /// Chord → mark table. Configured entries override the defaults.
    pub hotkeys: Keymap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            disabled: false,
            platform: Platform::current(),
            hotkeys: Keymap::default(),
        }
    }
}

impl EditorConfig {
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

#[cfg(feature = "serde")]
impl EditorConfig {
    /// Parse a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> crate::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
