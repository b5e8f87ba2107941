//! Keyboard shortcuts for character marks and history.
//!
//! Chords are written the way toolbars and configuration files name them:
//! `"mod+b"`, `"ctrl+shift+x"`, ``"mod+`"``. `mod` is the platform's primary
//! modifier (Cmd on macOS, Ctrl elsewhere). Matching is exact: `mod+b` does
//! not fire for `mod+shift+b`.

use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::model::Mark;

/// Host platform, which decides what `mod` means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// The modifier `mod` stands for.
    pub fn primary(self) -> Modifiers {
        match self {
            Platform::Mac => Modifiers::META,
            Platform::Other => Modifiers::CTRL,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// A set of held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Self = Self { bits: 0 };
    pub const CTRL: Self = Self { bits: 1 << 0 };
    pub const ALT: Self = Self { bits: 1 << 1 };
    pub const SHIFT: Self = Self { bits: 1 << 2 };
    pub const META: Self = Self { bits: 1 << 3 };

    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }
}

/// A key press delivered by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key value, as in the DOM `KeyboardEvent.key` (`"b"`, `"B"`, `` "`" ``).
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}

/// A parsed chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    key: String,
    /// Whether the chord uses `mod`.
    primary: bool,
    modifiers: Modifiers,
}

impl Hotkey {
    /// The exact modifier set this chord requires on `platform`.
    pub fn modifiers(&self, platform: Platform) -> Modifiers {
        if self.primary {
            self.modifiers.union(platform.primary())
        } else {
            self.modifiers
        }
    }

    pub fn matches(&self, event: &KeyEvent, platform: Platform) -> bool {
        event.modifiers == self.modifiers(platform) && event.key.to_lowercase() == self.key
    }
}

impl FromStr for Hotkey {
    type Err = Error;

    fn from_str(chord: &str) -> Result<Self> {
        let invalid = || Error::InvalidHotkey(chord.to_string());
        // The key itself may be `+`, so split off the last segment by hand.
        let (prefix, key) = match chord.rsplit_once('+') {
            Some((prefix, "")) if prefix.ends_with('+') => (&prefix[..prefix.len() - 1], "+"),
            Some((prefix, key)) => (prefix, key),
            None => ("", chord),
        };
        if key.is_empty() {
            return Err(invalid());
        }

        let mut hotkey = Hotkey {
            key: key.to_lowercase(),
            primary: false,
            modifiers: Modifiers::NONE,
        };
        for name in prefix.split('+').filter(|s| !s.is_empty()) {
            let modifier = match name.to_lowercase().as_str() {
                "mod" => {
                    hotkey.primary = true;
                    continue;
                }
                "ctrl" | "control" => Modifiers::CTRL,
                "alt" | "option" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                "meta" | "cmd" | "command" => Modifiers::META,
                _ => return Err(invalid()),
            };
            hotkey.modifiers = hotkey.modifiers.union(modifier);
        }
        Ok(hotkey)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.primary {
            f.write_str("mod+")?;
        }
        for (modifier, name) in [
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
            (Modifiers::META, "meta"),
        ] {
            if self.modifiers.contains(modifier) {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

/// What a chord does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Mark(Mark),
    Undo,
    Redo,
}

impl Binding {
    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Binding::Mark(mark) => mark.name(),
            Binding::Undo => "undo",
            Binding::Redo => "redo",
        }
    }

    pub fn command(self) -> Command {
        match self {
            Binding::Mark(mark) => Command::ToggleMark(mark),
            Binding::Undo => Command::Undo,
            Binding::Redo => Command::Redo,
        }
    }
}

impl From<Mark> for Binding {
    fn from(mark: Mark) -> Self {
        Binding::Mark(mark)
    }
}

impl FromStr for Binding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "undo" => Ok(Binding::Undo),
            "redo" => Ok(Binding::Redo),
            mark => mark.parse().map(Binding::Mark),
        }
    }
}

/// Chord → action bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(Hotkey, Binding)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        for (chord, binding) in [
            ("mod+b", Binding::Mark(Mark::Bold)),
            ("mod+i", Binding::Mark(Mark::Italic)),
            ("mod+u", Binding::Mark(Mark::Underline)),
            ("mod+`", Binding::Mark(Mark::Code)),
            ("mod+z", Binding::Undo),
            ("mod+shift+z", Binding::Redo),
            ("mod+y", Binding::Redo),
        ] {
            if let Ok(hotkey) = chord.parse() {
                keymap.insert(hotkey, binding);
            }
        }
        keymap
    }
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a chord, replacing any existing binding for it.
    pub fn insert(&mut self, hotkey: Hotkey, binding: impl Into<Binding>) {
        let binding = binding.into();
        match self.bindings.iter_mut().find(|(h, _)| *h == hotkey) {
            Some(entry) => entry.1 = binding,
            None => self.bindings.push((hotkey, binding)),
        }
    }

    /// Parse and bind a chord.
    pub fn bind(&mut self, chord: &str, binding: impl Into<Binding>) -> Result<()> {
        self.insert(chord.parse()?, binding);
        Ok(())
    }

    /// The action bound to a key press, if any.
    pub fn lookup(&self, event: &KeyEvent, platform: Platform) -> Option<Binding> {
        self.bindings
            .iter()
            .find(|(hotkey, _)| hotkey.matches(event, platform))
            .map(|(_, binding)| *binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Hotkey, Binding)> {
        self.bindings.iter().map(|(h, b)| (h, *b))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Serialized as a `"chord" = "action"` table.
#[cfg(feature = "serde")]
impl serde::Serialize for Keymap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (hotkey, binding) in self.iter() {
            map.serialize_entry(&hotkey.to_string(), binding.name())?;
        }
        map.end()
    }
}

/// Deserialized entries override the default table.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Keymap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;

        let entries = std::collections::BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut keymap = Keymap::default();
        for (chord, action) in entries {
            let binding: Binding = action.parse().map_err(D::Error::custom)?;
            keymap.bind(&chord, binding).map_err(D::Error::custom)?;
        }
        Ok(keymap)
    }
}
