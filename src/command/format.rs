//! Block format names accepted by `ToggleBlock`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::{Align, BlockKind};

/// A block-level format: a retype target, a list type or an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// Paragraph, heading or quote.
    Kind(BlockKind),
    /// Bulleted or numbered list.
    List(BlockKind),
    Align(Align),
}

impl BlockFormat {
    pub const PARAGRAPH: BlockFormat = BlockFormat::Kind(BlockKind::Paragraph);
    pub const HEADING_ONE: BlockFormat = BlockFormat::Kind(BlockKind::HeadingOne);
    pub const HEADING_TWO: BlockFormat = BlockFormat::Kind(BlockKind::HeadingTwo);
    pub const BLOCK_QUOTE: BlockFormat = BlockFormat::Kind(BlockKind::BlockQuote);
    pub const BULLETED_LIST: BlockFormat = BlockFormat::List(BlockKind::BulletedList);
    pub const NUMBERED_LIST: BlockFormat = BlockFormat::List(BlockKind::NumberedList);

    /// Build a format from a block kind. List items and media are not
    /// formats a block can be toggled to.
    pub fn from_kind(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::BulletedList | BlockKind::NumberedList => Some(BlockFormat::List(kind)),
            BlockKind::ListItem | BlockKind::Media => None,
            _ => Some(BlockFormat::Kind(kind)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockFormat::Kind(kind) | BlockFormat::List(kind) => kind.name(),
            BlockFormat::Align(align) => align.as_str(),
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, BlockFormat::List(_))
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s {
            "paragraph" => Self::PARAGRAPH,
            "heading-one" => Self::HEADING_ONE,
            "heading-two" => Self::HEADING_TWO,
            "block-quote" => Self::BLOCK_QUOTE,
            "bulleted-list" => Self::BULLETED_LIST,
            "numbered-list" => Self::NUMBERED_LIST,
            "left" => BlockFormat::Align(Align::Left),
            "center" => BlockFormat::Align(Align::Center),
            "right" => BlockFormat::Align(Align::Right),
            "justify" => BlockFormat::Align(Align::Justify),
            other => return Err(Error::UnknownFormat(other.to_string())),
        };
        Ok(format)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BlockFormat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BlockFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
