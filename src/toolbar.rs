//! Toolbar layout and button state.
//!
//! The layout is fixed: mark buttons, then heading and quote buttons, then
//! list buttons, then alignment buttons, with a separator between groups.

use crate::command::{BlockFormat, Command, EditState, is_block_active, is_mark_active};
use crate::model::{Align, Mark};

/// What a toolbar button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Mark(Mark),
    Block(BlockFormat),
}

impl ToolbarAction {
    /// The format name the button toggles.
    pub fn name(self) -> &'static str {
        match self {
            ToolbarAction::Mark(mark) => mark.name(),
            ToolbarAction::Block(format) => format.name(),
        }
    }

    pub fn command(self) -> Command {
        match self {
            ToolbarAction::Mark(mark) => Command::ToggleMark(mark),
            ToolbarAction::Block(format) => Command::ToggleBlock(format),
        }
    }

    /// Whether the button shows as pressed for the current selection.
    pub fn is_active(self, state: &EditState) -> bool {
        match self {
            ToolbarAction::Mark(mark) => is_mark_active(state, mark),
            ToolbarAction::Block(format) => is_block_active(state, format),
        }
    }
}

/// One slot of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Button {
        action: ToolbarAction,
        /// Icon identifier for the host's icon set.
        icon: &'static str,
    },
    Separator,
}

const fn mark(mark: Mark, icon: &'static str) -> ToolbarItem {
    ToolbarItem::Button {
        action: ToolbarAction::Mark(mark),
        icon,
    }
}

const fn block(format: BlockFormat, icon: &'static str) -> ToolbarItem {
    ToolbarItem::Button {
        action: ToolbarAction::Block(format),
        icon,
    }
}

pub const TOOLBAR: &[ToolbarItem] = &[
    mark(Mark::Bold, "bold"),
    mark(Mark::Italic, "italic"),
    mark(Mark::Underline, "underline"),
    mark(Mark::Code, "code"),
    ToolbarItem::Separator,
    block(BlockFormat::HEADING_ONE, "heading-1"),
    block(BlockFormat::HEADING_TWO, "heading-2"),
    block(BlockFormat::BLOCK_QUOTE, "quote"),
    ToolbarItem::Separator,
    block(BlockFormat::BULLETED_LIST, "list"),
    block(BlockFormat::NUMBERED_LIST, "list-ordered"),
    ToolbarItem::Separator,
    block(BlockFormat::Align(Align::Left), "align-left"),
    block(BlockFormat::Align(Align::Center), "align-center"),
    block(BlockFormat::Align(Align::Right), "align-right"),
    block(BlockFormat::Align(Align::Justify), "align-justify"),
];

/// Rendered state of one toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ButtonState {
    pub format: &'static str,
    pub icon: &'static str,
    pub active: bool,
    pub enabled: bool,
}

/// Button states for the whole toolbar, separators omitted.
pub fn button_states(state: &EditState, disabled: bool) -> Vec<ButtonState> {
    TOOLBAR
        .iter()
        .filter_map(|item| match *item {
            ToolbarItem::Button { action, icon } => Some(ButtonState {
                format: action.name(),
                icon,
                active: action.is_active(state),
                enabled: !disabled,
            }),
            ToolbarItem::Separator => None,
        })
        .collect()
}
