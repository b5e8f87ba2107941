//! WASM bindings for browser-hosted editing sessions.
//!
//! This module exposes [`Editor`] to JavaScript via wasm-bindgen. Paths are
//! passed as arrays of child indices, format names as their kebab-case
//! strings.

use wasm_bindgen::prelude::*;

use crate::command::{BlockFormat, Change, Command, Point, Selection};
use crate::config::EditorConfig;
use crate::editor::{Content, Editor};
use crate::hotkey::{KeyEvent, Modifiers};
use crate::model::{Mark, Path};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An editing session owned by a JavaScript host.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str, placeholder: Option<String>, disabled: bool) -> WasmEditor {
        let mut config = EditorConfig::default().with_disabled(disabled);
        if let Some(placeholder) = placeholder {
            config = config.with_placeholder(placeholder);
        }
        WasmEditor {
            editor: Editor::new(&Content::new(html), config),
        }
    }

    /// Register `callback(html)`, invoked after every structural edit.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.editor.set_on_change(move |content| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&content.html)) {
                log::warn!(target: "quire::editor", "onChange callback threw: {e:?}");
            }
        });
    }

    pub fn html(&self) -> String {
        self.editor.html().to_string()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.editor.placeholder().map(str::to_string)
    }

    #[wasm_bindgen(js_name = setDisabled)]
    pub fn set_disabled(&mut self, disabled: bool) {
        self.editor.set_disabled(disabled);
    }

    /// Replace the content if it differs from the current encoding.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, html: &str) -> bool {
        self.editor.set_content(&Content::new(html))
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(
        &mut self,
        anchor_path: Vec<usize>,
        anchor_offset: usize,
        focus_path: Vec<usize>,
        focus_offset: usize,
    ) -> bool {
        let selection = Selection::new(
            Point::new(Path::new(anchor_path), anchor_offset),
            Point::new(Path::new(focus_path), focus_offset),
        );
        self.editor.apply(Command::SetSelection(Some(selection))) == Change::Selection
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.editor.apply(Command::SetSelection(None));
    }

    #[wasm_bindgen(js_name = toggleMark)]
    pub fn toggle_mark(&mut self, format: &str) -> Result<bool, JsValue> {
        let mark: Mark = format.parse().map_err(js_error)?;
        Ok(self.run(Command::ToggleMark(mark)))
    }

    #[wasm_bindgen(js_name = toggleBlock)]
    pub fn toggle_block(&mut self, format: &str) -> Result<bool, JsValue> {
        let format: BlockFormat = format.parse().map_err(js_error)?;
        Ok(self.run(Command::ToggleBlock(format)))
    }

    #[wasm_bindgen(js_name = isMarkActive)]
    pub fn is_mark_active(&self, format: &str) -> Result<bool, JsValue> {
        let mark: Mark = format.parse().map_err(js_error)?;
        Ok(self.editor.is_mark_active(mark))
    }

    #[wasm_bindgen(js_name = isBlockActive)]
    pub fn is_block_active(&self, format: &str) -> Result<bool, JsValue> {
        let format: BlockFormat = format.parse().map_err(js_error)?;
        Ok(self.editor.is_block_active(format))
    }

    #[wasm_bindgen(js_name = insertMedia)]
    pub fn insert_media(&mut self, url: String, link: Option<String>, alt: Option<String>) -> bool {
        self.run(Command::InsertMedia { url, link, alt })
    }

    #[wasm_bindgen(js_name = removeMedia)]
    pub fn remove_media(&mut self, path: Vec<usize>) -> bool {
        self.run(Command::RemoveMedia(Path::new(path)))
    }

    #[wasm_bindgen(js_name = insertText)]
    pub fn insert_text(&mut self, text: String) -> bool {
        self.run(Command::InsertText(text))
    }

    #[wasm_bindgen(js_name = deleteBackward)]
    pub fn delete_backward(&mut self) -> bool {
        self.run(Command::DeleteBackward)
    }

    #[wasm_bindgen(js_name = deleteFragment)]
    pub fn delete_fragment(&mut self) -> bool {
        self.run(Command::DeleteFragment)
    }

    #[wasm_bindgen(js_name = insertBreak)]
    pub fn insert_break(&mut self) -> bool {
        self.run(Command::InsertBreak)
    }

    pub fn undo(&mut self) -> bool {
        self.run(Command::Undo)
    }

    pub fn redo(&mut self) -> bool {
        self.run(Command::Redo)
    }

    /// Route a key press. Returns `true` when the host must call
    /// `event.preventDefault()`.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, ctrl: bool, alt: bool, shift: bool, meta: bool) -> bool {
        let mut modifiers = Modifiers::NONE;
        for (held, modifier) in [
            (ctrl, Modifiers::CTRL),
            (alt, Modifiers::ALT),
            (shift, Modifiers::SHIFT),
            (meta, Modifiers::META),
        ] {
            if held {
                modifiers = modifiers.union(modifier);
            }
        }
        self.editor
            .handle_key(&KeyEvent::new(key, modifiers))
            .prevent_default
    }

    /// Toolbar button states as JSON.
    #[wasm_bindgen(js_name = toolbarJson)]
    pub fn toolbar_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.editor.toolbar()).map_err(js_error)
    }

    /// The document tree as JSON.
    #[wasm_bindgen(js_name = treeJson)]
    pub fn tree_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.editor.document()).map_err(js_error)
    }
}

impl WasmEditor {
    /// Apply a command; `true` when the document changed.
    fn run(&mut self, command: Command) -> bool {
        self.editor.apply(command).is_structural()
    }
}
