//! Input events delivered to the editor by the UI layer.

use serde::{Deserialize, Serialize};

use crate::ShapeTool;

/// Why a text edit is being committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitReason {
    /// The text input lost focus.
    Blur,
    /// The user pressed Escape.
    Escape,
}

/// Contents of the text input at the moment an edit is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    /// Text typed by the user.
    pub text: String,
    /// Rendered width of the input in pixels.
    pub width: f32,
    /// Rendered height of the input in pixels.
    pub height: f32,
    /// What ended the edit.
    pub reason: CommitReason,
}

impl TextInput {
    /// Text input committed by losing focus.
    #[must_use]
    pub fn blur(text: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
            reason: CommitReason::Blur,
        }
    }
}

/// All input events the editor reacts to.
///
/// Pointer coordinates are in canvas space (offset from the surface origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// A tool was picked from the toolbar.
    SelectTool(ShapeTool),

    /// Primary button pressed on the surface.
    PointerDown {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Pointer moved.
    PointerMove {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// Primary button released, anywhere in the window.
    PointerUp {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// The pointer gesture was aborted (e.g. released outside the window).
    PointerCancel,

    /// Double click on the surface.
    DoubleClick {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },

    /// The text input finished editing.
    CommitText(TextInput),

    /// Delete every selected element.
    DeleteSelected,
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            InputEvent::PointerDown { x, y }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y }
            | InputEvent::DoubleClick { x, y } => Some((*x, *y)),
            InputEvent::SelectTool(_)
            | InputEvent::PointerCancel
            | InputEvent::CommitText(_)
            | InputEvent::DeleteSelected => None,
        }
    }
}
