//! WebAssembly bindings.
//!
//! ```javascript
//! import init, { WasmSketchpad } from './pkg/sketchpad_renderer.js';
//!
//! await init();
//! const pad = new WasmSketchpad('page-canvas');
//! pad.loadSnapshot(page.canvasData);
//! canvas.addEventListener('mousedown', e => pad.pointerDown(e.offsetX, e.offsetY));
//! window.addEventListener('mouseup', e => pad.pointerUp(e.offsetX, e.offsetY));
//! ```
//!
//! Pointer-up must be wired at window level so drags released outside the
//! canvas still end. Event methods return `true` when the editor state
//! changed and the host UI should refresh (for example to show the text
//! box).

use sketchpad_core::{CommitReason, InputEvent, TextInput};
use wasm_bindgen::prelude::*;

use crate::backend::canvas2d::Canvas2DBackend;
use crate::{RenderError, RendererConfig, Sketchpad};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing::info!("Sketchpad WASM initialized");
}

fn to_js(err: &RenderError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// A sketchpad bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct WasmSketchpad {
    inner: Sketchpad,
}

impl WasmSketchpad {
    fn dispatch(&mut self, event: &InputEvent) -> Result<bool, JsValue> {
        self.inner
            .handle(event)
            .map(sketchpad_core::Change::is_visible)
            .map_err(|e| to_js(&e))
    }
}

#[wasm_bindgen]
impl WasmSketchpad {
    /// Bind to the canvas with the given element id.
    ///
    /// `config_json` may override any renderer defaults.
    ///
    /// # Errors
    ///
    /// Throws if the canvas cannot be found or the config is malformed.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<WasmSketchpad, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => RendererConfig::from_json(json).map_err(|e| to_js(&e))?,
            None => RendererConfig::default(),
        };
        let surface = Canvas2DBackend::from_element_id(canvas_id).map_err(|e| to_js(&e))?;
        let mut inner = Sketchpad::new(config);
        inner
            .attach_surface(Box::new(surface))
            .map_err(|e| to_js(&e))?;
        Ok(Self { inner })
    }

    /// Apply an event given as JSON (`{"type": "...", "data": ...}`).
    ///
    /// # Errors
    ///
    /// Throws if the event is malformed or the redraw fails.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, json: &str) -> Result<bool, JsValue> {
        let event: InputEvent = serde_json::from_str(json)
            .map_err(|e| to_js(&RenderError::Core(e.into())))?;
        self.dispatch(&event)
    }

    /// Pick a tool by name. Unknown names are ignored.
    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&mut self, name: &str) -> bool {
        self.inner.select_tool_named(name).is_visible()
    }

    /// Primary button pressed.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::PointerDown { x, y })
    }

    /// Pointer moved.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::PointerMove { x, y })
    }

    /// Primary button released.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::PointerUp { x, y })
    }

    /// Gesture aborted.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::PointerCancel)
    }

    /// Double click.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, x: f32, y: f32) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::DoubleClick { x, y })
    }

    /// Finish the open text edit with the text box contents and size.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = commitText)]
    pub fn commit_text(
        &mut self,
        text: String,
        width: f32,
        height: f32,
        escaped: bool,
    ) -> Result<bool, JsValue> {
        let reason = if escaped {
            CommitReason::Escape
        } else {
            CommitReason::Blur
        };
        self.dispatch(&InputEvent::CommitText(TextInput {
            text,
            width,
            height,
            reason,
        }))
    }

    /// Delete the selected elements.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> Result<bool, JsValue> {
        self.dispatch(&InputEvent::DeleteSelected)
    }

    /// Replace the page with saved canvas data.
    ///
    /// # Errors
    ///
    /// Throws if the data cannot be parsed.
    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        self.inner.load_snapshot_json(json).map_err(|e| to_js(&e))
    }

    /// Canvas data to save for the page.
    ///
    /// # Errors
    ///
    /// Throws if serialization fails.
    #[wasm_bindgen(js_name = saveSnapshot)]
    pub fn save_snapshot(&self) -> Result<String, JsValue> {
        self.inner.snapshot_json().map_err(|e| to_js(&e))
    }

    /// Redraw the page.
    ///
    /// # Errors
    ///
    /// Throws if no surface is attached.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.inner.render().map_err(|e| to_js(&e))
    }

    /// Resize the canvas and redraw.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.inner.resize(width, height).map_err(|e| to_js(&e))
    }

    /// Name of the active tool.
    #[wasm_bindgen(js_name = activeTool)]
    #[must_use]
    pub fn active_tool(&self) -> String {
        self.inner.editor().active_tool().to_string()
    }

    /// Whether a shape is being dragged out.
    #[wasm_bindgen(js_name = isDrawing)]
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.inner.editor().is_drawing()
    }

    /// Whether the text box should be shown.
    #[wasm_bindgen(js_name = isEditingText)]
    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        self.inner.editor().is_editing_text()
    }

    /// The element being drawn or edited, as JSON.
    #[wasm_bindgen(js_name = activeElementJson)]
    #[must_use]
    pub fn active_element_json(&self) -> Option<String> {
        self.inner
            .editor()
            .active_element()
            .and_then(|e| serde_json::to_string(e).ok())
    }

    /// Number of elements on the page.
    #[wasm_bindgen(js_name = elementCount)]
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.inner.editor().elements().len()
    }

    /// Number of frames drawn.
    #[wasm_bindgen(js_name = frameCount)]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.renderer().frame_count()
    }
}
