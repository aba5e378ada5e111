//! Editor and renderer wired together for one open page.

use sketchpad_core::{
    snapshot_from_json, snapshot_to_json, Change, EditorState, InputEvent, ShapeTool,
};

use crate::{DrawingCapability, RenderResult, Renderer, RendererConfig};

/// A page being edited on a drawing surface.
///
/// Input events go to the editor; whenever one changes elements the page is
/// redrawn. Loading a snapshot before a surface is attached is fine: the
/// page is drawn when the surface arrives.
#[derive(Debug, Default)]
pub struct Sketchpad {
    editor: EditorState,
    renderer: Renderer,
}

impl Sketchpad {
    /// Create an empty page with no surface.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            editor: EditorState::new(),
            renderer: Renderer::new(config),
        }
    }

    /// Create a page around an existing editor.
    #[must_use]
    pub fn with_editor(editor: EditorState, config: RendererConfig) -> Self {
        Self {
            editor,
            renderer: Renderer::new(config),
        }
    }

    /// The editor state.
    #[must_use]
    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Attach a surface and draw the page onto it.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing onto the new surface fails.
    pub fn attach_surface(&mut self, surface: Box<dyn DrawingCapability>) -> RenderResult<()> {
        let _previous = self.renderer.attach(surface);
        self.render()
    }

    /// Detach the current surface.
    pub fn detach_surface(&mut self) -> Option<Box<dyn DrawingCapability>> {
        self.renderer.detach()
    }

    /// Apply an input event, redrawing if elements changed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::SurfaceNotAttached`] if the event
    /// changed elements while no surface is attached. The editor state is
    /// updated either way.
    pub fn handle(&mut self, event: &InputEvent) -> RenderResult<Change> {
        let change = self.editor.process_event(event);
        if change.needs_redraw() {
            self.render()?;
        }
        Ok(change)
    }

    /// Pick a tool by wire name; unknown names are ignored.
    pub fn select_tool_named(&mut self, name: &str) -> Change {
        self.editor.select_tool_named(name)
    }

    /// Pick a tool.
    pub fn select_tool(&mut self, tool: ShapeTool) -> Change {
        self.editor.select_tool(tool)
    }

    /// Replace the page with a saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be parsed or drawing fails.
    pub fn load_snapshot_json(&mut self, json: &str) -> RenderResult<()> {
        let elements = snapshot_from_json(json)?;
        if self.editor.load_snapshot(elements).needs_redraw() {
            self.redraw_if_attached()
        } else {
            Ok(())
        }
    }

    /// Serialize the page for saving.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn snapshot_json(&self) -> RenderResult<String> {
        Ok(snapshot_to_json(&self.editor.snapshot())?)
    }

    /// Draw the page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::SurfaceNotAttached`] if no surface is
    /// attached, or the surface's error if drawing fails.
    pub fn render(&mut self) -> RenderResult<()> {
        self.renderer.render(self.editor.elements())
    }

    /// Resize the surface and redraw.
    ///
    /// # Errors
    ///
    /// Returns an error if no surface is attached or the surface fails.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.renderer.resize(width, height)?;
        self.render()
    }

    /// Replace the renderer configuration and redraw.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn set_config(&mut self, config: RendererConfig) -> RenderResult<()> {
        self.renderer.set_config(config);
        self.redraw_if_attached()
    }

    fn redraw_if_attached(&mut self) -> RenderResult<()> {
        if self.renderer.is_attached() {
            self.render()
        } else {
            tracing::debug!("No surface attached; deferring redraw");
            Ok(())
        }
    }
}
