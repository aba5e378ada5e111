//! The editor state machine.
//!
//! [`EditorState`] owns the page's [`ElementStore`] and turns input events
//! into element mutations:
//!
//! ```text
//!                 pointer down              pointer move
//!   ┌────────┐  (shape tools)   ┌─────────┐ ──────────┐
//!   │        ├─────────────────►│         │           │ resize active,
//!   │  Idle  │                  │ Drawing │◄──────────┘ re-scan selection
//!   │        │◄─────────────────┤         │
//!   └──┬──▲──┘  pointer up /    └─────────┘
//!      │  │     cancel
//!      │  │ commit text
//!      │  │ (blur / Escape)
//!   ┌──▼──┴───────┐
//!   │ EditingText │  pointer down (text tool) or
//!   └─────────────┘  double click (selection tool)
//! ```
//!
//! Every transition reports a [`Change`] so the caller knows whether to run
//! a render pass. Ids that no longer resolve are ignored.

use crate::event::{InputEvent, TextInput};
use crate::geometry::{element_bounds, normalized_bounds, Bounds};
use crate::{Element, ElementId, ElementPatch, ElementStore, Point, Shape, ShapeTool};

/// What a transition changed.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Change {
    /// Nothing happened.
    #[default]
    None,
    /// Only UI-facing flags changed (tool, drawing/editing mode).
    Flags,
    /// Elements changed; the surface needs a full redraw.
    Elements,
}

impl Change {
    /// Whether the surface must be redrawn.
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        self == Change::Elements
    }

    /// Whether observers of the editor state need to hear about it.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self != Change::None
    }

    /// The stronger of two changes.
    pub fn merge(self, other: Change) -> Change {
        self.max(other)
    }
}

/// The editor state for one open page.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Elements of the page in paint order.
    elements: ElementStore,
    /// Tool picked in the toolbar.
    active_tool: ShapeTool,
    /// Element currently being drawn or edited.
    active_element_id: Option<ElementId>,
    /// A shape is being dragged out.
    is_drawing: bool,
    /// Text element whose text box is open.
    ///
    /// Independent of the active element; the canvas sees the next pointer
    /// down before the text box reports its blur.
    editing_text_id: Option<ElementId>,
}

impl EditorState {
    /// Create an empty editor with the selection tool active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty editor with the given tool active.
    #[must_use]
    pub fn with_tool(tool: ShapeTool) -> Self {
        Self {
            active_tool: tool,
            ..Self::default()
        }
    }

    /// The page's elements.
    #[must_use]
    pub fn elements(&self) -> &ElementStore {
        &self.elements
    }

    /// The currently picked tool.
    #[must_use]
    pub fn active_tool(&self) -> ShapeTool {
        self.active_tool
    }

    /// Id of the element being drawn or edited.
    #[must_use]
    pub fn active_element_id(&self) -> Option<&ElementId> {
        self.active_element_id.as_ref()
    }

    /// The element being drawn or edited, if it still exists.
    #[must_use]
    pub fn active_element(&self) -> Option<&Element> {
        self.active_element_id
            .as_ref()
            .and_then(|id| self.elements.get(id))
    }

    /// Whether a shape is being dragged out.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Whether a text box is open.
    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        self.editing_text_id.is_some()
    }

    /// Id of the text element being edited.
    #[must_use]
    pub fn editing_text_id(&self) -> Option<&ElementId> {
        self.editing_text_id.as_ref()
    }

    /// Apply an input event.
    pub fn process_event(&mut self, event: &InputEvent) -> Change {
        match event {
            InputEvent::SelectTool(tool) => self.select_tool(*tool),
            InputEvent::PointerDown { x, y } => self.pointer_down(*x, *y),
            InputEvent::PointerMove { x, y } => self.pointer_move(*x, *y),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerCancel => self.pointer_cancel(),
            InputEvent::DoubleClick { x, y } => self.double_click(*x, *y),
            InputEvent::CommitText(input) => self.commit_text(input),
            InputEvent::DeleteSelected => self.delete_selected(),
        }
    }

    /// Pick a tool.
    pub fn select_tool(&mut self, tool: ShapeTool) -> Change {
        tracing::debug!("Tool selected: {tool}");
        self.active_tool = tool;
        Change::Flags
    }

    /// Pick a tool by its wire name. Unknown names are ignored.
    pub fn select_tool_named(&mut self, name: &str) -> Change {
        match name.parse() {
            Ok(tool) => self.select_tool(tool),
            Err(e) => {
                tracing::debug!("Ignoring tool selection: {e}");
                Change::None
            }
        }
    }

    /// Primary button pressed at `(x, y)`.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Change {
        let mut change = Change::None;
        if self.is_drawing {
            tracing::debug!("Pointer down while drawing; closing previous gesture");
            change = self.finish_gesture();
        }

        let element = match (self.active_tool, self.active_tool.generic_kind()) {
            (_, Some(kind)) => Element::generic(kind, x, y),
            (ShapeTool::Linear, None) => Element::dot(x, y),
            (_, None) => return change.merge(self.open_text(x, y)),
        };

        tracing::debug!("Begin {} at ({x}, {y})", self.active_tool);
        let id = self.elements.add(element);
        self.active_element_id = Some(id);
        self.is_drawing = true;
        Change::Elements
    }

    /// Pointer moved to `(x, y)`.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Change {
        if !self.is_drawing {
            return Change::None;
        }
        let Some(id) = self.active_element_id.as_ref() else {
            return Change::None;
        };
        let Some(active) = self.elements.get_mut(id) else {
            tracing::trace!("Active element {id} vanished mid-drag");
            return Change::None;
        };

        match &mut active.shape {
            Shape::Rectangle | Shape::Ellipse | Shape::Selection => {
                active.width = x - active.x;
                active.height = y - active.y;
            }
            Shape::Linear { points } => points[1] = Point::new(x, y),
            Shape::Text { .. } => return Change::None,
        }

        if self.active_tool == ShapeTool::Selection && active.is_selection() {
            let selection = normalized_bounds(active);
            self.mark_selected_within(selection);
        }
        Change::Elements
    }

    /// Primary button released.
    pub fn pointer_up(&mut self) -> Change {
        self.finish_gesture()
    }

    /// Pointer gesture aborted; handled exactly like a release.
    pub fn pointer_cancel(&mut self) -> Change {
        self.finish_gesture()
    }

    /// Double click at `(x, y)`. With the selection tool this opens a text box.
    pub fn double_click(&mut self, x: f32, y: f32) -> Change {
        if self.active_tool != ShapeTool::Selection {
            return Change::None;
        }
        let change = if self.is_drawing {
            self.finish_gesture()
        } else {
            Change::None
        };
        change.merge(self.open_text(x, y))
    }

    /// Finish the open text edit with the contents of the text input.
    ///
    /// An empty input discards the text element entirely.
    pub fn commit_text(&mut self, input: &TextInput) -> Change {
        let Some(id) = self.editing_text_id.take() else {
            return Change::None;
        };
        if self.active_element_id.as_ref() == Some(&id) {
            self.active_element_id = None;
        }

        let is_live_text = self
            .elements
            .get(&id)
            .is_some_and(|e| matches!(e.shape, Shape::Text { .. }));
        if !is_live_text {
            tracing::trace!("Text commit without a live text element");
            return Change::Flags;
        }

        if input.text.is_empty() {
            tracing::debug!("Discarding empty text element {id}");
            self.elements.remove(&id);
        } else {
            tracing::debug!("Committing text element {id} ({:?})", input.reason);
            self.elements.update(
                &id,
                ElementPatch {
                    width: Some(input.width),
                    height: Some(input.height),
                    text: Some(input.text.clone()),
                    ..ElementPatch::default()
                },
            );
        }
        Change::Elements
    }

    /// Re-open an existing text element for editing.
    pub fn begin_text_edit(&mut self, id: &ElementId) -> Change {
        if self.is_editing_text() || self.is_drawing {
            return Change::None;
        }
        match self.elements.get(id) {
            Some(Element {
                shape: Shape::Text { .. },
                ..
            }) => {
                self.active_element_id = Some(id.clone());
                self.editing_text_id = Some(id.clone());
                Change::Flags
            }
            _ => Change::None,
        }
    }

    /// Delete every selected element.
    pub fn delete_selected(&mut self) -> Change {
        let removed = self
            .elements
            .remove_where(|e| e.selected && !e.is_selection());
        if removed == 0 {
            return Change::None;
        }
        tracing::debug!("Deleted {removed} selected elements");
        self.drop_stale_active();
        Change::Elements
    }

    /// Delete one element.
    pub fn remove_element(&mut self, id: &ElementId) -> Change {
        if self.elements.remove(id).is_none() {
            return Change::None;
        }
        self.drop_stale_active();
        Change::Elements
    }

    /// Elements worth saving, in paint order.
    ///
    /// Selection boxes and empty text boxes are left out.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.all().filter(|e| is_persistable(e)).cloned().collect()
    }

    /// Replace the page contents with a saved snapshot.
    ///
    /// Resets the active element and mode flags; the tool is kept.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) -> Change {
        let before = elements.len();
        self.elements
            .replace_all(elements.into_iter().filter(is_persistable));
        if self.elements.len() != before {
            tracing::debug!(
                "Dropped {} transient elements from snapshot",
                before - self.elements.len()
            );
        }
        self.active_element_id = None;
        self.is_drawing = false;
        self.editing_text_id = None;
        Change::Elements
    }

    fn open_text(&mut self, x: f32, y: f32) -> Change {
        if self.is_editing_text() {
            tracing::trace!("Text edit already open; ignoring");
            return Change::None;
        }
        let id = self.elements.add(Element::text(x, y, ""));
        tracing::debug!("Opened text element {id} at ({x}, {y})");
        self.active_element_id = Some(id.clone());
        self.editing_text_id = Some(id);
        self.is_drawing = false;
        Change::Flags
    }

    fn finish_gesture(&mut self) -> Change {
        let was_drawing = std::mem::take(&mut self.is_drawing);
        let selecting = self.active_tool == ShapeTool::Selection
            || self.active_element().is_some_and(Element::is_selection);
        if !selecting {
            return if was_drawing {
                Change::Flags
            } else {
                Change::None
            };
        }

        let removed = self.elements.remove_where(Element::is_selection);
        self.drop_stale_active();
        if removed > 0 {
            Change::Elements
        } else if was_drawing {
            Change::Flags
        } else {
            Change::None
        }
    }

    /// Mark elements fully inside `selection` as selected and the rest as not.
    ///
    /// This scans the whole page on every move; only flags that flip are written.
    fn mark_selected_within(&mut self, selection: Bounds) {
        let mut flipped = 0usize;
        for element in self.elements.elements_mut() {
            if element.is_selection() {
                continue;
            }
            let inside = selection.contains(&element_bounds(element));
            if element.selected != inside {
                element.selected = inside;
                flipped += 1;
            }
        }
        if flipped > 0 {
            tracing::trace!("Selection box flipped {flipped} elements");
        }
    }

    fn drop_stale_active(&mut self) {
        if let Some(id) = &self.active_element_id {
            if self.elements.get(id).is_none() {
                self.active_element_id = None;
            }
        }
        if let Some(id) = &self.editing_text_id {
            if self.elements.get(id).is_none() {
                self.editing_text_id = None;
            }
        }
    }
}

fn is_persistable(element: &Element) -> bool {
    match &element.shape {
        Shape::Selection => false,
        Shape::Text { text } => !text.is_empty(),
        Shape::Rectangle | Shape::Ellipse | Shape::Linear { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenericKind;

    fn drag(editor: &mut EditorState, from: (f32, f32), to: (f32, f32)) {
        let _ = editor.pointer_down(from.0, from.1);
        let _ = editor.pointer_move(to.0, to.1);
        let _ = editor.pointer_up();
    }

    #[test]
    fn test_default_tool_is_selection() {
        let editor = EditorState::new();
        assert_eq!(editor.active_tool(), ShapeTool::Selection);
        assert!(!editor.is_drawing());
        assert!(!editor.is_editing_text());
    }

    #[test]
    fn test_tool_selection_touches_nothing_else() {
        let mut editor = EditorState::new();
        assert_eq!(editor.select_tool(ShapeTool::Ellipse), Change::Flags);
        assert_eq!(editor.active_tool(), ShapeTool::Ellipse);
        assert!(editor.elements().is_empty());
        assert!(editor.active_element_id().is_none());

        assert_eq!(editor.select_tool_named("hexagon"), Change::None);
        assert_eq!(editor.active_tool(), ShapeTool::Ellipse);
        assert_eq!(editor.select_tool_named("linear"), Change::Flags);
        assert_eq!(editor.active_tool(), ShapeTool::Linear);
    }

    #[test]
    fn test_generic_pointer_down_creates_zero_size_element() {
        let mut editor = EditorState::with_tool(ShapeTool::Ellipse);
        assert_eq!(editor.pointer_down(5.0, 6.0), Change::Elements);
        let active = editor.active_element().expect("active element");
        assert_eq!(active.shape, Shape::Ellipse);
        assert_eq!((active.x, active.y, active.width, active.height), (5.0, 6.0, 0.0, 0.0));
        assert!(editor.is_drawing());
    }

    #[test]
    fn test_drag_left_and_up_gives_negative_size() {
        let mut editor = EditorState::with_tool(ShapeTool::Rectangle);
        let _ = editor.pointer_down(50.0, 50.0);
        let _ = editor.pointer_move(20.0, 10.0);
        let active = editor.active_element().expect("active element");
        assert_eq!((active.width, active.height), (-30.0, -40.0));
    }

    #[test]
    fn test_linear_drag_moves_only_end_point() {
        let mut editor = EditorState::with_tool(ShapeTool::Linear);
        let _ = editor.pointer_down(1.0, 2.0);
        let _ = editor.pointer_move(7.0, 8.0);
        let _ = editor.pointer_move(9.0, 4.0);
        let points = *editor.active_element().and_then(Element::points).expect("line");
        assert_eq!(points, [Point::new(1.0, 2.0), Point::new(9.0, 4.0)]);
    }

    #[test]
    fn test_move_without_drawing_is_ignored() {
        let mut editor = EditorState::with_tool(ShapeTool::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        assert_eq!(editor.pointer_move(99.0, 99.0), Change::None);
        let only = editor.elements().all().next().expect("rectangle");
        assert_eq!((only.width, only.height), (10.0, 10.0));
    }

    #[test]
    fn test_text_pointer_down_ignored_while_editing() {
        let mut editor = EditorState::with_tool(ShapeTool::Text);
        assert_eq!(editor.pointer_down(10.0, 10.0), Change::Flags);
        assert!(editor.is_editing_text());
        assert!(!editor.is_drawing());
        let first = editor.active_element_id().cloned();

        assert_eq!(editor.pointer_down(50.0, 50.0), Change::None);
        assert_eq!(editor.elements().len(), 1);
        assert_eq!(editor.active_element_id().cloned(), first);
    }

    #[test]
    fn test_commit_text_resizes_and_sets_content() {
        let mut editor = EditorState::with_tool(ShapeTool::Text);
        let _ = editor.pointer_down(10.0, 20.0);
        let id = editor.active_element_id().cloned().expect("text id");

        let change = editor.commit_text(&TextInput::blur("hi\nthere", 64.0, 38.0));
        assert_eq!(change, Change::Elements);
        assert!(!editor.is_editing_text());
        assert!(editor.active_element_id().is_none());

        let text = editor.elements().get(&id).expect("committed text");
        assert_eq!(text.text_content(), Some("hi\nthere"));
        assert_eq!((text.width, text.height), (64.0, 38.0));
    }

    #[test]
    fn test_commit_without_edit_is_noop() {
        let mut editor = EditorState::new();
        assert_eq!(editor.commit_text(&TextInput::blur("x", 1.0, 1.0)), Change::None);
    }

    #[test]
    fn test_double_click_only_with_selection_tool() {
        let mut editor = EditorState::with_tool(ShapeTool::Rectangle);
        assert_eq!(editor.double_click(3.0, 3.0), Change::None);
        assert!(editor.elements().is_empty());

        let _ = editor.select_tool(ShapeTool::Selection);
        assert_eq!(editor.double_click(3.0, 3.0), Change::Flags);
        assert!(editor.is_editing_text());
        assert_eq!(
            editor.active_element().and_then(Element::text_content),
            Some("")
        );
    }

    #[test]
    fn test_begin_text_edit_reopens_text() {
        let mut editor = EditorState::with_tool(ShapeTool::Text);
        let _ = editor.pointer_down(0.0, 0.0);
        let id = editor.active_element_id().cloned().expect("id");
        let _ = editor.commit_text(&TextInput::blur("note", 30.0, 18.0));

        assert_eq!(editor.begin_text_edit(&id), Change::Flags);
        assert!(editor.is_editing_text());
        assert_eq!(editor.active_element_id(), Some(&id));
        assert_eq!(editor.begin_text_edit(&"ghost".into()), Change::None);
    }

    #[test]
    fn test_selection_scan_marks_and_unmarks() {
        let mut editor = EditorState::new();
        let _ = editor.load_snapshot(vec![
            Element::generic(GenericKind::Rectangle, 60.0, 60.0)
                .with_id("inside")
                .with_size(20.0, 20.0),
            Element::generic(GenericKind::Ellipse, 90.0, 90.0)
                .with_id("straddle")
                .with_size(20.0, 20.0),
        ]);

        let _ = editor.pointer_down(100.0, 100.0);
        let _ = editor.pointer_move(50.0, 50.0);
        let selected: Vec<_> = editor.elements().selected().map(|e| e.id.as_str()).collect();
        assert_eq!(selected, vec!["inside"]);

        // Shrinking the box releases the element again.
        let _ = editor.pointer_move(90.0, 90.0);
        assert_eq!(editor.elements().selected().count(), 0);
    }

    #[test]
    fn test_pointer_down_while_drawing_closes_previous_selection_box() {
        let mut editor = EditorState::new();
        let _ = editor.pointer_down(0.0, 0.0);
        let _ = editor.pointer_down(5.0, 5.0);
        let boxes = editor.elements().all().filter(|e| e.is_selection()).count();
        assert_eq!(boxes, 1);
    }

    #[test]
    fn test_tool_switch_mid_selection_still_drops_box() {
        let mut editor = EditorState::new();
        let _ = editor.pointer_down(0.0, 0.0);
        let _ = editor.select_tool(ShapeTool::Rectangle);
        assert_eq!(editor.pointer_up(), Change::Elements);
        assert!(editor.elements().is_empty());
    }

    #[test]
    fn test_blur_after_next_pointer_down_discards_text_and_keeps_drag() {
        let mut editor = EditorState::with_tool(ShapeTool::Text);
        let _ = editor.pointer_down(10.0, 10.0);
        let text_id = editor.editing_text_id().cloned().expect("text id");

        // Pointer down on the canvas arrives before the text box blur.
        let _ = editor.select_tool(ShapeTool::Rectangle);
        let _ = editor.pointer_down(100.0, 100.0);
        let rect_id = editor.active_element_id().cloned().expect("rect id");

        assert_eq!(editor.commit_text(&TextInput::blur("", 0.0, 0.0)), Change::Elements);
        assert!(editor.elements().get(&text_id).is_none());
        assert!(!editor.is_editing_text());
        assert_eq!(editor.active_element_id(), Some(&rect_id));

        let _ = editor.pointer_move(150.0, 140.0);
        let _ = editor.pointer_up();
        assert_eq!(editor.elements().len(), 1);
        let rect = editor.elements().get(&rect_id).expect("rectangle");
        assert_eq!((rect.width, rect.height), (50.0, 40.0));
    }

    #[test]
    fn test_late_commit_with_text_keeps_both_elements() {
        let mut editor = EditorState::with_tool(ShapeTool::Text);
        let _ = editor.pointer_down(10.0, 10.0);
        let text_id = editor.editing_text_id().cloned().expect("text id");
        let _ = editor.select_tool(ShapeTool::Linear);
        let _ = editor.pointer_down(50.0, 50.0);

        let _ = editor.commit_text(&TextInput::blur("note", 40.0, 20.0));
        assert_eq!(
            editor.elements().get(&text_id).and_then(Element::text_content),
            Some("note")
        );
        assert!(editor.is_drawing());
        assert!(editor.active_element().is_some_and(|e| e.points().is_some()));
    }

    #[test]
    fn test_delete_selected() {
        let mut editor = EditorState::new();
        let _ = editor.load_snapshot(vec![
            Element::generic(GenericKind::Rectangle, 0.0, 0.0)
                .with_id("a")
                .with_selected(true),
            Element::generic(GenericKind::Rectangle, 0.0, 0.0).with_id("b"),
        ]);
        assert_eq!(editor.delete_selected(), Change::Elements);
        let left: Vec<_> = editor.elements().all().map(|e| e.id.as_str()).collect();
        assert_eq!(left, vec!["b"]);
        assert_eq!(editor.delete_selected(), Change::None);
        assert_eq!(editor.remove_element(&"b".into()), Change::Elements);
        assert_eq!(editor.remove_element(&"b".into()), Change::None);
    }

    #[test]
    fn test_snapshot_skips_transient_elements() {
        let mut editor = EditorState::with_tool(ShapeTool::Rectangle);
        drag(&mut editor, (0.0, 0.0), (10.0, 10.0));
        let _ = editor.select_tool(ShapeTool::Text);
        let _ = editor.pointer_down(40.0, 40.0);

        let saved = editor.snapshot();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].shape, Shape::Rectangle);
    }

    #[test]
    fn test_load_snapshot_resets_modes() {
        let mut editor = EditorState::with_tool(ShapeTool::Linear);
        let _ = editor.pointer_down(0.0, 0.0);
        assert!(editor.is_drawing());

        let change = editor.load_snapshot(vec![
            Element::generic(GenericKind::Selection, 0.0, 0.0),
            Element::text(0.0, 0.0, "kept"),
        ]);
        assert!(change.needs_redraw());
        assert!(!editor.is_drawing());
        assert!(editor.active_element_id().is_none());
        assert_eq!(editor.elements().len(), 1);
        assert_eq!(editor.active_tool(), ShapeTool::Linear);
    }

    #[test]
    fn test_change_merge() {
        assert_eq!(Change::None.merge(Change::Flags), Change::Flags);
        assert_eq!(Change::Elements.merge(Change::Flags), Change::Elements);
        assert!(!Change::Flags.needs_redraw());
        assert!(Change::Flags.is_visible());
        assert!(!Change::None.is_visible());
    }
}
