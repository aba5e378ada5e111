//! # Sketchpad Core
//!
//! Element model and editor state machine for the page sketchpad.
//! Has no rendering or platform dependencies and compiles to WASM.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               sketchpad-core                │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Editor State Machine    │
//! │  - Shapes        │  - Tool selection        │
//! │  - Patches       │  - Drag to draw          │
//! │  - Geometry      │  - Box selection         │
//! │                  │  - Text editing          │
//! ├─────────────────────────────────────────────┤
//! │  Element Store   │  Snapshots               │
//! │  - Paint order   │  - JSON import/export    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Drawing lives in `sketchpad-renderer`, which consumes the
//! [`ElementStore`] read-only.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod schema;
pub mod store;

pub use editor::{Change, EditorState};
pub use element::{Element, ElementId, ElementPatch, GenericKind, Point, Shape, ShapeTool};
pub use error::{SketchError, SketchResult};
pub use event::{CommitReason, InputEvent, TextInput};
pub use geometry::{element_bounds, normalized_bounds, normalized_line_bounds, Bounds};
pub use schema::{snapshot_from_json, snapshot_to_json};
pub use store::ElementStore;

/// Sketchpad core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
