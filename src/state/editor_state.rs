//! The interaction state machine of the canvas.
//!
//! Every pointer gesture starts from `Idle` and returns to it. Each state
//! carries only what is valid while it lasts, so a `Writing` state always
//! knows which element it edits.
//!
//! # State Transitions
//!
//! ```text
//!                 pointer-down (drawing tool)
//!          ┌──────────────────────────────────► Drawing ───┐
//!          │      pointer-down (text tool)                 │
//!          ├──────────────────────────────────► Writing ───┤ blur
//!          │      pointer-down on a handle                 │
//! ┌──────┐ ├──────────────────────────────────► Resizing ──┤     ┌──────┐
//! │ Idle ├─┤      pointer-down inside                      ├─────► Idle │
//! └──────┘ └──────────────────────────────────► Moving ────┤     └──────┘
//!                                                  │ click on text
//!                                                  └─► Writing
//! ```
use egui::{Pos2, Vec2};

use crate::element::{Element, ElementId};
use crate::geometry::Handle;

/// Pointer-to-element offsets recorded when an element is grabbed.
#[derive(Debug, Clone, PartialEq)]
pub enum GrabOffset {
    /// Pointer minus the element anchor.
    Anchor(Vec2),
    /// Pointer minus each freehand sample, one per point.
    Points(Vec<Vec2>),
}

impl GrabOffset {
    pub fn for_element(element: &Element, pointer: Pos2) -> Self {
        match element.points() {
            Some(points) => GrabOffset::Points(points.iter().map(|p| pointer - *p).collect()),
            None => GrabOffset::Anchor(pointer - element.anchor()),
        }
    }
}

/// An element held by the selection tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Grab {
    /// The element as it was when grabbed; every update starts from it.
    pub origin: Element,
    pub handle: Handle,
    pub offset: GrabOffset,
    /// Whether this gesture has opened its undo step yet.
    pub committed: bool,
}

impl Grab {
    pub fn new(origin: Element, handle: Handle, pointer: Pos2) -> Self {
        let offset = GrabOffset::for_element(&origin, pointer);
        Self {
            origin,
            handle,
            offset,
            committed: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.origin.id()
    }

    /// The grabbed element translated so the recorded offset lands on `pointer`.
    pub fn moved_to(&self, pointer: Pos2) -> Element {
        let mut element = self.origin.clone();
        match &self.offset {
            GrabOffset::Points(offsets) => {
                element.set_points(offsets.iter().map(|offset| pointer - *offset).collect());
            }
            GrabOffset::Anchor(offset) => {
                element.translate((pointer - *offset) - self.origin.anchor());
            }
        }
        element
    }

    /// A press and release that left the element where it was.
    pub fn is_click(&self, pointer: Pos2) -> bool {
        match &self.offset {
            GrabOffset::Anchor(offset) => pointer - *offset == self.origin.anchor(),
            GrabOffset::Points(_) => false,
        }
    }
}

/// What the canvas is doing between events.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    /// Dragging out the element just created.
    Drawing { id: ElementId },
    Moving(Grab),
    Resizing(Grab),
    /// Editing the text of `id`; `draft` is the live content of the text box.
    Writing {
        id: ElementId,
        draft: String,
        /// The element was created by this edit.
        created: bool,
        /// The edit's undo step is already open.
        step_open: bool,
    },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "none",
            EditorState::Drawing { .. } => "drawing",
            EditorState::Moving(_) => "moving",
            EditorState::Resizing(_) => "resize",
            EditorState::Writing { .. } => "writing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_writing(&self) -> bool {
        matches!(self, EditorState::Writing { .. })
    }

    /// The element whose text is being edited.
    pub fn writing_id(&self) -> Option<ElementId> {
        match self {
            EditorState::Writing { id, .. } => Some(*id),
            _ => None,
        }
    }
}
