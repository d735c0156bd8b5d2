//! The canvas session: history, tool, color, interaction state and solve
//! results, driven one event at a time.
//!
//! `EditorContext` is the only owner of the element list. Pointer and key
//! events go through [`EditorContext::handle_event`], toolbar actions through
//! [`EditorContext::execute`]; both leave the visible document equal to the
//! current history snapshot.

use egui::{Color32, CursorIcon, Pos2};
use image::RgbaImage;

use super::editor_state::{EditorState, Grab};
use crate::command::{Command, History};
use crate::document::Document;
use crate::element::{factory, Element, ElementId, Shape, TextMeasure};
use crate::error::SolveError;
use crate::geometry::{
    adjust_element_coordinates, cursor_for_position, element_at_position, resized_coordinates,
    Handle,
};
use crate::id_generator::IdGenerator;
use crate::input::{shortcut_for, InputEvent};
use crate::raster::{content_center, Rasterizer};
use crate::solve::{SolveOutcome, SolveRequest, SolveSession};
use crate::tools::Tool;

pub const DEFAULT_COLOR: Color32 = Color32::WHITE;

/// Swatches offered next to the free color picker.
pub const PALETTE: [Color32; 8] = [
    Color32::WHITE,
    Color32::from_rgb(239, 68, 68),
    Color32::from_rgb(249, 115, 22),
    Color32::from_rgb(234, 179, 8),
    Color32::from_rgb(34, 197, 94),
    Color32::from_rgb(59, 130, 246),
    Color32::from_rgb(168, 85, 247),
    Color32::from_rgb(236, 72, 153),
];

/// A rasterised canvas ready to post, with the overlay anchor for its answers.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSolve {
    pub request: SolveRequest,
    pub center: Pos2,
}

#[derive(Debug)]
pub struct EditorContext {
    state: EditorState,
    history: History,
    tool: Tool,
    color: Color32,
    ids: IdGenerator,
    solve: SolveSession,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContext {
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
            history: History::new(),
            tool: Tool::default(),
            color: DEFAULT_COLOR,
            ids: IdGenerator::new(),
            solve: SolveSession::new(),
        }
    }

    /// The visible element list: always the current history snapshot.
    pub fn document(&self) -> &Document {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            log::debug!("tool {} -> {}", self.tool, tool);
            self.tool = tool;
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn solve(&self) -> &SolveSession {
        &self.solve
    }

    pub fn solve_mut(&mut self) -> &mut SolveSession {
        &mut self.solve
    }

    /// Live content of the text box while writing.
    pub fn draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            EditorState::Writing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Cursor affordance for the pointer at canvas-local `pos`.
    pub fn cursor_at(&self, pos: Pos2) -> CursorIcon {
        match &self.state {
            EditorState::Moving(grab) | EditorState::Resizing(grab) => grab.handle.cursor_icon(),
            _ if self.tool == Tool::Selection => {
                let hit = element_at_position(pos, self.document());
                cursor_for_position(hit.map(|(_, handle)| handle))
            }
            _ => CursorIcon::Default,
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Undo | Command::Redo if self.state.is_writing() => {}
            Command::Undo => {
                if self.history.undo() {
                    log::debug!("undo to snapshot {}", self.history.index());
                }
                self.state = EditorState::Idle;
            }
            Command::Redo => {
                if self.history.redo() {
                    log::debug!("redo to snapshot {}", self.history.index());
                }
                self.state = EditorState::Idle;
            }
            Command::ResetAll => {
                log::info!("reset all");
                self.clear_elements();
                self.solve.reset();
            }
            Command::SetTool(tool) => self.set_tool(tool),
            Command::SetColor(color) => self.set_color(color),
        }
    }

    pub fn handle_event(&mut self, event: InputEvent, measure: &dyn TextMeasure) {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position } => self.pointer_up(position),
            InputEvent::Key { key, modifiers } => {
                if self.state.is_writing() {
                    return;
                }
                if let Some(command) = shortcut_for(key, modifiers) {
                    self.execute(command);
                }
            }
            InputEvent::TextCommitted { text } => self.commit_text(text, measure),
        }
    }

    fn transition(&mut self, next: EditorState) {
        log_transition(self.state.name(), &next);
        self.state = next;
    }

    /// Write `document` as the open step of the current gesture.
    fn record(&mut self, document: Document, step_open: bool) {
        if step_open {
            self.history.update(document);
        } else {
            self.history.commit(document);
        }
    }

    fn pointer_down(&mut self, pos: Pos2) {
        if self.state.is_writing() {
            return;
        }
        if !self.state.is_idle() {
            // The release was lost, e.g. outside the window.
            log::debug!("{} gesture never released", self.state.name());
            let unfinished = std::mem::take(&mut self.state);
            self.end_gesture(unfinished);
        }

        if !self.tool.creates_elements() {
            if let Some((element, handle)) = element_at_position(pos, self.document()) {
                let grab = Grab::new(element.clone(), handle, pos);
                log::debug!("grabbed {} at {}", element.element_type(), handle.as_str());
                let next = match handle {
                    Handle::Inside => EditorState::Moving(grab),
                    _ => EditorState::Resizing(grab),
                };
                self.transition(next);
            }
            return;
        }

        let id = self.ids.generate_id();
        let element = match factory::create_element(id, self.tool, pos, pos, self.color) {
            Ok(element) => element,
            Err(err) => {
                log::error!("cannot start element: {err}");
                self.transition(EditorState::Idle);
                return;
            }
        };

        let mut document = self.document().clone();
        document.add_element(element);
        self.history.commit(document);

        let next = if self.tool == Tool::Text {
            EditorState::Writing {
                id,
                draft: String::new(),
                created: true,
                step_open: true,
            }
        } else {
            EditorState::Drawing { id }
        };
        self.transition(next);
    }

    fn pointer_move(&mut self, pos: Pos2) {
        let mut state = std::mem::take(&mut self.state);
        match &mut state {
            EditorState::Drawing { id } => {
                let mut document = self.document().clone();
                if let Some(element) = document.get_mut(*id) {
                    if element.is_two_point() {
                        element.set_corners(element.anchor(), pos);
                    } else {
                        element.push_point(pos);
                    }
                    self.history.update(document);
                }
            }
            EditorState::Moving(grab) => {
                let moved = grab.moved_to(pos);
                self.replace_grabbed(grab, moved);
            }
            EditorState::Resizing(grab) => {
                if grab.origin.is_two_point() {
                    let is_ellipse = matches!(grab.origin.shape(), Shape::Ellipse { .. });
                    let (p1, p2) =
                        resized_coordinates(pos, grab.handle, grab.origin.corners(), is_ellipse);
                    let mut resized = grab.origin.clone();
                    resized.set_corners(p1, p2);
                    self.replace_grabbed(grab, resized);
                }
            }
            EditorState::Idle | EditorState::Writing { .. } => {}
        }
        self.state = state;
    }

    /// Put the grabbed element's new geometry into the history, opening the
    /// gesture's undo step on its first change.
    fn replace_grabbed(&mut self, grab: &mut Grab, element: Element) {
        let mut document = self.document().clone();
        if document.get(grab.id()).is_none() {
            return;
        }
        document.add_element(element);
        self.record(document, grab.committed);
        grab.committed = true;
    }

    fn pointer_up(&mut self, pos: Pos2) {
        let from = self.state.name();
        let state = std::mem::take(&mut self.state);
        let next = match state {
            EditorState::Moving(grab) if grab.is_click(pos) => match grab.origin.text() {
                Some(text) => EditorState::Writing {
                    id: grab.id(),
                    draft: text.to_string(),
                    created: false,
                    step_open: grab.committed,
                },
                None => EditorState::Idle,
            },
            writing @ EditorState::Writing { .. } => writing,
            other => {
                self.end_gesture(other);
                EditorState::Idle
            }
        };
        log_transition(from, &next);
        self.state = next;
    }

    /// Settle a draw, move or resize gesture, normalizing two-point shapes.
    fn end_gesture(&mut self, state: EditorState) {
        match state {
            EditorState::Drawing { id } => self.normalize(id, true),
            EditorState::Resizing(grab) => self.normalize(grab.id(), grab.committed),
            EditorState::Moving(_) | EditorState::Idle | EditorState::Writing { .. } => {}
        }
    }

    /// Canonical corner order once a draw or resize gesture ends.
    fn normalize(&mut self, id: ElementId, step_open: bool) {
        let mut document = self.document().clone();
        let Some(element) = document.get_mut(id) else {
            return;
        };
        if !element.is_two_point() {
            return;
        }
        let (p1, p2) = adjust_element_coordinates(element);
        if (p1, p2) == element.corners() {
            return;
        }
        element.set_corners(p1, p2);
        self.record(document, step_open);
    }

    fn commit_text(&mut self, text: String, measure: &dyn TextMeasure) {
        let EditorState::Writing { id, created, step_open, .. } = self.state else {
            return;
        };

        let mut document = self.document().clone();
        let previous = document
            .get(id)
            .map(|element| element.text().unwrap_or_default().to_string());
        match previous {
            None => {}
            Some(_) if text.is_empty() && created => {
                log::debug!("discarding empty text element");
                self.history.rollback();
            }
            Some(_) if text.is_empty() => {
                document.remove_element(id);
                self.record(document, step_open);
            }
            Some(previous) if previous == text && !created => {}
            Some(_) => {
                if let Some(element) = document.get_mut(id) {
                    element.set_text(&text, measure);
                }
                self.record(document, step_open);
            }
        }
        self.transition(EditorState::Idle);
    }

    /// Empty the canvas as one undo step.
    fn clear_elements(&mut self) {
        if !self.document().is_empty() {
            self.history.commit(Document::new());
        }
        self.transition(EditorState::Idle);
    }

    /// Rasterise the canvas and build the request for it.
    pub fn prepare_solve(
        &self,
        rasterizer: &Rasterizer,
        width: u32,
        height: u32,
    ) -> Result<PreparedSolve, SolveError> {
        let image: RgbaImage = rasterizer.rasterize(self.document(), width, height);
        // A blank bitmap centres its overlays on the canvas.
        let center = content_center(&image)
            .unwrap_or_else(|| Pos2::new(width as f32 / 2.0, height as f32 / 2.0));
        let request = self.solve.build_request(&image)?;
        Ok(PreparedSolve { request, center })
    }

    /// Take in the solve outcome if it has arrived.
    pub fn poll_solve(&mut self) {
        if let Some((outcome, center)) = self.solve.poll() {
            self.finish_solve(outcome, center);
        }
    }

    /// Apply a finished solve: bindings and overlays on success, then the
    /// canvas is cleared as an undoable step. Failures are only logged.
    pub fn finish_solve(&mut self, outcome: SolveOutcome, center: Pos2) {
        match outcome {
            Ok(response) => {
                let added = self.solve.apply_response(&response, center);
                log::info!(
                    "solve returned {} entries ({})",
                    added,
                    response.message.as_deref().unwrap_or("no message")
                );
                self.clear_elements();
            }
            Err(err) => log::error!("solve failed: {err}"),
        }
    }
}

fn log_transition(from: &str, to: &EditorState) {
    if from != to.name() {
        log::debug!("state {} -> {}", from, to.name());
    }
}
