//! Remote solving of the drawn expressions.
//!
//! The canvas is rasterised, posted with the known variable bindings, and
//! every returned `expr = result` pair becomes a floating overlay. Entries
//! flagged `assign` also extend the bindings sent with the next request.

mod client;
mod wire;

use std::collections::BTreeMap;

use egui::Pos2;
use futures::channel::oneshot;
use image::RgbaImage;
use uuid::Uuid;

use crate::error::SolveError;

pub use client::{SolveClient, SolveOutcome};
pub use wire::{parse_response, png_data_url, SolveEntry, SolveRequest, SolveResponse};

/// One solved expression floating over the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: Uuid,
    pub latex: String,
    pub label: String,
    /// Canvas-local position; the user may drag it around.
    pub position: Pos2,
}

impl Overlay {
    pub fn from_entry(entry: &SolveEntry, position: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            latex: entry.latex(),
            label: entry.label(),
            position,
        }
    }
}

#[derive(Debug)]
struct Pending {
    receiver: oneshot::Receiver<SolveOutcome>,
    center: Pos2,
}

/// Bindings, overlays and the in-flight request of one canvas session.
#[derive(Debug, Default)]
pub struct SolveSession {
    variables: BTreeMap<String, String>,
    overlays: Vec<Overlay>,
    pending: Option<Pending>,
}

impl SolveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn overlay_mut(&mut self, id: Uuid) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|overlay| overlay.id == id)
    }

    /// A request is in flight; new submissions are refused until it settles.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Request body for `image` carrying a copy of the current bindings.
    pub fn build_request(&self, image: &RgbaImage) -> Result<SolveRequest, SolveError> {
        Ok(SolveRequest {
            image: png_data_url(image)?,
            dict_of_vars: self.variables.clone(),
        })
    }

    /// Track `receiver` as the in-flight request. Refused while another
    /// request is still out, so its outcome is never lost.
    pub fn begin(&mut self, receiver: oneshot::Receiver<SolveOutcome>, center: Pos2) -> bool {
        if self.is_busy() {
            log::warn!("solve already in flight, ignoring new submission");
            return false;
        }
        self.pending = Some(Pending { receiver, center });
        true
    }

    /// The outcome of the in-flight request once it has arrived, with the
    /// overlay position captured at submission.
    pub fn poll(&mut self) -> Option<(SolveOutcome, Pos2)> {
        let pending = self.pending.as_mut()?;
        let center = pending.center;
        let outcome = match pending.receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(outcome)) => outcome,
            Err(oneshot::Canceled) => Err(SolveError::Cancelled),
        };
        self.pending = None;
        Some((outcome, center))
    }

    /// Merge assignments and add one overlay per entry. Returns the number
    /// of overlays added.
    pub fn apply_response(&mut self, response: &SolveResponse, center: Pos2) -> usize {
        for entry in response.data.iter().filter(|entry| entry.assign) {
            log::info!("binding {} = {}", entry.expr, entry.result);
            self.variables.insert(entry.expr.clone(), entry.result.clone());
        }
        self.overlays
            .extend(response.data.iter().map(|entry| Overlay::from_entry(entry, center)));
        response.data.len()
    }

    /// Forget overlays and bindings. An in-flight request is left to finish.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.overlays.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(expr: &str, result: &str, assign: bool) -> SolveEntry {
        SolveEntry {
            expr: expr.to_string(),
            result: result.to_string(),
            assign,
        }
    }

    #[test]
    fn test_poll_reports_arrival_once() {
        let mut session = SolveSession::new();
        let (sender, receiver) = oneshot::channel();
        assert!(session.begin(receiver, Pos2::new(3.0, 4.0)));
        assert!(session.is_busy());
        assert!(session.poll().is_none());

        sender.send(Ok(SolveResponse::default())).unwrap();
        let (outcome, center) = session.poll().unwrap();
        assert!(outcome.is_ok());
        assert_eq!(center, Pos2::new(3.0, 4.0));
        assert!(!session.is_busy());
        assert!(session.poll().is_none());
    }

    #[test]
    fn test_second_begin_is_refused_while_busy() {
        let mut session = SolveSession::new();
        let (first, first_rx) = oneshot::channel();
        let (_second, second_rx) = oneshot::channel::<SolveOutcome>();
        assert!(session.begin(first_rx, Pos2::new(1.0, 1.0)));
        assert!(!session.begin(second_rx, Pos2::new(9.0, 9.0)));

        let response = SolveResponse {
            data: vec![entry("x", "5", true)],
            ..Default::default()
        };
        assert!(first.send(Ok(response)).is_ok());
        let (outcome, center) = session.poll().unwrap();
        assert_eq!(center, Pos2::new(1.0, 1.0));
        session.apply_response(&outcome.unwrap(), center);
        assert_eq!(session.variables().get("x").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_dropped_sender_clears_busy() {
        let mut session = SolveSession::new();
        let (sender, receiver) = oneshot::channel::<SolveOutcome>();
        assert!(session.begin(receiver, Pos2::ZERO));
        drop(sender);
        let (outcome, _) = session.poll().unwrap();
        assert!(matches!(outcome, Err(SolveError::Cancelled)));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_reset_clears_bindings_and_overlays() {
        let mut session = SolveSession::new();
        let response = SolveResponse {
            data: vec![entry("y", "2", true)],
            ..Default::default()
        };
        session.apply_response(&response, Pos2::ZERO);
        session.reset();
        assert!(session.variables().is_empty());
        assert!(session.overlays().is_empty());
    }
}
