//! Media handle abstraction and a deterministic in-memory implementation.
//!
//! The controller never assumes a play request succeeds synchronously: the
//! handle receives a [`PlayTicket`] and the environment later reports the
//! outcome through [`crate::MediaController::settle_play`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier/URL of a playable resource. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource(String);

impl MediaSource {
    /// Returns `None` for an empty or whitespace-only source, which callers
    /// treat as "no media".
    pub fn parse(src: &str) -> Option<Self> {
        let trimmed = src.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for one outstanding play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayTicket(pub u64);

/// How the environment answered a play request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    /// Usually an autoplay policy refusal; not a resource fault.
    Rejected(String),
}

/// Native signals emitted by the underlying media resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "message")]
pub enum MediaEvent {
    Play,
    Pause,
    CanPlay,
    /// Playback stalled while buffering.
    Waiting,
    Ended,
    Error(String),
}

/// The native media element a controller drives.
pub trait MediaHandle: Send {
    /// Attach the source and begin fetching it.
    fn load(&mut self, source: &MediaSource);
    fn set_muted(&mut self, muted: bool);
    /// Request playback. The result arrives later, keyed by `ticket`.
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
}

/// A native call recorded by [`SimulatedMedia`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "call")]
pub enum NativeCall {
    Load { source: String },
    SetMuted { muted: bool },
    Play { ticket: PlayTicket },
    Pause,
}

/// In-memory media handle that records every native call.
///
/// It never settles play requests on its own; the test or scenario driving it
/// decides when and how each ticket resolves.
#[derive(Debug, Default, Clone)]
pub struct SimulatedMedia {
    calls: Vec<NativeCall>,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[NativeCall] {
        &self.calls
    }

    /// Most recent ticket passed to `play`, if any.
    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.calls.iter().rev().find_map(|c| match c {
            NativeCall::Play { ticket } => Some(*ticket),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&NativeCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl MediaHandle for SimulatedMedia {
    fn load(&mut self, source: &MediaSource) {
        self.calls.push(NativeCall::Load { source: source.to_string() });
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(NativeCall::SetMuted { muted });
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.calls.push(NativeCall::Play { ticket });
    }

    fn pause(&mut self) {
        self.calls.push(NativeCall::Pause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_source_is_none() {
        assert!(MediaSource::parse("").is_none());
        assert!(MediaSource::parse("   ").is_none());
        assert_eq!(MediaSource::parse(" /v/a.mp4 ").unwrap().as_str(), "/v/a.mp4");
    }

    #[test]
    fn simulated_media_records_calls() {
        let mut m = SimulatedMedia::new();
        m.load(&MediaSource::parse("reel.mp4").unwrap());
        m.play(PlayTicket(1));
        m.pause();
        assert_eq!(m.calls().len(), 3);
        assert_eq!(m.last_ticket(), Some(PlayTicket(1)));
        assert_eq!(m.count(|c| matches!(c, NativeCall::Pause)), 1);
    }

    #[test]
    fn media_event_json_shape() {
        let ev: MediaEvent = serde_json::from_str(r#"{"type":"error","message":"404"}"#).unwrap();
        assert_eq!(ev, MediaEvent::Error("404".into()));
        let ev: MediaEvent = serde_json::from_str(r#"{"type":"can_play"}"#).unwrap();
        assert_eq!(ev, MediaEvent::CanPlay);
    }
}
