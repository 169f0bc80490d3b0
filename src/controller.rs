//! Media lifecycle controller.
//!
//! Owns one media handle and keeps [`PlaybackState`] in line with three
//! inputs: the external active flag, user play/pause requests, and the
//! handle's native events. Every failure is absorbed here; nothing returns an
//! error to the caller.

use crate::media::{MediaEvent, MediaHandle, MediaSource, PlayOutcome, PlayTicket};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Loading,
    Playing,
    Paused,
    /// Terminal for the controller's source.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Request playback muted; browsers only allow muted autoplay.
    pub muted: bool,
    /// Attempt playback when the controller becomes active.
    pub autoplay: bool,
    /// Keep playing when the resource reports `ended`.
    pub looping: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            muted: true,
            autoplay: true,
            looping: true,
        }
    }
}

/// What a `play()` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAttempt {
    Requested(PlayTicket),
    Ignored,
}

pub struct MediaController<M: MediaHandle> {
    source: MediaSource,
    handle: M,
    config: ControllerConfig,
    state: PlaybackState,
    active: bool,
    ready: bool,
    pending: Option<PlayTicket>,
    // Playback was running when the resource started buffering.
    stalled: bool,
    next_ticket: u64,
    last_error: Option<String>,
    disposed: bool,
}

impl<M: MediaHandle> MediaController<M> {
    pub fn new(source: MediaSource, handle: M, config: ControllerConfig) -> Self {
        Self {
            source,
            handle,
            config,
            state: PlaybackState::Idle,
            active: false,
            ready: false,
            pending: None,
            stalled: false,
            next_ticket: 1,
            last_error: None,
            disposed: false,
        }
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the resource has reported it can play.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pending_ticket(&self) -> Option<PlayTicket> {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn handle(&self) -> &M {
        &self.handle
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!("{}: {:?} -> {:?}", self.source, self.state, next);
            self.state = next;
        }
    }

    fn ensure_loaded(&mut self) {
        if self.state == PlaybackState::Idle {
            self.handle.load(&self.source);
            self.transition(PlaybackState::Loading);
        }
    }

    /// Request muted playback.
    ///
    /// Ignored while in error, disposed, inactive, already playing, or with a
    /// request already in flight.
    pub fn play(&mut self) -> PlayAttempt {
        if self.disposed || self.state == PlaybackState::Error {
            trace!("{}: play ignored in {:?}", self.source, self.state);
            return PlayAttempt::Ignored;
        }
        if !self.active || self.state == PlaybackState::Playing || self.pending.is_some() {
            trace!("{}: play ignored (active={}, pending={:?})", self.source, self.active, self.pending);
            return PlayAttempt::Ignored;
        }
        self.ensure_loaded();
        let ticket = PlayTicket(self.next_ticket);
        self.next_ticket += 1;
        self.handle.set_muted(self.config.muted);
        self.handle.play(ticket);
        self.pending = Some(ticket);
        self.stalled = false;
        debug!("{}: play requested ({:?})", self.source, ticket);
        PlayAttempt::Requested(ticket)
    }

    /// Stop playback. No native call is made unless something is playing or
    /// a play request is in flight.
    pub fn pause(&mut self) {
        if self.disposed {
            return;
        }
        let in_flight = self.pending.take().is_some();
        let stalled = std::mem::take(&mut self.stalled);
        if self.state != PlaybackState::Playing && !in_flight && !stalled {
            return;
        }
        self.handle.pause();
        if self.state == PlaybackState::Playing || stalled || (in_flight && self.ready) {
            self.transition(PlaybackState::Paused);
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Error => trace!("{}: toggle ignored in error", self.source),
            PlaybackState::Playing => self.pause(),
            PlaybackState::Loading if self.stalled => self.pause(),
            _ => {
                self.play();
            }
        }
    }

    /// Feed the external active flag. Only edges have an effect.
    pub fn set_active(&mut self, active: bool) {
        if self.disposed || active == self.active {
            return;
        }
        self.active = active;
        debug!("{}: active={}", self.source, active);
        if active {
            if self.state == PlaybackState::Error {
                return;
            }
            if self.config.autoplay {
                self.play();
            } else {
                self.ensure_loaded();
            }
        } else if self.state == PlaybackState::Playing || self.pending.is_some() || self.stalled {
            self.pause();
        }
    }

    /// Resolve a play request issued earlier. Stale tickets and results that
    /// arrive after `dispose` are dropped without touching any state.
    pub fn settle_play(&mut self, ticket: PlayTicket, outcome: PlayOutcome) {
        if self.disposed {
            trace!("{}: {:?} settled after dispose, ignored", self.source, ticket);
            return;
        }
        if self.pending != Some(ticket) {
            trace!("{}: stale {:?} ignored", self.source, ticket);
            return;
        }
        self.pending = None;
        self.stalled = false;
        if self.state == PlaybackState::Error {
            return;
        }
        match outcome {
            PlayOutcome::Started if self.active => {
                self.ready = true;
                self.transition(PlaybackState::Playing);
            }
            PlayOutcome::Started => {
                self.handle.pause();
                self.transition(PlaybackState::Paused);
            }
            PlayOutcome::Rejected(reason) => {
                debug!("{}: play rejected: {}", self.source, reason);
                self.transition(PlaybackState::Paused);
            }
        }
    }

    /// Sync with a native media event.
    pub fn handle_event(&mut self, event: MediaEvent) {
        if self.disposed || self.state == PlaybackState::Error {
            trace!("{}: {:?} ignored in {:?}", self.source, event, self.state);
            return;
        }
        match event {
            MediaEvent::Play => {
                if self.active {
                    self.pending = None;
                    self.stalled = false;
                    self.ready = true;
                    self.transition(PlaybackState::Playing);
                } else {
                    self.handle.pause();
                }
            }
            MediaEvent::Pause => {
                if self.state == PlaybackState::Playing || std::mem::take(&mut self.stalled) {
                    self.transition(PlaybackState::Paused);
                }
            }
            MediaEvent::CanPlay => {
                self.ready = true;
                // While stalled, the resource resumes on its own and reports `Play`.
                if self.state == PlaybackState::Loading && self.pending.is_none() && !self.stalled {
                    self.transition(PlaybackState::Paused);
                }
            }
            MediaEvent::Waiting => {
                if self.state == PlaybackState::Playing {
                    self.ready = false;
                    self.stalled = true;
                    self.transition(PlaybackState::Loading);
                }
            }
            MediaEvent::Ended => {
                if !self.config.looping && self.state == PlaybackState::Playing {
                    self.transition(PlaybackState::Paused);
                }
            }
            MediaEvent::Error(reason) => {
                warn!("{}: media error: {}", self.source, reason);
                self.pending = None;
                self.stalled = false;
                self.last_error = Some(reason);
                self.transition(PlaybackState::Error);
            }
        }
    }

    /// Detach from the handle. Everything after this is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.state == PlaybackState::Playing || self.pending.is_some() || self.stalled {
            self.handle.pause();
        }
        self.pending = None;
        self.stalled = false;
        self.disposed = true;
        debug!("{}: disposed in {:?}", self.source, self.state);
    }
}
