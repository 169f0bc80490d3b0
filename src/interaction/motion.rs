//! Scroll- and time-driven motion helpers: reveal-on-scroll, animated
//! counters and horizontal pin-scroll.

use crate::geometry::Rect;
use crate::observer::{ObserverConfig, VisibilityChange, VisibilityObserver};
use crate::{Error, Result};
use std::time::Duration;

/// Staggered reveal of a group of children once the group scrolls into view.
#[derive(Debug, Clone)]
pub struct Reveal {
    observer: VisibilityObserver,
    stagger: Duration,
    revealed_at: Option<Duration>,
}

impl Reveal {
    pub fn new(config: ObserverConfig, stagger: Duration) -> Result<Self> {
        Ok(Self {
            observer: VisibilityObserver::new(config)?,
            stagger,
            revealed_at: None,
        })
    }

    pub fn mount(&mut self, rect: Rect) {
        self.observer.mount(rect);
    }

    /// Check visibility at time `now`; returns true when the group was
    /// revealed by this call.
    pub fn update(&mut self, root: &Rect, now: Duration) -> bool {
        match self.observer.observe(root) {
            Some(VisibilityChange::Entered) if self.revealed_at.is_none() => {
                self.revealed_at = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// Whether child `index` is shown at `now`.
    pub fn child_visible(&self, index: u32, now: Duration) -> bool {
        self.revealed_at
            .and_then(|at| self.stagger.checked_mul(index).and_then(|delay| at.checked_add(delay)))
            .map(|shown_at| now >= shown_at)
            .unwrap_or(false)
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Counts from zero up to `target` once started.
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    target: u64,
    duration: Duration,
    started_at: Option<Duration>,
}

impl AnimatedCounter {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self { target, duration, started_at: None }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Begin counting at `now`. Later calls keep the first start time.
    pub fn start(&mut self, now: Duration) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Displayed value at `now`.
    pub fn value_at(&self, now: Duration) -> u64 {
        let Some(start) = self.started_at else {
            return 0;
        };
        if self.duration.is_zero() {
            return self.target;
        }
        let elapsed = now.saturating_sub(start).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        (ease_out_cubic(t) * self.target as f64).round() as u64
    }
}

/// Maps vertical scroll inside a pinned section to a horizontal translation
/// of its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinScroll {
    section_top: f64,
    pin_distance: f64,
    overflow: f64,
}

impl PinScroll {
    /// `pin_distance` is how much vertical scroll the section stays pinned
    /// for; the track overflow is `track_width - viewport_width`.
    pub fn new(section_top: f64, pin_distance: f64, track_width: f64, viewport_width: f64) -> Result<Self> {
        if pin_distance <= 0.0 {
            return Err(Error::ConfigError(format!("pin distance must be positive, got {}", pin_distance)));
        }
        Ok(Self {
            section_top,
            pin_distance,
            overflow: (track_width - viewport_width).max(0.0),
        })
    }

    /// Progress through the pinned range, in `[0, 1]`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        ((scroll_y - self.section_top) / self.pin_distance).clamp(0.0, 1.0)
    }

    pub fn is_pinned(&self, scroll_y: f64) -> bool {
        scroll_y >= self.section_top && scroll_y <= self.section_top + self.pin_distance
    }

    /// Leftward translation of the track, in px.
    pub fn translate_x(&self, scroll_y: f64) -> f64 {
        -(self.progress(scroll_y) * self.overflow)
    }
}
