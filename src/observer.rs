//! Visibility observer: turns scroll position into an "in view" signal.

use crate::geometry::{intersection_ratio, Rect, RootMargin};
use crate::{Error, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// How the observer behaves after the target first becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserveMode {
    /// Latch true on the first crossing and stop observing.
    #[default]
    Once,
    /// Keep observing and report both edges.
    Continuous,
}

/// Observer configuration
///
/// The defaults pre-trigger 100px before the element reaches the viewport and
/// require a tenth of it to be inside the expanded root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub root_margin: RootMargin,
    /// Minimum intersection ratio, in `[0, 1]`
    pub threshold: f64,
    pub mode: ObserveMode,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::uniform(100.0),
            threshold: 0.1,
            mode: ObserveMode::Once,
        }
    }
}

impl ObserverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::ConfigError(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// A change in visibility reported by [`VisibilityObserver::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered,
    Left,
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    config: ObserverConfig,
    target: Option<Rect>,
    visible: bool,
    connected: bool,
}

impl VisibilityObserver {
    pub fn new(config: ObserverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            target: None,
            visible: false,
            connected: false,
        })
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    /// Start observing `target`. A latched one-shot observer stays
    /// disconnected if mounted again.
    pub fn mount(&mut self, target: Rect) {
        self.target = Some(target);
        if self.config.mode == ObserveMode::Once && self.visible {
            return;
        }
        self.connected = true;
    }

    /// Move the observed element, e.g. after a relayout.
    pub fn update_target(&mut self, target: Rect) {
        if self.target.is_some() {
            self.target = Some(target);
        }
    }

    pub fn unmount(&mut self) {
        self.connected = false;
        self.target = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Run one intersection check against the viewport's root rect.
    pub fn observe(&mut self, root: &Rect) -> Option<VisibilityChange> {
        if !self.connected {
            return None;
        }
        let target = self.target?;
        let in_view = intersection_ratio(&target, root, &self.config.root_margin)
            .map(|ratio| ratio >= self.config.threshold)
            .unwrap_or(false);
        trace!("observe target={:?} root={:?} in_view={}", target, root, in_view);

        match (self.visible, in_view) {
            (false, true) => {
                self.visible = true;
                if self.config.mode == ObserveMode::Once {
                    self.connected = false;
                    debug!("visibility latched, observer disconnected");
                }
                Some(VisibilityChange::Entered)
            }
            (true, false) => {
                self.visible = false;
                Some(VisibilityChange::Left)
            }
            _ => None,
        }
    }
}
