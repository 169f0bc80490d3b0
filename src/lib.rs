//! Showreel
//!
//! Viewport-gated media playback for portfolio and event showcase pages,
//! plus the small scroll and pointer interaction utilities those pages use.
//!
//! # Features
//!
//! - **Visibility observer**: one-shot (latching) or continuous viewport
//!   intersection checks with a pre-trigger margin
//! - **Media controller**: muted autoplay once visible, user toggle, sticky
//!   resource errors, silent autoplay rejection
//! - **Presenter**: fallback / loading / live card states derived purely from
//!   controller state
//! - **Environment-agnostic**: the native media element sits behind the
//!   [`MediaHandle`] trait; play requests settle asynchronously by ticket
//!
//! # Example
//!
//! ```
//! use showreel::{Card, CardConfig, CardProps, MediaSource, PlayOutcome, SimulatedMedia, Viewport};
//! use showreel::geometry::Rect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let props = CardProps {
//!     title: "Product launch".to_string(),
//!     description: "Stage design and live stream".to_string(),
//!     media_source: MediaSource::parse("/videos/launch.mp4"),
//!     index: 0,
//! };
//! let mut card = Card::new(props, CardConfig::default(), |_| SimulatedMedia::new())?;
//! card.mount(Rect::new(0.0, 900.0, 1280.0, 480.0));
//!
//! card.on_viewport(&Viewport::default().root_rect(400.0));
//! let ticket = card.controller().and_then(|c| c.pending_ticket()).expect("autoplay requested");
//! card.settle_play(ticket, PlayOutcome::Started);
//! println!("{}", card.view());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod geometry;
pub mod observer;
pub mod media;
pub mod controller;
pub mod presenter;
pub mod section;

// Scripted replays used by the CLI and golden tests
pub mod scenario;

// Smooth scroll, cursor, lightbox and motion helpers
pub mod interaction;

// Worker-backed async card handle
pub mod async_api;

pub use async_api::CardDriver;
pub use controller::{ControllerConfig, MediaController, PlayAttempt, PlaybackState};
pub use media::{MediaEvent, MediaHandle, MediaSource, PlayOutcome, PlayTicket, SimulatedMedia};
pub use observer::{ObserveMode, ObserverConfig, VisibilityObserver};
pub use presenter::{render, Card, CardConfig, CardProps, CardView, ClickTarget, ContentItem};
pub use section::{Section, SectionLayout};

/// Viewport dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl Viewport {
    /// The viewport's rect in document coordinates at vertical scroll `scroll_y`.
    pub fn root_rect(&self, scroll_y: f64) -> geometry::Rect {
        geometry::Rect::new(0.0, scroll_y, self.width as f64, self.height as f64)
    }
}

/// Load a static content collection (a JSON array of items).
///
/// ```
/// let items = showreel::load_content(r#"[{"title": "Gala", "media_source": "/v/gala.mp4"}]"#).unwrap();
/// assert_eq!(items.len(), 1);
/// ```
pub fn load_content(json: &str) -> Result<Vec<ContentItem>> {
    serde_json::from_str(json).map_err(|e| Error::ConfigError(format!("content collection: {}", e)))
}
