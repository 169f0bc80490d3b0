//! Card presenter: wires a visibility observer to a media controller and
//! derives the card's visual state.

use crate::controller::{ControllerConfig, MediaController, PlaybackState};
use crate::geometry::Rect;
use crate::media::{MediaEvent, MediaHandle, MediaSource, PlayOutcome, PlayTicket};
use crate::observer::{ObserverConfig, VisibilityChange, VisibilityObserver};
use crate::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One record of a static content collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media_source: Option<String>,
}

/// Everything a card renders from, besides controller state.
#[derive(Debug, Clone, PartialEq)]
pub struct CardProps {
    pub title: String,
    pub description: String,
    pub media_source: Option<MediaSource>,
    pub index: usize,
}

impl CardProps {
    pub fn from_item(item: &ContentItem, index: usize) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            media_source: item.media_source.as_deref().and_then(MediaSource::parse),
            index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub observer: ObserverConfig,
    pub controller: ControllerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NoSource,
    MediaError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Play,
    Pause,
}

/// The three mutually exclusive visual states of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum CardView {
    Fallback { index: usize, title: String, description: String, reason: FallbackReason },
    Loading { index: usize, title: String },
    Live { index: usize, title: String, source: String, badge: Badge },
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::Fallback { index, title, reason, .. } => {
                let why = match reason {
                    FallbackReason::NoSource => "no media",
                    FallbackReason::MediaError => "media unavailable",
                };
                write!(f, "#{} {} [fallback: {}]", index, title, why)
            }
            CardView::Loading { index, title } => write!(f, "#{} {} [loading]", index, title),
            CardView::Live { index, title, badge, .. } => {
                let badge = match badge {
                    Badge::Play => "paused",
                    Badge::Pause => "playing",
                };
                write!(f, "#{} {} [live: {}]", index, title, badge)
            }
        }
    }
}

/// Derive the visual state. Pure: depends only on its inputs.
pub fn render<M: MediaHandle>(props: &CardProps, controller: Option<&MediaController<M>>) -> CardView {
    let fallback = |reason| CardView::Fallback {
        index: props.index,
        title: props.title.clone(),
        description: props.description.clone(),
        reason,
    };
    let Some(ctrl) = controller else {
        return fallback(FallbackReason::NoSource);
    };
    match ctrl.state() {
        PlaybackState::Error => fallback(FallbackReason::MediaError),
        PlaybackState::Playing => CardView::Live {
            index: props.index,
            title: props.title.clone(),
            source: ctrl.source().to_string(),
            badge: Badge::Pause,
        },
        _ if ctrl.is_ready() => CardView::Live {
            index: props.index,
            title: props.title.clone(),
            source: ctrl.source().to_string(),
            badge: Badge::Play,
        },
        _ => CardView::Loading { index: props.index, title: props.title.clone() },
    }
}

/// Where a click landed on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    Surface,
    /// A nested control (link, button) that handles its own click.
    Control(String),
}

/// A mounted card: observer, optional controller and the active latch.
pub struct Card<M: MediaHandle> {
    props: CardProps,
    observer: VisibilityObserver,
    controller: Option<MediaController<M>>,
    active: bool,
    mounted: bool,
}

impl<M: MediaHandle> Card<M> {
    /// Build a card. `make_handle` is only invoked when the props carry a
    /// media source.
    pub fn new<F>(props: CardProps, config: CardConfig, make_handle: F) -> Result<Self>
    where
        F: FnOnce(&MediaSource) -> M,
    {
        let observer = VisibilityObserver::new(config.observer)?;
        let controller = props
            .media_source
            .clone()
            .map(|src| {
                let handle = make_handle(&src);
                MediaController::new(src, handle, config.controller)
            });
        Ok(Self {
            props,
            observer,
            controller,
            active: false,
            mounted: false,
        })
    }

    pub fn props(&self) -> &CardProps {
        &self.props
    }

    pub fn controller(&self) -> Option<&MediaController<M>> {
        self.controller.as_ref()
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, rect: Rect) {
        self.observer.mount(rect);
        self.mounted = true;
    }

    pub fn relayout(&mut self, rect: Rect) {
        self.observer.update_target(rect);
    }

    /// Re-check visibility against the viewport's root rect.
    pub fn on_viewport(&mut self, root: &Rect) {
        if !self.mounted {
            return;
        }
        let active = match self.observer.observe(root) {
            Some(VisibilityChange::Entered) => true,
            Some(VisibilityChange::Left) => false,
            None => return,
        };
        if active == self.active {
            return;
        }
        debug!("card #{} active={}", self.props.index, active);
        self.active = active;
        if let Some(ctrl) = self.controller.as_mut() {
            ctrl.set_active(active);
        }
    }

    pub fn click(&mut self, target: &ClickTarget) {
        if !self.mounted {
            return;
        }
        if let ClickTarget::Control(name) = target {
            debug!("card #{} control '{}' clicked", self.props.index, name);
            return;
        }
        if let Some(ctrl) = self.controller.as_mut() {
            ctrl.toggle();
        }
    }

    pub fn media_event(&mut self, event: MediaEvent) {
        if let Some(ctrl) = self.controller.as_mut() {
            ctrl.handle_event(event);
        }
    }

    pub fn settle_play(&mut self, ticket: PlayTicket, outcome: PlayOutcome) {
        if let Some(ctrl) = self.controller.as_mut() {
            ctrl.settle_play(ticket, outcome);
        }
    }

    /// Disconnect the observer and dispose the controller. Late play
    /// settlements are ignored afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.observer.unmount();
        if let Some(ctrl) = self.controller.as_mut() {
            ctrl.dispose();
        }
        self.mounted = false;
    }

    pub fn view(&self) -> CardView {
        render(&self.props, self.controller.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SimulatedMedia;

    fn props(src: Option<&str>) -> CardProps {
        CardProps {
            title: "Summit 2024".into(),
            description: "Keynote stage build".into(),
            media_source: src.and_then(MediaSource::parse),
            index: 0,
        }
    }

    fn card(src: Option<&str>) -> Card<SimulatedMedia> {
        let mut c = Card::new(props(src), CardConfig::default(), |_| SimulatedMedia::new()).unwrap();
        c.mount(Rect::new(0.0, 0.0, 640.0, 360.0));
        c
    }

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 720.0)
    }

    #[test]
    fn loading_until_playable() {
        let mut c = card(Some("/v/summit.mp4"));
        assert!(matches!(c.view(), CardView::Loading { .. }));
        c.on_viewport(&viewport());
        assert!(c.is_active());
        assert!(matches!(c.view(), CardView::Loading { .. }));
        c.media_event(MediaEvent::CanPlay);
        let ticket = c.controller().unwrap().pending_ticket().unwrap();
        c.settle_play(ticket, PlayOutcome::Started);
        assert!(matches!(c.view(), CardView::Live { badge: Badge::Pause, .. }));
    }

    #[test]
    fn surface_click_toggles_but_control_click_does_not() {
        let mut c = card(Some("/v/summit.mp4"));
        c.on_viewport(&viewport());
        let ticket = c.controller().unwrap().pending_ticket().unwrap();
        c.settle_play(ticket, PlayOutcome::Started);

        c.click(&ClickTarget::Control("case-study-link".into()));
        assert_eq!(c.controller().unwrap().state(), PlaybackState::Playing);

        c.click(&ClickTarget::Surface);
        assert_eq!(c.controller().unwrap().state(), PlaybackState::Paused);
        assert!(matches!(c.view(), CardView::Live { badge: Badge::Play, .. }));
    }

    #[test]
    fn error_renders_fallback() {
        let mut c = card(Some("/v/missing.mp4"));
        c.on_viewport(&viewport());
        c.media_event(MediaEvent::Error("404".into()));
        assert!(matches!(
            c.view(),
            CardView::Fallback { reason: FallbackReason::MediaError, .. }
        ));
    }

    #[test]
    fn display_is_compact() {
        let c = card(None);
        assert_eq!(c.view().to_string(), "#0 Summit 2024 [fallback: no media]");
    }

    #[test]
    fn content_item_with_blank_source_has_none() {
        let item = ContentItem {
            title: "Gala".into(),
            description: String::new(),
            media_source: Some("  ".into()),
        };
        assert!(CardProps::from_item(&item, 3).media_source.is_none());
    }
}
