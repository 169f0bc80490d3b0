//! Scripted replays of scroll, click and media steps against a section.
//!
//! A scenario is plain JSON:
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 720 },
//!   "items": [{ "title": "Gala", "media_source": "/v/gala.mp4" }],
//!   "steps": [
//!     { "step": "scroll_to", "y": 0 },
//!     { "step": "settle_play", "card": 0, "outcome": "started" }
//!   ]
//! }
//! ```
//!
//! `settle_play` without an explicit `ticket` resolves the card's currently
//! pending request.

use crate::media::{MediaEvent, NativeCall, PlayOutcome, PlayTicket, SimulatedMedia};
use crate::presenter::{CardConfig, CardView, ClickTarget, ContentItem};
use crate::section::{Section, SectionLayout};
use crate::{Error, Result, Viewport};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum Step {
    ScrollTo { y: f64 },
    Click { card: usize },
    ClickControl { card: usize, control: String },
    MediaEvent { card: usize, event: MediaEvent },
    SettlePlay {
        card: usize,
        #[serde(default)]
        ticket: Option<PlayTicket>,
        outcome: Settlement,
        #[serde(default)]
        reason: Option<String>,
    },
    Unmount { card: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Started,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub layout: SectionLayout,
    #[serde(default)]
    pub config: CardConfig,
    pub items: Vec<ContentItem>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// State of the section after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: Step,
    pub views: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub reports: Vec<StepReport>,
    /// Native media calls issued per card over the whole run.
    pub native_calls: Vec<Vec<NativeCall>>,
}

impl Transcript {
    /// Hex SHA-256 of the JSON transcript, for golden comparisons.
    pub fn digest(&self) -> Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&json)))
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::ScenarioError(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Replay every step against a freshly laid out section.
    pub fn run(&self) -> Result<Transcript> {
        let mut section = Section::layout(
            &self.items,
            self.viewport,
            self.layout,
            self.config,
            |_, _| SimulatedMedia::new(),
        )?;
        info!("running scenario: {} cards, {} steps", section.len(), self.steps.len());

        let mut reports = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            apply(&mut section, step)?;
            reports.push(StepReport {
                step: step.clone(),
                views: section.views(),
            });
        }

        let native_calls = (0..section.len())
            .map(|i| {
                section
                    .card(i)
                    .map(|c| c.controller().map(|ctrl| ctrl.handle().calls().to_vec()).unwrap_or_default())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Transcript { reports, native_calls })
    }
}

fn apply(section: &mut Section<SimulatedMedia>, step: &Step) -> Result<()> {
    debug!("step {:?}", step);
    match step {
        Step::ScrollTo { y } => section.scroll_to(*y),
        Step::Click { card } => section.click(*card, &ClickTarget::Surface)?,
        Step::ClickControl { card, control } => {
            section.click(*card, &ClickTarget::Control(control.clone()))?
        }
        Step::MediaEvent { card, event } => section.media_event(*card, event.clone())?,
        Step::SettlePlay { card, ticket, outcome, reason } => {
            let outcome = match outcome {
                Settlement::Started => PlayOutcome::Started,
                Settlement::Rejected => {
                    PlayOutcome::Rejected(reason.clone().unwrap_or_else(|| "NotAllowedError".to_string()))
                }
            };
            let ticket = match ticket {
                Some(t) => Some(*t),
                None => section
                    .card(*card)?
                    .controller()
                    .and_then(|c| c.pending_ticket()),
            };
            match ticket {
                Some(t) => section.settle_play(*card, t, outcome)?,
                None => debug!("card #{} has no play request to settle", card),
            }
        }
        Step::Unmount { card } => section.unmount(*card)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "viewport": { "width": 1280, "height": 720 },
        "items": [
            { "title": "Gala", "media_source": "/v/gala.mp4" },
            { "title": "Expo" }
        ],
        "steps": [
            { "step": "scroll_to", "y": 0 },
            { "step": "settle_play", "card": 0, "outcome": "rejected", "reason": "NotAllowedError" },
            { "step": "media_event", "card": 0, "event": { "type": "can_play" } },
            { "step": "click", "card": 0 },
            { "step": "settle_play", "card": 0, "outcome": "started" }
        ]
    }"#;

    #[test]
    fn parses_and_runs_autoplay_blocked_flow() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        assert_eq!(scenario.steps.len(), 5);
        let t = scenario.run().unwrap();

        let after_reject = &t.reports[1].views[0];
        assert!(matches!(after_reject, CardView::Loading { .. }));
        let after_canplay = &t.reports[2].views[0];
        assert!(matches!(after_canplay, CardView::Live { badge: crate::presenter::Badge::Play, .. }));
        let last = &t.reports[4].views;
        assert!(matches!(last[0], CardView::Live { badge: crate::presenter::Badge::Pause, .. }));
        assert!(matches!(last[1], CardView::Fallback { .. }));
        assert!(t.native_calls[1].is_empty());
    }

    #[test]
    fn digest_is_stable() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let a = scenario.run().unwrap().digest().unwrap();
        let b = scenario.run().unwrap().digest().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn settle_without_ticket_targets_the_pending_request() {
        let json = r#"{
            "items": [{ "title": "Gala", "media_source": "/v/gala.mp4" }],
            "steps": [
                { "step": "scroll_to", "y": 0 },
                { "step": "settle_play", "card": 0, "outcome": "started" },
                { "step": "click", "card": 0 },
                { "step": "click", "card": 0 },
                { "step": "settle_play", "card": 0, "outcome": "rejected" },
                { "step": "settle_play", "card": 0, "outcome": "started" }
            ]
        }"#;
        let t = Scenario::from_json(json).unwrap().run().unwrap();

        use crate::presenter::Badge;
        assert!(matches!(t.reports[4].views[0], CardView::Live { badge: Badge::Play, .. }));
        // Nothing is pending any more, so the last settlement changes nothing.
        assert_eq!(t.reports[5].views, t.reports[4].views);
        assert_eq!(
            t.native_calls[0].iter().filter(|c| matches!(c, NativeCall::Play { .. })).count(),
            2
        );
        assert_eq!(t.native_calls[0].last(), Some(&NativeCall::Play { ticket: PlayTicket(2) }));
    }

    #[test]
    fn unknown_card_fails_the_run() {
        let json = r#"{ "items": [], "steps": [{ "step": "click", "card": 2 }] }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert!(matches!(scenario.run(), Err(Error::UnknownCard(2))));
    }

    #[test]
    fn malformed_json_is_a_scenario_error() {
        assert!(matches!(Scenario::from_json("{"), Err(Error::ScenarioError(_))));
    }
}
