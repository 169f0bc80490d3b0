use crate::geometry::Rect;
use crate::media::{MediaEvent, MediaHandle, PlayOutcome, PlayTicket};
use crate::presenter::{Card, CardView, ClickTarget};
use crate::{Error, Result};
use log::{debug, trace};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Viewport(Rect, oneshot::Sender<CardView>),
    Click(ClickTarget, oneshot::Sender<CardView>),
    Media(MediaEvent, oneshot::Sender<CardView>),
    Settle(PlayTicket, PlayOutcome),
    PendingTicket(oneshot::Sender<Option<PlayTicket>>),
    View(oneshot::Sender<CardView>),
    Unmount(oneshot::Sender<CardView>),
}

/// An async-friendly handle to a card owned by a dedicated worker thread.
///
/// Commands are applied in the order they are sent, mirroring a single UI
/// event queue. Once the card is unmounted the worker exits; play results
/// delivered after that are dropped.
#[derive(Clone)]
pub struct CardDriver {
    cmd_tx: Sender<Command>,
}

impl CardDriver {
    /// Move `card` onto a worker thread.
    pub fn spawn<M>(mut card: Card<M>) -> Self
    where
        M: MediaHandle + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let index = card.props().index;

        thread::spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Viewport(root, resp) => {
                        card.on_viewport(&root);
                        let _ = resp.send(card.view());
                    }
                    Command::Click(target, resp) => {
                        card.click(&target);
                        let _ = resp.send(card.view());
                    }
                    Command::Media(event, resp) => {
                        card.media_event(event);
                        let _ = resp.send(card.view());
                    }
                    Command::Settle(ticket, outcome) => {
                        card.settle_play(ticket, outcome);
                    }
                    Command::PendingTicket(resp) => {
                        let _ = resp.send(card.controller().and_then(|c| c.pending_ticket()));
                    }
                    Command::View(resp) => {
                        let _ = resp.send(card.view());
                    }
                    Command::Unmount(resp) => {
                        card.unmount();
                        let _ = resp.send(card.view());
                        break;
                    }
                }
            }
            debug!("card #{} worker stopped", index);
        });

        Self { cmd_tx }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx.send(make(tx)).map_err(|_| Error::Disposed)?;
        rx.await.map_err(|_| Error::Disposed)
    }

    /// Re-check visibility against the viewport's root rect.
    pub async fn viewport(&self, root: Rect) -> Result<CardView> {
        self.request(|tx| Command::Viewport(root, tx)).await
    }

    pub async fn click(&self, target: ClickTarget) -> Result<CardView> {
        self.request(|tx| Command::Click(target, tx)).await
    }

    pub async fn media_event(&self, event: MediaEvent) -> Result<CardView> {
        self.request(|tx| Command::Media(event, tx)).await
    }

    /// Deliver a play result. Never fails: a result for an unmounted card is
    /// discarded.
    pub async fn settle_play(&self, ticket: PlayTicket, outcome: PlayOutcome) -> Result<()> {
        if self.cmd_tx.send(Command::Settle(ticket, outcome)).is_err() {
            trace!("{:?} settled after unmount, dropped", ticket);
        }
        Ok(())
    }

    pub async fn pending_ticket(&self) -> Result<Option<PlayTicket>> {
        self.request(Command::PendingTicket).await
    }

    pub async fn view(&self) -> Result<CardView> {
        self.request(Command::View).await
    }

    /// Unmount the card and stop the worker; returns the final view.
    pub async fn unmount(&self) -> Result<CardView> {
        self.request(Command::Unmount).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaSource, SimulatedMedia};
    use crate::presenter::{CardConfig, CardProps};

    fn card() -> Card<SimulatedMedia> {
        let props = CardProps {
            title: "Launch night".into(),
            description: String::new(),
            media_source: MediaSource::parse("/v/launch.mp4"),
            index: 0,
        };
        let mut c = Card::new(props, CardConfig::default(), |_| SimulatedMedia::new()).unwrap();
        c.mount(Rect::new(0.0, 0.0, 640.0, 360.0));
        c
    }

    #[tokio::test]
    async fn driver_plays_after_settlement() {
        let driver = CardDriver::spawn(card());
        driver.viewport(Rect::new(0.0, 0.0, 1280.0, 720.0)).await.unwrap();
        let ticket = driver.pending_ticket().await.unwrap().expect("autoplay requested");
        driver.settle_play(ticket, PlayOutcome::Started).await.unwrap();
        let view = driver.view().await.unwrap();
        assert!(matches!(view, CardView::Live { .. }), "{:?}", view);
    }

    #[tokio::test]
    async fn late_settlement_after_unmount_is_dropped() {
        let driver = CardDriver::spawn(card());
        driver.viewport(Rect::new(0.0, 0.0, 1280.0, 720.0)).await.unwrap();
        let ticket = driver.pending_ticket().await.unwrap().unwrap();
        let final_view = driver.unmount().await.unwrap();
        assert!(matches!(final_view, CardView::Loading { .. }));

        assert!(driver.settle_play(ticket, PlayOutcome::Started).await.is_ok());
        assert!(matches!(driver.view().await, Err(Error::Disposed)));
    }
}
