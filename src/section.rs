//! A vertical section of cards built from a content collection.

use crate::geometry::Rect;
use crate::media::{MediaEvent, MediaHandle, MediaSource, PlayOutcome, PlayTicket};
use crate::presenter::{Card, CardConfig, CardProps, CardView, ClickTarget, ContentItem};
use crate::{Error, Result, Viewport};
use log::debug;
use serde::{Deserialize, Serialize};

/// Block layout parameters for a section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    /// Space above the first card
    pub top: f64,
    pub card_height: f64,
    pub gap: f64,
    /// Horizontal inset on both sides
    pub inset: f64,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            top: 8.0,
            card_height: 480.0,
            gap: 32.0,
            inset: 8.0,
        }
    }
}

/// Stack `count` card rects vertically inside the viewport width.
pub fn stack_rects(count: usize, viewport: Viewport, layout: &SectionLayout) -> Vec<Rect> {
    let width = (viewport.width as f64 - layout.inset * 2.0).max(0.0);
    let mut y = layout.top;
    let mut rects = Vec::with_capacity(count);
    for _ in 0..count {
        rects.push(Rect::new(layout.inset, y, width, layout.card_height));
        y += layout.card_height + layout.gap;
    }
    rects
}

pub struct Section<M: MediaHandle> {
    viewport: Viewport,
    scroll_y: f64,
    cards: Vec<Card<M>>,
    rects: Vec<Rect>,
}

impl<M: MediaHandle> Section<M> {
    /// Lay out and mount one card per item.
    pub fn layout<F>(
        items: &[ContentItem],
        viewport: Viewport,
        layout: SectionLayout,
        config: CardConfig,
        mut make_handle: F,
    ) -> Result<Self>
    where
        F: FnMut(usize, &MediaSource) -> M,
    {
        let rects = stack_rects(items.len(), viewport, &layout);
        let mut cards = Vec::with_capacity(items.len());
        for (index, (item, rect)) in items.iter().zip(&rects).enumerate() {
            let mut card = Card::new(CardProps::from_item(item, index), config, |src| make_handle(index, src))?;
            card.mount(*rect);
            cards.push(card);
        }
        debug!("section laid out with {} cards", cards.len());
        Ok(Self {
            viewport,
            scroll_y: 0.0,
            cards,
            rects,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Total height covered by the cards.
    pub fn document_height(&self) -> f64 {
        self.rects.last().map(|r| r.bottom()).unwrap_or(0.0)
    }

    pub fn card(&self, index: usize) -> Result<&Card<M>> {
        self.cards.get(index).ok_or(Error::UnknownCard(index))
    }

    fn card_mut(&mut self, index: usize) -> Result<&mut Card<M>> {
        self.cards.get_mut(index).ok_or(Error::UnknownCard(index))
    }

    /// Move the viewport and run every card's visibility check.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
        let root = self.viewport.root_rect(self.scroll_y);
        for card in &mut self.cards {
            card.on_viewport(&root);
        }
    }

    pub fn click(&mut self, index: usize, target: &ClickTarget) -> Result<()> {
        self.card_mut(index)?.click(target);
        Ok(())
    }

    pub fn media_event(&mut self, index: usize, event: MediaEvent) -> Result<()> {
        self.card_mut(index)?.media_event(event);
        Ok(())
    }

    pub fn settle_play(&mut self, index: usize, ticket: PlayTicket, outcome: PlayOutcome) -> Result<()> {
        self.card_mut(index)?.settle_play(ticket, outcome);
        Ok(())
    }

    pub fn unmount(&mut self, index: usize) -> Result<()> {
        self.card_mut(index)?.unmount();
        Ok(())
    }

    pub fn views(&self) -> Vec<CardView> {
        self.cards.iter().map(Card::view).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SimulatedMedia;

    fn items(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem {
                title: format!("Event {}", i),
                description: String::new(),
                media_source: Some(format!("/v/{}.mp4", i)),
            })
            .collect()
    }

    #[test]
    fn stacks_cards_vertically() {
        let rects = stack_rects(3, Viewport { width: 200, height: 200 }, &SectionLayout::default());
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].y, 8.0);
        assert_eq!(rects[1].y, 8.0 + 480.0 + 32.0);
        assert_eq!(rects[0].width, 184.0);
    }

    #[test]
    fn scrolling_activates_cards_in_order() {
        let mut s: Section<SimulatedMedia> = Section::layout(
            &items(4),
            Viewport::default(),
            SectionLayout::default(),
            CardConfig::default(),
            |_, _| SimulatedMedia::new(),
        )
        .unwrap();
        s.scroll_to(0.0);
        let active: Vec<bool> = (0..4).map(|i| s.card(i).unwrap().is_active()).collect();
        assert_eq!(active, vec![true, true, false, false]);

        let mut y = 0.0;
        while y <= s.document_height() {
            s.scroll_to(y);
            y += 200.0;
        }
        assert!((0..4).all(|i| s.card(i).unwrap().is_active()));
    }

    #[test]
    fn unknown_card_is_an_error() {
        let mut s: Section<SimulatedMedia> = Section::layout(
            &items(1),
            Viewport::default(),
            SectionLayout::default(),
            CardConfig::default(),
            |_, _| SimulatedMedia::new(),
        )
        .unwrap();
        assert!(matches!(s.click(5, &ClickTarget::Surface), Err(Error::UnknownCard(5))));
    }
}
