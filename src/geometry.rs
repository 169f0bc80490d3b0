//! Document-space geometry used for visibility checks.
//!
//! All rects live in document coordinates: the viewport's root rect is the
//! viewport size placed at the current scroll offset.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Overlapping region of two rects. Edge-adjacent rects yield a
    /// zero-sized intersection rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grow the rect outward by `margin` (negative margins shrink it).
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect {
            x: self.x - margin.left,
            y: self.y - margin.top,
            width: (self.width + margin.left + margin.right).max(0.0),
            height: (self.height + margin.top + margin.bottom).max(0.0),
        }
    }
}

/// Margin applied around the root before intersecting, so work can start
/// before an element actually scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub fn uniform(px: f64) -> Self {
        Self { top: px, right: px, bottom: px, left: px }
    }

    /// Parse CSS margin shorthand: one to four `px` (or unitless) values.
    ///
    /// ```
    /// use showreel::geometry::RootMargin;
    /// let m = RootMargin::parse("100px 0px").unwrap();
    /// assert_eq!(m.top, 100.0);
    /// assert_eq!(m.left, 0.0);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .map(parse_px)
            .collect::<Result<Vec<f64>>>()?;
        match values.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [v, h] => Ok(Self { top: *v, right: *h, bottom: *v, left: *h }),
            [t, h, b] => Ok(Self { top: *t, right: *h, bottom: *b, left: *h }),
            [t, r, b, l] => Ok(Self { top: *t, right: *r, bottom: *b, left: *l }),
            _ => Err(Error::ConfigError(format!("root margin '{}' needs 1 to 4 values", s))),
        }
    }
}

fn parse_px(token: &str) -> Result<f64> {
    let raw = token.strip_suffix("px").unwrap_or(token);
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::ConfigError(format!("invalid margin value '{}'", token)))
}

/// Fraction of `target` inside the margin-expanded `root`, or `None` when
/// they do not touch at all.
///
/// A zero-area target that touches the root reports a ratio of 1.0, matching
/// how browsers treat empty elements.
pub fn intersection_ratio(target: &Rect, root: &Rect, margin: &RootMargin) -> Option<f64> {
    let root = root.expand(margin);
    let overlap = target.intersection(&root)?;
    let area = target.area();
    if area <= 0.0 {
        return Some(1.0);
    }
    Some((overlap.area() / area).clamp(0.0, 1.0))
}
