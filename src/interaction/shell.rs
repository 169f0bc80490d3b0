//! Smooth-scroll proxy and custom cursor, owned by one shell context.
//!
//! The context is created on mount and torn down on unmount; consumers borrow
//! it instead of reaching for globals.

use crate::{Error, Result, Viewport};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Fraction of the remaining scroll distance covered per tick
    pub scroll_lerp: f64,
    /// Fraction of the remaining cursor distance covered per tick
    pub cursor_lerp: f64,
    /// Disable easing entirely (reduced-motion preference)
    pub reduced_motion: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            scroll_lerp: 0.1,
            cursor_lerp: 0.2,
            reduced_motion: false,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("scroll_lerp", self.scroll_lerp), ("cursor_lerp", self.cursor_lerp)] {
            if !(v > 0.0 && v <= 1.0) {
                return Err(Error::ConfigError(format!("{} must be within (0, 1], got {}", name, v)));
            }
        }
        Ok(())
    }
}

const SNAP_PX: f64 = 0.5;

fn approach(current: f64, target: f64, factor: f64) -> f64 {
    let next = current + (target - current) * factor;
    if (target - next).abs() < SNAP_PX {
        target
    } else {
        next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    max: f64,
    lerp: f64,
}

impl SmoothScroll {
    fn new(max: f64, lerp: f64) -> Self {
        Self { current: 0.0, target: 0.0, max: max.max(0.0), lerp }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    fn scroll_to(&mut self, y: f64) {
        self.target = y.clamp(0.0, self.max);
    }

    fn tick(&mut self) -> f64 {
        self.current = approach(self.current, self.target, self.lerp);
        self.current
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pointer: (f64, f64),
    follower: (f64, f64),
    hovering: bool,
    lerp: f64,
}

impl Cursor {
    fn new(lerp: f64) -> Self {
        Self { pointer: (0.0, 0.0), follower: (0.0, 0.0), hovering: false, lerp }
    }

    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    /// Eased position trailing the pointer.
    pub fn follower(&self) -> (f64, f64) {
        self.follower
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    fn tick(&mut self) {
        self.follower = (
            approach(self.follower.0, self.pointer.0, self.lerp),
            approach(self.follower.1, self.pointer.1, self.lerp),
        );
    }
}

#[derive(Debug)]
pub struct ShellContext {
    viewport: Viewport,
    scroll: SmoothScroll,
    cursor: Cursor,
    mounted: bool,
}

impl ShellContext {
    pub fn mount(config: ShellConfig, viewport: Viewport, document_height: f64) -> Result<Self> {
        config.validate()?;
        let (scroll_lerp, cursor_lerp) = if config.reduced_motion {
            (1.0, 1.0)
        } else {
            (config.scroll_lerp, config.cursor_lerp)
        };
        let max = document_height - viewport.height as f64;
        debug!("shell mounted (max scroll {})", max.max(0.0));
        Ok(Self {
            viewport,
            scroll: SmoothScroll::new(max, scroll_lerp),
            cursor: Cursor::new(cursor_lerp),
            mounted: true,
        })
    }

    /// Release the context. Further calls fail with `NotMounted`.
    pub fn unmount(&mut self) {
        if self.mounted {
            debug!("shell unmounted");
        }
        self.mounted = false;
        self.scroll = SmoothScroll::new(0.0, self.scroll.lerp);
        self.cursor = Cursor::new(self.cursor.lerp);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn check(&self) -> Result<()> {
        if self.mounted {
            Ok(())
        } else {
            Err(Error::NotMounted)
        }
    }

    pub fn scroll(&self) -> Result<&SmoothScroll> {
        self.check()?;
        Ok(&self.scroll)
    }

    pub fn cursor(&self) -> Result<&Cursor> {
        self.check()?;
        Ok(&self.cursor)
    }

    pub fn scroll_to(&mut self, y: f64) -> Result<()> {
        self.check()?;
        self.scroll.scroll_to(y);
        Ok(())
    }

    /// Apply a wheel delta to the scroll target.
    pub fn scroll_by(&mut self, delta: f64) -> Result<()> {
        self.check()?;
        let target = self.scroll.target + delta;
        self.scroll.scroll_to(target);
        Ok(())
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, over_interactive: bool) -> Result<()> {
        self.check()?;
        self.cursor.pointer = (
            x.clamp(0.0, self.viewport.width as f64),
            y.clamp(0.0, self.viewport.height as f64),
        );
        self.cursor.hovering = over_interactive;
        Ok(())
    }

    /// Advance one animation frame; returns the rendered scroll offset.
    pub fn tick(&mut self) -> Result<f64> {
        self.check()?;
        self.cursor.tick();
        Ok(self.scroll.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> ShellContext {
        ShellContext::mount(ShellConfig::default(), Viewport::default(), 3000.0).unwrap()
    }

    #[test]
    fn scroll_eases_toward_target_and_settles() {
        let mut s = shell();
        s.scroll_to(1000.0).unwrap();
        let first = s.tick().unwrap();
        assert!((first - 100.0).abs() < 1e-9);
        for _ in 0..200 {
            s.tick().unwrap();
        }
        assert!(s.scroll().unwrap().is_settled());
        assert_eq!(s.scroll().unwrap().current(), 1000.0);
    }

    #[test]
    fn scroll_target_is_clamped_to_document() {
        let mut s = shell();
        s.scroll_by(-50.0).unwrap();
        assert_eq!(s.scroll().unwrap().target(), 0.0);
        s.scroll_by(10_000.0).unwrap();
        assert_eq!(s.scroll().unwrap().target(), 3000.0 - 720.0);
    }

    #[test]
    fn reduced_motion_jumps_immediately() {
        let cfg = ShellConfig { reduced_motion: true, ..Default::default() };
        let mut s = ShellContext::mount(cfg, Viewport::default(), 3000.0).unwrap();
        s.scroll_to(500.0).unwrap();
        assert_eq!(s.tick().unwrap(), 500.0);
    }

    #[test]
    fn cursor_follower_trails_pointer() {
        let mut s = shell();
        s.pointer_moved(100.0, 50.0, true).unwrap();
        s.tick().unwrap();
        let c = s.cursor().unwrap();
        assert!(c.is_hovering());
        assert!((c.follower().0 - 20.0).abs() < 1e-9);
        assert_eq!(c.pointer(), (100.0, 50.0));
    }

    #[test]
    fn unmounted_context_rejects_use() {
        let mut s = shell();
        s.unmount();
        assert!(matches!(s.tick(), Err(Error::NotMounted)));
        assert!(matches!(s.scroll_to(10.0), Err(Error::NotMounted)));
        assert!(s.cursor().is_err());
    }

    #[test]
    fn invalid_lerp_is_rejected() {
        let cfg = ShellConfig { scroll_lerp: 0.0, ..Default::default() };
        assert!(ShellContext::mount(cfg, Viewport::default(), 100.0).is_err());
    }
}
