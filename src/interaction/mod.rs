//! Page-level interaction utilities: smooth scroll and cursor shell,
//! lightbox navigation, and scroll/time driven motion.
//!
//! Each piece is a plain state machine stepped by the host's event loop, so
//! tests drive them deterministically without a rendering environment.

pub mod lightbox;
pub mod motion;
pub mod shell;

pub use lightbox::{Key, Lightbox};
pub use motion::{AnimatedCounter, PinScroll, Reveal};
pub use shell::{Cursor, ShellConfig, ShellContext, SmoothScroll};
