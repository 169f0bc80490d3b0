//! Gallery lightbox navigation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    images: Vec<String>,
    open: Option<usize>,
}

impl Lightbox {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, open: None }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.open
    }

    pub fn current(&self) -> Option<&str> {
        self.open.and_then(|i| self.images.get(i)).map(String::as_str)
    }

    pub fn open(&mut self, index: usize) -> Result<&str> {
        if index >= self.images.len() {
            return Err(Error::OutOfRange { index, len: self.images.len() });
        }
        self.open = Some(index);
        Ok(&self.images[index])
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Advance with wrap-around. No-op while closed.
    pub fn next(&mut self) -> Option<&str> {
        let len = self.images.len();
        self.open = self.open.map(|i| (i + 1) % len);
        self.current()
    }

    pub fn prev(&mut self) -> Option<&str> {
        let len = self.images.len();
        self.open = self.open.map(|i| (i + len - 1) % len);
        self.current()
    }

    /// Keyboard navigation; keys are ignored while closed.
    pub fn handle_key(&mut self, key: Key) {
        if !self.is_open() {
            return;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => {
                self.prev();
            }
            Key::ArrowRight => {
                self.next();
            }
            Key::Other => {}
        }
    }
}
