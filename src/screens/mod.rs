//! TUI screens.

pub mod deck;

pub use deck::DeckScreen;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Action returned by screen key handlers.
#[derive(Debug)]
pub enum ScreenAction {
    /// No action needed.
    None,
    /// Copy the given URL to the clipboard.
    Copy { url: String },
}

/// Trait for screen implementations.
#[async_trait]
pub trait Screen {
    /// Draw the screen.
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle a key event.
    async fn handle_key(&mut self, key: KeyEvent) -> ScreenAction;
}
