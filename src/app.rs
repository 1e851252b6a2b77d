//! Main application state and event loop.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::Config;
use crate::models::LinkList;
use crate::screens::{DeckScreen, Screen, ScreenAction};
use crate::services::clipboard::{self, ClipboardWriter, SystemClipboard};
use crate::services::toast::{copied_message, Toast};

/// Application state.
pub struct App {
    should_quit: bool,
    deck_screen: DeckScreen,
    toast: Toast,
    clipboard: Box<dyn ClipboardWriter>,

    // Status bar info shown while no toast is visible
    status_message: String,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: &Config, links: LinkList) -> Self {
        Self::with_writer(config, links, Box::new(SystemClipboard))
    }

    /// Create an application instance with a specific clipboard writer.
    fn with_writer(config: &Config, links: LinkList, clipboard: Box<dyn ClipboardWriter>) -> Self {
        let deck_screen = DeckScreen::new(links);
        let status_message = format!("{} links loaded", deck_screen.link_count());

        Self {
            should_quit: false,
            deck_screen,
            toast: Toast::new(config.toast.duration()),
            clipboard,
            status_message,
        }
    }

    /// Run the application.
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    /// Main event loop.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Revert the toast once its deadline has passed
            self.toast.tick();

            // Draw UI
            terminal.draw(|f| self.draw(f))?;

            // Poll for events with timeout
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match (key.modifiers, key.code) {
                        (KeyModifiers::CONTROL, KeyCode::Char('c'))
                        | (_, KeyCode::Char('q')) => {
                            self.should_quit = true;
                        }
                        _ => match self.deck_screen.handle_key(key).await {
                            ScreenAction::Copy { url } => self.copy_url(&url).await,
                            ScreenAction::None => {}
                        },
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Copy a URL and show the confirmation toast. Failures are logged and
    /// otherwise swallowed; the toast stays hidden.
    async fn copy_url(&mut self, url: &str) {
        match clipboard::copy_with(self.clipboard.as_ref(), url).await {
            Ok(outcome) => {
                debug!(?outcome, url, "copied");
                self.toast.show(copied_message(url));
            }
            Err(e) => error!(url, "{e}"),
        }
    }

    /// Draw the UI.
    fn draw(&mut self, f: &mut ratatui::Frame) {
        use ratatui::layout::{Constraint, Direction, Layout};
        use ratatui::style::{Color, Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Deck
                Constraint::Length(1), // Toast / status line
            ])
            .split(f.area());

        self.deck_screen.draw(f, chunks[0]);

        // The status line doubles as the toast area: the confirmation takes
        // over while visible, then the hints come back.
        let status = if self.toast.visible() {
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.toast.message().to_string(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        } else {
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(&self.status_message, Style::default().fg(Color::Gray)),
                Span::raw(" │ "),
                Span::styled("j/k", Style::default().fg(Color::DarkGray)),
                Span::styled(" Nav", Style::default().fg(Color::Gray)),
                Span::raw(" │ "),
                Span::styled("Enter", Style::default().fg(Color::DarkGray)),
                Span::styled(" Copy", Style::default().fg(Color::Gray)),
                Span::raw(" │ "),
                Span::styled("q", Style::default().fg(Color::DarkGray)),
                Span::styled(" Quit", Style::default().fg(Color::Gray)),
            ]))
        };
        f.render_widget(status, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::WriteError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingWriter {
        writes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ClipboardWriter for CountingWriter {
        async fn write(&self, _text: &str) -> Result<(), WriteError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RejectingWriter;

    #[async_trait]
    impl ClipboardWriter for RejectingWriter {
        async fn write(&self, _text: &str) -> Result<(), WriteError> {
            Err(WriteError::Rejected("permission denied".to_string()))
        }
    }

    fn app_with(clipboard: Box<dyn ClipboardWriter>) -> App {
        App::with_writer(&Config::default(), LinkList::default(), clipboard)
    }

    #[tokio::test(start_paused = true)]
    async fn successful_copy_shows_the_toast_exactly_once() {
        let writes = Arc::new(AtomicUsize::new(0));
        let mut app = app_with(Box::new(CountingWriter {
            writes: writes.clone(),
        }));

        app.copy_url("https://example.com/a").await;

        assert_eq!(writes.load(Ordering::SeqCst), 1);
        assert!(app.toast.visible());
        assert_eq!(
            app.toast.message(),
            "URL copied to clipboard: https://example.com/a"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_copy_leaves_the_toast_hidden() {
        let mut app = app_with(Box::new(RejectingWriter));

        app.copy_url("https://example.com/a").await;

        assert!(!app.toast.visible());
        assert_eq!(app.toast.message(), "");
    }
}
