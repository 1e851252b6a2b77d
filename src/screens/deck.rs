//! Deck screen - the navigable list of copyable links.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::LinkList;

use super::{Screen, ScreenAction};

/// List of links; Enter (or y/c) copies the selected URL.
pub struct DeckScreen {
    links: LinkList,
    list_state: ListState,
}

impl DeckScreen {
    pub fn new(links: LinkList) -> Self {
        let mut list_state = ListState::default();
        if !links.is_empty() {
            list_state.select(Some(0));
        }
        Self { links, list_state }
    }

    /// Total number of links in the deck.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// URL of the currently selected link.
    fn selected_url(&self) -> Option<&str> {
        self.list_state
            .selected()
            .and_then(|i| self.links.links.get(i))
            .map(|link| link.url.as_str())
    }

    fn select_next(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.links.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        if self.links.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(prev));
    }

    fn select_first(&mut self) {
        if !self.links.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.links.is_empty() {
            self.list_state.select(Some(self.links.len() - 1));
        }
    }
}

#[async_trait]
impl Screen for DeckScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .links
            .links
            .iter()
            .map(|link| {
                let mut spans = vec![Span::raw(link.display_label().to_string())];
                if link.label.is_some() {
                    spans.push(Span::styled(
                        format!("  {}", link.url),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Links"))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    async fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next();
                ScreenAction::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev();
                ScreenAction::None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select_first();
                ScreenAction::None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select_last();
                ScreenAction::None
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('c') => {
                match self.selected_url() {
                    Some(url) => ScreenAction::Copy {
                        url: url.to_string(),
                    },
                    None => ScreenAction::None,
                }
            }
            _ => ScreenAction::None,
        }
    }
}
