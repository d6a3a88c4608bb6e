//! Listing browser: result list on the left, selected detail on the right.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::types::Listing;

/// What the host should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingsAction {
    None,
    /// Fetch the next/previous result page.
    NextPage,
    PrevPage,
    /// Flip the favorite state of the selected listing.
    ToggleFavorite(i64),
    /// Start (or resume) a chat about the selected listing.
    OpenChat(i64),
    /// Open the listing creation wizard.
    CreateListing,
    /// Open the dealer application wizard (or its status screen).
    ApplyAsDealer,
    /// Open the notification feed.
    OpenNotifications,
}

pub struct ListingsView {
    listings: Vec<Listing>,
    list_state: ListState,
    pub page: u32,
    pub total_count: u64,
    /// Set while a fetch is in flight.
    pub loading: bool,
}

impl Default for ListingsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingsView {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            listings: Vec::new(),
            list_state,
            page: 1,
            total_count: 0,
            loading: true,
        }
    }

    pub fn set_listings(&mut self, listings: Vec<Listing>, total_count: u64) {
        self.listings = listings;
        self.total_count = total_count;
        self.loading = false;
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some(selected.min(self.listings.len().saturating_sub(1))));
    }

    pub fn selected(&self) -> Option<&Listing> {
        self.list_state
            .selected()
            .and_then(|i| self.listings.get(i))
    }

    /// Patch the favorite flag locally after a toggle round-trips.
    pub fn set_favorited(&mut self, listing_id: i64, favorited: bool) {
        if let Some(listing) = self
            .listings
            .iter_mut()
            .find(|l| l.listing_id == listing_id)
        {
            listing.is_favorited = Some(favorited);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ListingsAction {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.listings.len();
                if len > 0 {
                    let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
                    self.list_state.select(Some(i));
                }
                ListingsAction::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.listings.len();
                if len > 0 {
                    let i = self
                        .list_state
                        .selected()
                        .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
                    self.list_state.select(Some(i));
                }
                ListingsAction::None
            }
            KeyCode::Right | KeyCode::Char(']') => ListingsAction::NextPage,
            KeyCode::Left | KeyCode::Char('[') => {
                if self.page > 1 {
                    ListingsAction::PrevPage
                } else {
                    ListingsAction::None
                }
            }
            KeyCode::Char('f') => self
                .selected()
                .map_or(ListingsAction::None, |l| {
                    ListingsAction::ToggleFavorite(l.listing_id)
                }),
            KeyCode::Char('c') => self
                .selected()
                .map_or(ListingsAction::None, |l| {
                    ListingsAction::OpenChat(l.listing_id)
                }),
            KeyCode::Char('n') => ListingsAction::CreateListing,
            KeyCode::Char('d') => ListingsAction::ApplyAsDealer,
            KeyCode::Char('o') => ListingsAction::OpenNotifications,
            _ => ListingsAction::None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let title = if self.loading {
            " Listings (loading...) ".to_string()
        } else {
            format!(" Listings - page {} of {} results ", self.page, self.total_count)
        };

        let items: Vec<ListItem> = self
            .listings
            .iter()
            .map(|listing| {
                let fav = match listing.is_favorited {
                    Some(true) => "♥ ",
                    _ => "  ",
                };
                let line = Line::from(vec![
                    Span::styled(fav, Style::default().fg(Color::Red)),
                    Span::raw(listing.listing_title.clone()),
                    Span::styled(
                        format!("  {} €{}", listing.list_location, listing.listing_price),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        self.render_detail(frame, chunks[1]);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Detail ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(listing) = self.selected() else {
            frame.render_widget(
                Paragraph::new("No listing selected").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                listing.listing_title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "€{}  ·  {}  ·  {}",
                listing.listing_price,
                listing.list_location,
                listing.listing_status.label()
            )),
            Line::from(format!(
                "Seller: {}  ·  {} views",
                listing.seller.full_name, listing.views
            )),
            Line::from(""),
        ];
        lines.extend(listing.list_description.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[f] favorite  [c] chat  [n] new listing  [d] dealer application  [o] notifications",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn listing(id: i64, title: &str) -> Listing {
        serde_json::from_value(serde_json::json!({
            "listing_id": id,
            "listing_title": title,
            "list_description": "",
            "listing_price": "100.00",
            "list_location": "Paphos",
            "listing_status": "active",
            "createdat": "2025-05-01T10:00:00Z",
            "updatedat": "2025-05-01T10:00:00Z",
            "category": { "cat_id": 1, "cat_name": "Cars", "slug": "cars" },
            "seller": {
                "userid": 7, "user_firstname": "S", "user_lastname": "T",
                "full_name": "S T", "email": "s@example.com",
                "user_role": "seller", "date_joined": "2025-01-01T00:00:00Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut view = ListingsView::new();
        view.set_listings(vec![listing(1, "a"), listing(2, "b")], 2);

        view.handle_key(key(KeyCode::Up));
        assert_eq!(view.selected().unwrap().listing_id, 2);
        view.handle_key(key(KeyCode::Down));
        assert_eq!(view.selected().unwrap().listing_id, 1);
    }

    #[test]
    fn favorite_key_targets_selected_listing() {
        let mut view = ListingsView::new();
        view.set_listings(vec![listing(1, "a"), listing(2, "b")], 2);
        view.handle_key(key(KeyCode::Down));

        assert_eq!(
            view.handle_key(key(KeyCode::Char('f'))),
            ListingsAction::ToggleFavorite(2)
        );
        view.set_favorited(2, true);
        assert_eq!(view.selected().unwrap().is_favorited, Some(true));
    }

    #[test]
    fn prev_page_ignored_on_first_page() {
        let mut view = ListingsView::new();
        assert_eq!(view.handle_key(key(KeyCode::Left)), ListingsAction::None);
        view.page = 3;
        assert_eq!(view.handle_key(key(KeyCode::Left)), ListingsAction::PrevPage);
    }

    #[test]
    fn notification_key_opens_the_feed() {
        let mut view = ListingsView::new();
        assert_eq!(
            view.handle_key(key(KeyCode::Char('o'))),
            ListingsAction::OpenNotifications
        );
    }

    #[test]
    fn keys_on_empty_list_do_not_panic() {
        let mut view = ListingsView::new();
        assert_eq!(view.handle_key(key(KeyCode::Down)), ListingsAction::None);
        assert_eq!(view.handle_key(key(KeyCode::Char('f'))), ListingsAction::None);
        assert!(view.selected().is_none());
    }

    #[test]
    fn set_listings_clamps_stale_selection() {
        let mut view = ListingsView::new();
        view.set_listings(vec![listing(1, "a"), listing(2, "b"), listing(3, "c")], 3);
        view.handle_key(key(KeyCode::Up)); // select last
        view.set_listings(vec![listing(1, "a")], 1);
        assert_eq!(view.selected().unwrap().listing_id, 1);
    }
}
