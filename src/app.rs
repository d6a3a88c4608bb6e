//! TUI host: owns the screens, the API client, and the unread poller,
//! and routes key events to whichever screen is active.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::{ApiClient, ApiError, DealerApplicationState, ListingFilter};
use crate::config::Config;
use crate::services::{PollerHandle, UnreadEvent, UnreadPoller};
use crate::session::Session;
use crate::ui::forms::{DealerApplicationForm, FormResult, ListingForm};
use crate::ui::views::{
    DealerStatusAction, DealerStatusView, ListingsAction, ListingsView, MessagesAction,
    MessagesView, NotificationsAction, NotificationsView,
};
use crate::ui::TerminalGuard;

/// Which screen owns the keyboard.
enum Screen {
    Listings,
    Messages,
    Notifications,
    CreateListing,
    DealerApplication,
    /// Application already on record; status is shown instead of the wizard.
    DealerStatus(DealerStatusView),
}

pub struct App {
    config: Config,
    client: Arc<ApiClient>,
    session: Session,
    screen: Screen,
    listings_view: ListingsView,
    messages_view: MessagesView,
    notifications_view: NotificationsView,
    listing_form: ListingForm,
    dealer_form: DealerApplicationForm,
    unread_notifications: u32,
    unread_chats: u32,
    /// Set when the last poll failed; cleared on the next success.
    poll_degraded: bool,
    status_message: Option<String>,
    event_rx: mpsc::UnboundedReceiver<UnreadEvent>,
    _poller: PollerHandle,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, session: Session) -> Self {
        let client = Arc::new(
            ApiClient::new(&config.api.base_url)
                .with_timeout(Duration::from_secs(config.api.request_timeout_secs))
                .with_access_token(session.access_token()),
        );

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let poller = UnreadPoller::new(
            client.clone(),
            Duration::from_secs(config.polling.notifications_interval_secs),
            Duration::from_secs(config.polling.chats_interval_secs),
            event_tx,
        )
        .spawn();

        let own_user_id = session.user.user_id;
        Self {
            config,
            client,
            session,
            screen: Screen::Listings,
            listings_view: ListingsView::new(),
            messages_view: MessagesView::new(own_user_id),
            notifications_view: NotificationsView::new(),
            listing_form: ListingForm::new(),
            dealer_form: DealerApplicationForm::new(),
            unread_notifications: 0,
            unread_chats: 0,
            poll_degraded: false,
            status_message: None,
            event_rx,
            _poller: poller,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        info!(user = %self.session.user.email, "session started");
        self.refresh_listings().await;

        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        while !self.should_quit {
            self.drain_poller_events();

            terminal.draw(|f| self.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                    }
                }
            }
        }

        Ok(())
    }

    fn drain_poller_events(&mut self) {
        while let Ok(ev) = self.event_rx.try_recv() {
            match ev {
                UnreadEvent::Notifications(n) => {
                    self.unread_notifications = n;
                    self.poll_degraded = false;
                }
                UnreadEvent::Chats(n) => {
                    self.unread_chats = n;
                    self.poll_degraded = false;
                }
                UnreadEvent::PollFailed(_) => self.poll_degraded = true,
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match &mut self.screen {
            Screen::Listings => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                    return;
                }
                let action = self.listings_view.handle_key(key);
                self.handle_listings_action(action).await;
            }
            Screen::Messages => {
                let action = self.messages_view.handle_key(key);
                self.handle_messages_action(action).await;
            }
            Screen::Notifications => {
                let action = self.notifications_view.handle_key(key);
                self.handle_notifications_action(action).await;
            }
            Screen::CreateListing => match self.listing_form.handle_key(key) {
                FormResult::Continue => {}
                FormResult::Exit => self.screen = Screen::Listings,
                FormResult::Submit => self.submit_listing().await,
            },
            Screen::DealerApplication => match self.dealer_form.handle_key(key) {
                FormResult::Continue => {}
                FormResult::Exit => self.screen = Screen::Listings,
                FormResult::Submit => self.submit_dealer_application().await,
            },
            Screen::DealerStatus(view) => {
                if view.handle_key(key) == DealerStatusAction::Close {
                    self.screen = Screen::Listings;
                }
            }
        }
    }

    async fn handle_listings_action(&mut self, action: ListingsAction) {
        match action {
            ListingsAction::None => {}
            ListingsAction::NextPage => {
                self.listings_view.page += 1;
                self.refresh_listings().await;
            }
            ListingsAction::PrevPage => {
                self.listings_view.page -= 1;
                self.refresh_listings().await;
            }
            ListingsAction::ToggleFavorite(listing_id) => {
                match self.client.toggle_favorite(listing_id).await {
                    Ok(favorited) => self.listings_view.set_favorited(listing_id, favorited),
                    Err(err) => self.report_error("favorite", err),
                }
            }
            ListingsAction::OpenChat(listing_id) => {
                match self.client.create_chat(listing_id).await {
                    Ok(chat) => {
                        let chat_id = chat.chat_id;
                        self.open_messages().await;
                        self.select_chat(chat_id).await;
                    }
                    Err(err) => self.report_error("chat", err),
                }
            }
            ListingsAction::CreateListing => {
                self.listing_form.reset();
                match self.client.categories().await {
                    Ok(categories) => self.listing_form.set_categories(categories),
                    Err(err) => self.report_error("categories", err),
                }
                self.screen = Screen::CreateListing;
            }
            ListingsAction::ApplyAsDealer => {
                // An account with an application on record sees its status,
                // not a fresh wizard.
                match self.client.dealer_application_status().await {
                    Ok(DealerApplicationState::Submitted(application)) => {
                        self.screen = Screen::DealerStatus(DealerStatusView::new(application));
                    }
                    Ok(DealerApplicationState::NotSubmitted) => {
                        self.dealer_form.reset();
                        self.screen = Screen::DealerApplication;
                    }
                    Err(err) => self.report_error("dealer status", err),
                }
            }
            ListingsAction::OpenNotifications => self.open_notifications().await,
        }
    }

    async fn handle_notifications_action(&mut self, action: NotificationsAction) {
        match action {
            NotificationsAction::None => {}
            NotificationsAction::Close => self.screen = Screen::Listings,
            NotificationsAction::MarkRead(id) => {
                match self.client.mark_notification_read(id).await {
                    Ok(()) => self.refresh_notifications().await,
                    Err(err) => self.report_error("mark read", err),
                }
            }
            NotificationsAction::MarkAllRead => {
                match self.client.mark_all_notifications_read().await {
                    Ok(()) => self.refresh_notifications().await,
                    Err(err) => self.report_error("mark all read", err),
                }
            }
            NotificationsAction::Delete(id) => match self.client.delete_notification(id).await {
                Ok(()) => self.refresh_notifications().await,
                Err(err) => self.report_error("delete notification", err),
            },
            NotificationsAction::ClearRead => {
                match self.client.clear_read_notifications().await {
                    Ok(()) => self.refresh_notifications().await,
                    Err(err) => self.report_error("clear read", err),
                }
            }
        }
    }

    async fn open_notifications(&mut self) {
        match self.client.notifications().await {
            Ok(feed) => {
                self.unread_notifications = feed.unread_count;
                self.notifications_view.set_feed(feed);
                self.screen = Screen::Notifications;
            }
            Err(err) => self.report_error("notifications", err),
        }
    }

    async fn refresh_notifications(&mut self) {
        match self.client.notifications().await {
            Ok(feed) => {
                self.unread_notifications = feed.unread_count;
                self.notifications_view.set_feed(feed);
            }
            Err(err) => self.report_error("notifications", err),
        }
    }

    async fn handle_messages_action(&mut self, action: MessagesAction) {
        match action {
            MessagesAction::None => {}
            MessagesAction::Close => self.screen = Screen::Listings,
            MessagesAction::SelectChat(chat_id) => self.select_chat(chat_id).await,
            MessagesAction::Send { chat_id, content } => {
                match self.client.send_message(chat_id, &content).await {
                    Ok(message) => self.messages_view.push_message(message),
                    Err(err) => self.report_error("send", err),
                }
            }
        }
    }

    async fn open_messages(&mut self) {
        match self.client.chats().await {
            Ok(chats) => {
                self.messages_view.set_chats(chats);
                self.screen = Screen::Messages;
            }
            Err(err) => self.report_error("chats", err),
        }
    }

    async fn select_chat(&mut self, chat_id: i64) {
        match self.client.chat_messages(chat_id).await {
            Ok(messages) => self.messages_view.set_messages(messages),
            Err(err) => self.report_error("messages", err),
        }
        if let Err(err) = self.client.mark_chat_read(chat_id).await {
            error!(%err, chat_id, "mark read failed");
        }
    }

    async fn refresh_listings(&mut self) {
        self.listings_view.loading = true;
        let filter = ListingFilter {
            page: Some(self.listings_view.page),
            page_size: Some(self.config.ui.listings_page_size),
            ..Default::default()
        };
        match self.client.listings(&filter).await {
            Ok(page) => self.listings_view.set_listings(page.results, page.count),
            Err(err) => {
                self.listings_view.loading = false;
                self.report_error("listings", err);
            }
        }
    }

    async fn submit_listing(&mut self) {
        let req = self.listing_form.request();
        match self.client.create_listing(&req).await {
            Ok(listing) => {
                self.status_message = Some(format!("Listing \"{}\" created", listing.listing_title));
                self.screen = Screen::Listings;
                self.refresh_listings().await;
            }
            Err(err) => self.report_error("create listing", err),
        }
    }

    async fn submit_dealer_application(&mut self) {
        let req = self.dealer_form.request();
        match self.client.submit_dealer_application(&req).await {
            Ok(application) => {
                self.status_message = Some(format!(
                    "Dealer application submitted ({})",
                    application.status.label()
                ));
                self.screen = Screen::Listings;
            }
            Err(err) => self.report_error("dealer application", err),
        }
    }

    fn report_error(&mut self, what: &str, err: ApiError) {
        error!(%err, what, "request failed");
        self.status_message = Some(format!("{what}: {err}"));
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        match &mut self.screen {
            Screen::Listings => self.listings_view.render(frame, chunks[0]),
            Screen::Messages => self.messages_view.render(frame, chunks[0]),
            Screen::Notifications => self.notifications_view.render(frame, chunks[0]),
            Screen::CreateListing => self.listing_form.render(frame, chunks[0]),
            Screen::DealerApplication => self.dealer_form.render(frame, chunks[0]),
            Screen::DealerStatus(view) => view.render(frame, chunks[0]),
        }

        self.render_status_bar(frame, chunks[1]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.session.user.full_name),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw(format!(
                "  🔔 {}  ✉ {}",
                self.unread_notifications, self.unread_chats
            )),
        ];
        if self.poll_degraded {
            spans.push(Span::styled(
                "  (offline)",
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(ref msg) = self.status_message {
            spans.push(Span::styled(
                format!("  {msg}"),
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
