//! Libris TUI - terminal front-end for book search and wishlist management
//!
//! Two tabs (search results and wishlist), a query input, a detail pane and a
//! dismissible banner. Backend calls run on spawned tasks; their outcomes come
//! back over a channel and are applied to the client state in the main loop.

use color_eyre::{eyre::Result, install};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use libris::backends::HttpBookApi;
use libris::client::perform;
use libris::prelude::*;

// Color scheme
mod theme {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Rgb(75, 85, 255); // Blue
    pub const ACCENT: Color = Color::Rgb(255, 152, 0); // Orange

    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color = Color::Rgb(189, 189, 189);
    pub const TEXT_MUTED: Color = Color::Rgb(117, 117, 117);

    pub const BORDER: Color = Color::Rgb(66, 66, 66);
    pub const BORDER_FOCUS: Color = PRIMARY;
}

struct App {
    state: ClientState,
    should_quit: bool,

    // Query input
    query: String,
    input_active: bool,

    // List selection on the active tab
    list_state: ListState,

    api_url: String,

    // Backend calls report back through this channel
    outcome_sender: mpsc::UnboundedSender<Event>,
    outcome_receiver: mpsc::UnboundedReceiver<Event>,

    api: Arc<HttpBookApi>,
}

impl App {
    fn new(api: HttpBookApi, api_url: String) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::unbounded_channel();

        Self {
            state: ClientState::new(),
            should_quit: false,
            query: String::new(),
            input_active: false,
            list_state: ListState::default(),
            api_url,
            outcome_sender,
            outcome_receiver,
            api: Arc::new(api),
        }
    }

    /// Applies an event and starts the backend calls it asks for.
    fn dispatch(&mut self, event: Event) {
        for effect in self.state.update(event) {
            self.spawn_effect(effect);
        }
        self.clamp_selection();
    }

    fn spawn_effect(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let sender = self.outcome_sender.clone();
        tokio::spawn(async move {
            let outcome = perform(api.as_ref(), effect).await;
            let _ = sender.send(outcome);
        });
    }

    fn records(&self) -> Vec<BookRecord> {
        self.state.visible_records()
    }

    fn selected_record(&self) -> Option<BookRecord> {
        let selected = self.list_state.selected()?;
        self.records().into_iter().nth(selected)
    }

    fn clamp_selection(&mut self) {
        let len = self.records().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn move_selection(&mut self, up: bool) {
        let len = self.records().len();
        if len == 0 {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        let next = if up {
            selected.saturating_sub(1)
        } else {
            (selected + 1).min(len - 1)
        };
        self.list_state.select(Some(next));
    }

    fn handle_key_event(&mut self, key: KeyCode) {
        if self.input_active {
            self.handle_input_keys(key);
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Char('/') => self.input_active = true,
            KeyCode::Tab => {
                let tab = self.state.active_tab().other();
                self.list_state.select(None);
                self.dispatch(Event::TabSelected(tab));
            }
            KeyCode::Char('r') if self.state.active_tab() == Tab::Wishlist => {
                self.dispatch(Event::TabSelected(Tab::Wishlist));
            }
            KeyCode::Up => self.move_selection(true),
            KeyCode::Down => self.move_selection(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(record) = self.selected_record() {
                    // Disabled and pending controls are inert
                    if matches!(
                        self.state.toggle_action(&record),
                        ToggleAction::Add | ToggleAction::Remove
                    ) {
                        self.dispatch(Event::ToggleRequested(record));
                    }
                }
            }
            KeyCode::Char('x') => self.dispatch(Event::BannerDismissed),
            _ => {}
        }
    }

    fn handle_input_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.input_active = false;
                self.list_state.select(None);
                self.dispatch(Event::QuerySubmitted(self.query.clone()));
            }
            KeyCode::Esc => self.input_active = false,
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Char(c) => self.query.push(c),
            _ => {}
        }
    }
}

// Rendering implementation
impl App {
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Length(3), // Query input
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Banner
                Constraint::Length(1), // Key hints
            ])
            .split(f.size());

        self.render_tabs(f, chunks[0]);
        self.render_input(f, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        self.render_list(f, body[0]);
        self.render_details(f, body[1]);
        self.render_banner(f, chunks[3]);
        self.render_hints(f, chunks[4]);
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let selected = match self.state.active_tab() {
            Tab::Search => 0,
            Tab::Wishlist => 1,
        };

        let tabs = Tabs::new(vec![Tab::Search.label(), Tab::Wishlist.label()])
            .select(selected)
            .style(Style::default().fg(theme::TEXT_SECONDARY))
            .highlight_style(
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(format!("Libris ({})", self.api_url))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER)),
            );

        f.render_widget(tabs, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let title = if self.state.is_loading() {
            "Searching..."
        } else {
            "Search Query (press 's' or '/' to edit)"
        };

        let input = Paragraph::new(self.query.as_str())
            .style(if self.input_active {
                Style::default().fg(theme::PRIMARY)
            } else {
                Style::default().fg(theme::TEXT_SECONDARY)
            })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if self.input_active {
                        Style::default().fg(theme::BORDER_FOCUS)
                    } else {
                        Style::default().fg(theme::BORDER)
                    })
                    .title(title),
            );

        f.render_widget(input, area);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let records = self.records();
        let title = format!("{} ({})", self.state.active_tab().label(), records.len());

        if records.is_empty() {
            let hint = match self.state.active_tab() {
                Tab::Search => "No results. Press 's' or '/' to search.",
                Tab::Wishlist => "Your wishlist is empty.",
            };
            let placeholder = Paragraph::new(hint)
                .style(Style::default().fg(theme::TEXT_MUTED))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme::BORDER))
                        .title(title),
                )
                .alignment(Alignment::Center);
            f.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = records
            .iter()
            .map(|record| {
                let book = DisplayBook::from(record);
                let mut detail = format_stars(book.rating, book.ratings_count);
                detail.spans.insert(0, Span::raw("   "));
                detail.spans.push(Span::raw(" "));
                detail.spans.push(format_toggle(self.state.toggle_action(record)));
                ListItem::new(vec![format_book_title(&book), detail])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .bg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            );

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_details(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER));

        let Some(record) = self.selected_record() else {
            let empty = Paragraph::new("Nothing selected")
                .style(Style::default().fg(theme::TEXT_MUTED))
                .block(block);
            f.render_widget(empty, area);
            return;
        };

        let book = DisplayBook::from(&record);
        let width = area.width.saturating_sub(10) as usize;
        let authors = if book.authors_text.is_empty() {
            "Unknown".to_string()
        } else {
            book.authors_text.clone()
        };

        let mut rating = format_stars(book.rating, book.ratings_count);
        rating
            .spans
            .insert(0, Span::styled("Rating:  ", Style::default().fg(theme::ACCENT)));

        let lines = vec![
            Line::from(Span::styled(
                book.title.clone(),
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Authors: ", Style::default().fg(theme::ACCENT)),
                Span::raw(authors),
            ]),
            Line::from(vec![
                Span::styled("Cover:   ", Style::default().fg(theme::ACCENT)),
                Span::raw(truncate_text(book.thumbnail_label(), width)),
            ]),
            rating,
            Line::from(""),
            Line::from(format_toggle(self.state.toggle_action(&record))),
        ];

        let details = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });

        f.render_widget(details, area);
    }

    fn render_banner(&self, f: &mut Frame, area: Rect) {
        let content = match self.state.banner() {
            Some(banner) => format_banner(banner),
            None => Line::from(""),
        };

        let banner = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .title("x to dismiss"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(banner, area);
    }

    fn render_hints(&self, f: &mut Frame, area: Rect) {
        let hints = if self.input_active {
            "Enter: search  Esc: stop editing"
        } else {
            match self.state.active_tab() {
                Tab::Search => "/: search  Tab: wishlist  ↑↓: select  Space: add  x: dismiss  q: quit",
                Tab::Wishlist => "Tab: search  r: refresh  ↑↓: select  Space: remove  x: dismiss  q: quit",
            }
        };

        f.render_widget(
            Paragraph::new(hints).style(Style::default().fg(theme::TEXT_MUTED)),
            area,
        );
    }
}

/// Sends tracing output to a log file so it never draws over the UI.
fn init_logging() -> Result<()> {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("libris")) else {
        return Ok(());
    };
    std::fs::create_dir_all(&dir)?;

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("libris.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("libris=info,libris_tui=info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    install()?;
    init_logging()?;

    let config = Config::from_env();
    let api = HttpBookApi::from_config(&config)?;
    info!(api = %config.api_base_url, "starting libris");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, config.api_base_url.clone());
    app.dispatch(Event::Started);

    // Main loop
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key.code);
                }
            }
        }

        // Apply finished backend calls
        while let Ok(outcome) = app.outcome_receiver.try_recv() {
            app.dispatch(outcome);
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
