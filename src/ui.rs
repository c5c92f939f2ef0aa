use svadhyaya::content::{ContentLibrary, DharmaCard, DharmaCategory, Scripture, ScriptureCategory};
use svadhyaya::counter::{MalaCounter, MALA_SIZE};
use svadhyaya::i18n::{Translations, DEFAULT_LANGUAGE};
use svadhyaya::prefs::Preferences;
use svadhyaya::reader::{FlipDirection, ReaderSession, ReaderView};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Library,
    Dharma,
    Mala,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Library => Page::Dharma,
            Page::Dharma => Page::Mala,
            Page::Mala => Page::Library,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Library => Page::Mala,
            Page::Dharma => Page::Library,
            Page::Mala => Page::Dharma,
        }
    }

    pub fn title_key(&self) -> &'static str {
        match self {
            Page::Library => "nav.library",
            Page::Dharma => "nav.dharma",
            Page::Mala => "nav.mala",
        }
    }
}

/// Result of trying to open the selected scripture
#[derive(Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    ComingSoon,
    NoSelection,
}

pub struct App {
    pub library: ContentLibrary,
    pub translations: Translations,
    pub prefs: Preferences,

    pub current_page: Page,
    pub scripture_state: TableState,
    pub dharma_state: TableState,

    /// Scriptures after search + category filter
    pub filtered_scriptures: Vec<Scripture>,
    /// Dharma cards after category filter
    pub filtered_dharma: Vec<DharmaCard>,

    pub search_text: String,
    pub search_input: bool,
    pub scripture_filter: Option<ScriptureCategory>,
    pub dharma_filter: Option<DharmaCategory>,

    /// Open reader session; takes over the content area while Some
    pub reader: Option<ReaderSession>,
    pub show_dharma_detail: bool,

    pub counter: MalaCounter,

    /// One-shot status message (e.g. the coming-soon placeholder)
    pub notice: Option<String>,
}

impl App {
    pub fn new(library: ContentLibrary, translations: Translations, mut prefs: Preferences) -> Self {
        // A hand-edited prefs file may name a language the bundle lacks
        if !translations.has_language(&prefs.language) {
            prefs.language = DEFAULT_LANGUAGE.to_string();
        }

        let counter = match prefs.chant_phrase.as_deref() {
            Some(phrase) => MalaCounter::with_phrase(phrase),
            None => MalaCounter::new(),
        };

        let mut scripture_state = TableState::default();
        if library.scripture_count() > 0 {
            scripture_state.select(Some(0));
        }
        let mut dharma_state = TableState::default();
        if library.dharma_count() > 0 {
            dharma_state.select(Some(0));
        }

        let filtered_scriptures = library.scriptures().to_vec();
        let filtered_dharma = library.dharma_cards().to_vec();

        Self {
            library,
            translations,
            prefs,
            current_page: Page::Library,
            scripture_state,
            dharma_state,
            filtered_scriptures,
            filtered_dharma,
            search_text: String::new(),
            search_input: false,
            scripture_filter: None,
            dharma_filter: None,
            reader: None,
            show_dharma_detail: false,
            counter,
            notice: None,
        }
    }

    fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.translate(&self.prefs.language, key)
    }

    // ========================================================================
    // FILTERING
    // ========================================================================

    /// Recompute the visible scripture list from search text + category
    pub fn refresh_scriptures(&mut self) {
        self.filtered_scriptures = self
            .library
            .search_scriptures(&self.search_text)
            .into_iter()
            .filter(|s| match self.scripture_filter {
                Some(category) => s.category == category,
                None => true,
            })
            .cloned()
            .collect();

        if self.filtered_scriptures.is_empty() {
            self.scripture_state.select(None);
        } else {
            self.scripture_state.select(Some(0));
        }
    }

    pub fn refresh_dharma(&mut self) {
        self.filtered_dharma = match self.dharma_filter {
            Some(category) => self
                .library
                .dharma_by_category(category)
                .into_iter()
                .cloned()
                .collect(),
            None => self.library.dharma_cards().to_vec(),
        };

        if self.filtered_dharma.is_empty() {
            self.dharma_state.select(None);
        } else {
            self.dharma_state.select(Some(0));
        }
    }

    pub fn apply_scripture_filter(&mut self, category: ScriptureCategory) {
        self.scripture_filter = Some(category);
        self.refresh_scriptures();
    }

    pub fn apply_dharma_filter(&mut self, category: DharmaCategory) {
        self.dharma_filter = Some(category);
        self.refresh_dharma();
    }

    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.search_input = false;
        self.scripture_filter = None;
        self.dharma_filter = None;
        self.refresh_scriptures();
        self.refresh_dharma();
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.refresh_scriptures();
    }

    // ========================================================================
    // SELECTION & NAVIGATION
    // ========================================================================

    pub fn selected_scripture(&self) -> Option<&Scripture> {
        self.scripture_state
            .selected()
            .and_then(|i| self.filtered_scriptures.get(i))
    }

    pub fn selected_dharma(&self) -> Option<&DharmaCard> {
        self.dharma_state
            .selected()
            .and_then(|i| self.filtered_dharma.get(i))
    }

    /// Open the selected scripture in the reader, or surface the
    /// coming-soon placeholder for a text with no verses yet.
    pub fn open_selected(&mut self) -> OpenOutcome {
        let Some(scripture) = self.selected_scripture() else {
            return OpenOutcome::NoSelection;
        };

        match ReaderSession::open(scripture) {
            Some(session) => {
                self.reader = Some(session);
                OpenOutcome::Opened
            }
            None => {
                self.notice = Some(self.tr("content.coming_soon").to_string());
                OpenOutcome::ComingSoon
            }
        }
    }

    pub fn close_reader(&mut self) {
        self.reader = None;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn list_next(state: &mut TableState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    fn list_previous(state: &mut TableState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn next(&mut self) {
        match self.current_page {
            Page::Library => {
                Self::list_next(&mut self.scripture_state, self.filtered_scriptures.len())
            }
            Page::Dharma => Self::list_next(&mut self.dharma_state, self.filtered_dharma.len()),
            Page::Mala => {}
        }
    }

    pub fn previous(&mut self) {
        match self.current_page {
            Page::Library => {
                Self::list_previous(&mut self.scripture_state, self.filtered_scriptures.len())
            }
            Page::Dharma => Self::list_previous(&mut self.dharma_state, self.filtered_dharma.len()),
            Page::Mala => {}
        }
    }

    /// Cycle the chant phrase and remember it in the preferences
    pub fn cycle_phrase(&mut self) {
        self.counter.next_phrase();
        self.prefs.chant_phrase = Some(self.counter.phrase().to_string());
    }

    /// Cycle the UI language through the bundled tables and remember it
    /// in the preferences
    pub fn cycle_language(&mut self) {
        let langs = self.translations.languages();
        if langs.is_empty() {
            return;
        }
        let current = langs
            .iter()
            .position(|l| *l == self.prefs.language)
            .unwrap_or(0);
        self.prefs.language = langs[(current + 1) % langs.len()].to_string();
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Any keypress clears a one-shot notice
            app.notice = None;

            // Search input captures printable keys first
            if app.search_input {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => app.search_input = false,
                    KeyCode::Backspace => {
                        app.search_text.pop();
                        app.refresh_scriptures();
                    }
                    KeyCode::Char(c) => {
                        app.search_text.push(c);
                        app.refresh_scriptures();
                    }
                    _ => {}
                }
                continue;
            }

            // Reader takes over navigation while open
            if app.reader.is_some() {
                match key.code {
                    KeyCode::Esc => app.close_reader(),
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Left | KeyCode::Char('h') => {
                        if let Some(reader) = app.reader.as_mut() {
                            reader.flip_backward();
                        }
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        if let Some(reader) = app.reader.as_mut() {
                            reader.flip_forward();
                        }
                    }
                    KeyCode::Char('f') => {
                        if let Some(reader) = app.reader.as_mut() {
                            reader.toggle_fullscreen();
                        }
                    }
                    KeyCode::Char('m') => {
                        if let Some(reader) = app.reader.as_mut() {
                            reader.toggle_view();
                        }
                    }
                    KeyCode::Home => {
                        if let Some(reader) = app.reader.as_mut() {
                            reader.go_to(0);
                        }
                    }
                    KeyCode::End => {
                        if let Some(reader) = app.reader.as_mut() {
                            let last = reader.scripture().verse_count() - 1;
                            reader.go_to(last);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('/') if app.current_page == Page::Library => {
                    app.search_input = true;
                }
                KeyCode::Char('c') => app.clear_filters(),
                KeyCode::Char('L') => app.cycle_language(),
                KeyCode::Char(c @ '1'..='4') if app.current_page == Page::Library => {
                    let idx = c as usize - '1' as usize;
                    app.apply_scripture_filter(ScriptureCategory::all()[idx]);
                }
                KeyCode::Char(c @ '1'..='4') if app.current_page == Page::Dharma => {
                    let idx = c as usize - '1' as usize;
                    app.apply_dharma_filter(DharmaCategory::all()[idx]);
                }
                KeyCode::Enter => match app.current_page {
                    Page::Library => {
                        app.open_selected();
                    }
                    Page::Dharma => app.show_dharma_detail = !app.show_dharma_detail,
                    Page::Mala => app.counter.advance(),
                },
                KeyCode::Char(' ') if app.current_page == Page::Mala => app.counter.advance(),
                KeyCode::Char('r') if app.current_page == Page::Mala => app.counter.reset(),
                KeyCode::Char('R') if app.current_page == Page::Mala => app.counter.reset_all(),
                KeyCode::Char('p') if app.current_page == Page::Mala => app.cycle_phrase(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    // Fullscreen reader takes the entire frame
    if let Some(reader) = &app.reader {
        if reader.is_fullscreen() {
            render_reader(f, f.size(), app);
            return;
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.reader.is_some() {
        render_reader(f, chunks[1], app);
    } else if app.show_dharma_detail && app.current_page == Page::Dharma {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Card list
                Constraint::Percentage(45), // Detail panel
            ])
            .split(chunks[1]);

        render_dharma(f, content_chunks[0], app);
        render_dharma_detail(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Library => render_library(f, chunks[1], app),
            Page::Dharma => render_dharma(f, chunks[1], app),
            Page::Mala => render_mala(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Library, Page::Dharma, Page::Mala];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(app.tr(page.title_key()).to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        app.tr("app.title").to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!(
            "📖 {}  ☸ {}",
            app.library.scripture_count(),
            app.library.dharma_count()
        ),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_library(f: &mut Frame, area: Rect, app: &mut App) {
    // Search bar above the table while searching or filtered
    let show_search = app.search_input || !app.search_text.is_empty();
    let (search_area, table_area) = if show_search {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, area)
    };

    if let Some(search_area) = search_area {
        let cursor = if app.search_input { "▌" } else { "" };
        let search = Paragraph::new(format!(" {}{}", app.search_text, cursor)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", app.tr("library.search"))),
        );
        f.render_widget(search, search_area);
    }

    let header_cells = ["Title", "Script", "Category", "Verses", ""]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let coming_soon = app.tr("content.coming_soon").to_string();
    let rows = app.filtered_scriptures.iter().map(|s| {
        let status = if s.is_available() {
            Cell::from("")
        } else {
            Cell::from(truncate(&coming_soon, 30)).style(Style::default().fg(Color::DarkGray))
        };

        let cells = vec![
            Cell::from(truncate(&s.title_translit, 30)),
            Cell::from(s.title.clone()).style(Style::default().fg(Color::Magenta)),
            Cell::from(s.category.as_str()).style(Style::default().fg(Color::Cyan)),
            Cell::from(format!("{}", s.verse_count())),
            status,
        ];

        Row::new(cells).height(1)
    });

    let title = match app.scripture_filter {
        Some(category) => format!(" {} — {} ", app.tr("nav.library"), category.as_str()),
        None => format!(" {} ", app.tr("nav.library")),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(26),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, table_area, &mut app.scripture_state);
}

fn render_dharma(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Title", "Category"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_dharma.iter().map(|card| {
        let color = match card.category {
            DharmaCategory::Philosophy => Color::Cyan,
            DharmaCategory::Practice => Color::Green,
            DharmaCategory::Festival => Color::Yellow,
            DharmaCategory::Deity => Color::Magenta,
        };

        let cells = vec![
            Cell::from(truncate(&card.title, 40)),
            Cell::from(card.category.as_str()).style(Style::default().fg(color)),
        ];

        Row::new(cells).height(1)
    });

    let title = match app.dharma_filter {
        Some(category) => format!(" {} — {} ", app.tr("nav.dharma"), category.as_str()),
        None => format!(" {} ", app.tr("nav.dharma")),
    };

    let table = Table::new(rows, [Constraint::Length(44), Constraint::Min(12)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.dharma_state);
}

fn render_dharma_detail(f: &mut Frame, area: Rect, app: &App) {
    let Some(card) = app.selected_dharma() else {
        let empty = Paragraph::new("No card selected").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(empty, area);
        return;
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", card.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", card.category.as_str()),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(format!("  {}", card.description)),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let detail = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", card.id)),
    );

    f.render_widget(detail, area);
}

fn render_reader(f: &mut Frame, area: Rect, app: &App) {
    let Some(reader) = &app.reader else {
        return;
    };

    let (pos, total) = reader.progress();
    let arrow = match reader.direction() {
        FlipDirection::Forward => "▶",
        FlipDirection::Backward => "◀",
    };
    let title = format!(
        " {} — {} {} {} {} {} ",
        reader.scripture().title_translit,
        app.tr("reader.verse"),
        pos,
        app.tr("reader.of"),
        total,
        arrow,
    );

    match reader.view() {
        ReaderView::Single => {
            let verse = reader.current_verse();
            let label = reader.verse_label(
                app.tr("reader.opening_couplet"),
                app.tr("reader.verse"),
            );

            let mut content = vec![
                Line::from(""),
                Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    verse.text.clone(),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    verse.transliteration.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
                )),
                Line::from(""),
                Line::from(verse.meaning.clone()),
            ];

            if let Some(illustration) = &verse.illustration {
                content.push(Line::from(""));
                content.push(Line::from(Span::styled(
                    format!("🖼  {}", illustration),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                "←/→ flip · m list · f fullscreen · Esc close",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));

            let page = Paragraph::new(content)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(title),
                );

            f.render_widget(page, area);
        }
        ReaderView::List => {
            // "Show more": every verse at once, current one highlighted
            let mut content = vec![Line::from("")];
            for (idx, verse) in reader.scripture().verses.iter().enumerate() {
                let label = if verse.is_opening() {
                    app.tr("reader.opening_couplet").to_string()
                } else {
                    format!("{} {}", app.tr("reader.verse"), verse.number)
                };

                let style = if idx == reader.current_index() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };

                content.push(Line::from(Span::styled(format!("  {}", label), style)));
                content.push(Line::from(format!("  {}", verse.transliteration)));
                content.push(Line::from(""));
            }

            let list = Paragraph::new(content).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(title),
            );

            f.render_widget(list, area);
        }
    }
}

fn render_mala(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Counter text
            Constraint::Length(3), // Bead gauge
            Constraint::Min(0),
        ])
        .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  📿 {}: {} / {}", app.tr("mala.bead"), app.counter.bead_display(), MALA_SIZE),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "  {}: {}",
            app.tr("mala.completed"),
            app.counter.completed()
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("  {}: ", app.tr("mala.phrase"))),
            Span::styled(
                app.counter.phrase(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let counter_panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", app.tr("nav.mala"))),
    );
    f.render_widget(counter_panel, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
        .ratio(app.counter.progress())
        .label(format!("{} / {}", app.counter.bead_display(), MALA_SIZE));
    f.render_widget(gauge, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if let Some(notice) = &app.notice {
        status_spans.push(Span::styled(
            format!(" {} ", notice),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    } else if app.reader.is_some() {
        status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Flip | "));
        status_spans.push(Span::styled("m", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" List | "));
        status_spans.push(Span::styled("f", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Fullscreen | "));
        status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Close"));
    } else {
        match app.current_page {
            Page::Library => {
                status_spans.push(Span::styled("/", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Search | "));
                status_spans.push(Span::styled("1-4", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Category | "));
                status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Read | "));
            }
            Page::Dharma => {
                status_spans.push(Span::styled("1-4", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Category | "));
                status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Details | "));
            }
            Page::Mala => {
                status_spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Bead | "));
                status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Reset | "));
                status_spans.push(Span::styled("p", Style::default().fg(Color::Yellow)));
                status_spans.push(Span::raw(" Chant | "));
            }
        }

        // Filter status
        if app.scripture_filter.is_some() || !app.search_text.is_empty() {
            status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Clear | "));
        }

        status_spans.push(Span::styled("L", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Lang | "));
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let library = ContentLibrary::load().unwrap();
        let translations = Translations::load().unwrap();
        App::new(library, translations, Preferences::default())
    }

    #[test]
    fn test_page_cycle() {
        assert_eq!(Page::Library.next(), Page::Dharma);
        assert_eq!(Page::Mala.next(), Page::Library);
        assert_eq!(Page::Library.previous(), Page::Mala);
    }

    #[test]
    fn test_app_starts_on_library_with_selection() {
        let app = test_app();
        assert_eq!(app.current_page, Page::Library);
        assert!(app.selected_scripture().is_some());
        assert_eq!(app.filtered_scriptures.len(), app.library.scripture_count());
    }

    #[test]
    fn test_category_filter_narrows_list() {
        let mut app = test_app();
        app.apply_scripture_filter(ScriptureCategory::Mantra);

        assert_eq!(app.filtered_scriptures.len(), 1);
        assert_eq!(app.filtered_scriptures[0].id, "gayatri-mantra");

        app.clear_filters();
        assert_eq!(app.filtered_scriptures.len(), app.library.scripture_count());
    }

    #[test]
    fn test_search_filters_list() {
        let mut app = test_app();
        app.set_search("tandava");

        assert_eq!(app.filtered_scriptures.len(), 1);
        assert_eq!(app.filtered_scriptures[0].id, "shiva-tandava-stotram");

        // Search + category filter compose
        app.apply_scripture_filter(ScriptureCategory::Chalisa);
        assert!(app.filtered_scriptures.is_empty());
        assert!(app.selected_scripture().is_none());
    }

    #[test]
    fn test_open_selected_scripture() {
        let mut app = test_app();
        app.set_search("hanuman");

        assert_eq!(app.open_selected(), OpenOutcome::Opened);
        assert!(app.reader.is_some());

        app.close_reader();
        assert!(app.reader.is_none());
    }

    #[test]
    fn test_open_unavailable_shows_placeholder() {
        let mut app = test_app();
        app.apply_scripture_filter(ScriptureCategory::Gita);

        assert_eq!(app.open_selected(), OpenOutcome::ComingSoon);
        assert!(app.reader.is_none());
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_open_with_no_selection() {
        let mut app = test_app();
        app.set_search("zzzz");
        assert_eq!(app.open_selected(), OpenOutcome::NoSelection);
    }

    #[test]
    fn test_dharma_filter() {
        let mut app = test_app();
        app.apply_dharma_filter(DharmaCategory::Festival);

        assert_eq!(app.filtered_dharma.len(), 1);
        assert_eq!(app.filtered_dharma[0].id, "hanuman-jayanti");
    }

    #[test]
    fn test_list_navigation_wraps() {
        let mut app = test_app();
        let len = app.filtered_scriptures.len();

        for _ in 0..len {
            app.next();
        }
        // Wrapped back to the first row
        assert_eq!(app.scripture_state.selected(), Some(0));

        app.previous();
        assert_eq!(app.scripture_state.selected(), Some(len - 1));
    }

    #[test]
    fn test_cycle_phrase_updates_prefs() {
        let mut app = test_app();
        app.cycle_phrase();

        assert_eq!(
            app.prefs.chant_phrase.as_deref(),
            Some(app.counter.phrase())
        );
    }

    #[test]
    fn test_cycle_language_updates_prefs() {
        let mut app = test_app();
        assert_eq!(app.prefs.language, "en");

        // Languages cycle in sorted order: en → hi → en
        app.cycle_language();
        assert_eq!(app.prefs.language, "hi");
        assert_eq!(app.tr("nav.library"), "ग्रंथालय");

        app.cycle_language();
        assert_eq!(app.prefs.language, "en");
        assert_eq!(app.tr("nav.library"), "Library");
    }

    #[test]
    fn test_unknown_prefs_language_normalized() {
        let library = ContentLibrary::load().unwrap();
        let translations = Translations::load().unwrap();
        let mut prefs = Preferences::default();
        prefs.language = "de".to_string();

        let app = App::new(library, translations, prefs);
        assert_eq!(app.prefs.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_phrase_restored_from_prefs() {
        let library = ContentLibrary::load().unwrap();
        let translations = Translations::load().unwrap();
        let mut prefs = Preferences::default();
        prefs.chant_phrase = Some("हरे कृष्ण".to_string());

        let app = App::new(library, translations, prefs);
        assert_eq!(app.counter.phrase(), "हरे कृष्ण");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer string", 10), "a much ...");
    }
}
