//! App state and main loop: input handling, draining widget results and drawing.

use std::{io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::time::sleep;
use tracing::info;

use crate::api::ApiClient;
use crate::config::{DashConfig, LANGUAGES};
use crate::theme::ThemeStore;
use crate::ui::{
    chart::draw_chart,
    dropdown::{Click, Dropdown},
    footer::{draw_footer, draw_lang_menu, FooterState},
    header::{draw_header, draw_user_menu, user_menu, LinkHit, MenuItem},
    recent::draw_recent,
    sidebar::{draw_sidebar, page_url, NavTarget, Sidebar},
    status::draw_status,
    util::hit,
};
use crate::widgets::{Page, Widgets};

const FRAME_INTERVAL: Duration = Duration::from_millis(200);
const HELP: &str = "q quit · t theme · u user menu · l language · ↑/↓ Enter navigate";

pub struct App {
    cfg: DashConfig,
    client: ApiClient,
    theme: ThemeStore,
    widgets: Widgets,
    sidebar: Sidebar,
    user_menu: Dropdown,
    footer: FooterState,
    // cached at draw time for click handling
    header_links: Vec<LinkHit>,
    status_line: Option<String>,
    tick: u64,
    should_quit: bool,
}

impl App {
    pub fn new(cfg: DashConfig, client: ApiClient, theme: ThemeStore) -> Self {
        let widgets = Widgets::new(cfg.labels(), cfg.days);
        let sidebar = Sidebar::new(&cfg);
        Self {
            cfg,
            client,
            theme,
            widgets,
            sidebar,
            user_menu: Dropdown::default(),
            footer: FooterState::default(),
            header_links: Vec::new(),
            status_line: None,
            tick: 0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.widgets.mount_page(Page::Dashboard, &self.client);
        info!(base_url = self.client.base_url(), "dashboard started");

        // Main loop
        let res = self.event_loop(&mut terminal).await;
        self.widgets.unmount_all();

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) => self.handle_key(k),
                    Event::Mouse(m) => self.handle_mouse(m),
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            self.widgets.pump(self.theme.palette());
            terminal.draw(|f| self.draw(f))?;
            self.tick = self.tick.wrapping_add(1);

            sleep(FRAME_INTERVAL).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if self.footer.lang.is_open() {
            if let KeyCode::Char(c) = k.code {
                if let Some(code) = c
                    .to_digit(10)
                    .and_then(|d| LANGUAGES.get((d as usize).wrapping_sub(1)))
                    .map(|(code, _, _)| *code)
                {
                    self.set_lang(code);
                    self.footer.lang.close();
                    return;
                }
            }
        }
        match k.code {
            KeyCode::Esc if self.user_menu.is_open() || self.footer.lang.is_open() => {
                self.user_menu.close();
                self.footer.lang.close();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('u') if self.cfg.user.logged_in => {
                self.footer.lang.close();
                self.user_menu.toggle();
            }
            KeyCode::Char('l') => {
                self.user_menu.close();
                self.footer.lang.toggle();
            }
            KeyCode::Up => self.sidebar.select_prev(),
            KeyCode::Down => self.sidebar.select_next(),
            KeyCode::Enter => {
                if let Some(target) = self.sidebar.activate() {
                    self.navigate(target);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, m: MouseEvent) {
        if !matches!(m.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let (x, y) = (m.column, m.row);

        match self.user_menu.click(x, y) {
            Click::Toggled => return,
            Click::Inside => {
                let items = user_menu(&self.cfg);
                if let Some(MenuItem::Link { url, .. }) =
                    self.user_menu.item_at(y).and_then(|i| items.get(i))
                {
                    self.status_line = Some(url.clone());
                    self.user_menu.close();
                }
                return;
            }
            Click::ClosedOutside | Click::Ignored => {}
        }

        match self.footer.lang.click(x, y) {
            Click::Toggled => return,
            Click::Inside => {
                if let Some(code) = self.footer.lang_at(y) {
                    self.set_lang(code);
                    self.footer.lang.close();
                }
                return;
            }
            Click::ClosedOutside | Click::Ignored => {}
        }

        if self.footer.theme_hit(x, y) {
            self.toggle_theme();
            return;
        }
        if let Some((_, url)) = self.header_links.iter().find(|(r, _)| hit(*r, x, y)) {
            self.status_line = Some(url.clone());
            return;
        }
        if let Some(target) = self.sidebar.click(x, y) {
            self.navigate(target);
        }
    }

    fn navigate(&mut self, target: NavTarget) {
        match target {
            NavTarget::Page(page) => {
                if self.widgets.page() != Some(page) {
                    self.widgets.mount_page(page, &self.client);
                }
                self.status_line = Some(page_url(&self.cfg.nav, page).to_string());
            }
            NavTarget::External(url) => {
                info!(%url, "external link");
                self.status_line = Some(url);
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme.toggle();
        self.widgets.status.restyle(self.theme.palette());
    }

    fn set_lang(&mut self, code: &str) {
        if self.cfg.set_lang(code) {
            self.widgets.relabel(self.cfg.labels());
            self.sidebar.relabel(&self.cfg);
            info!(lang = code, "language switched");
        }
    }

    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let palette = *self.theme.palette();
        let area = f.area();
        f.render_widget(Block::default().style(palette.base()), area);

        // Root rows: header, body (sidebar + page), footer, status line
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .split(area);

        self.header_links = draw_header(f, rows[0], &self.cfg, &palette, &mut self.user_menu);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(20)])
            .split(rows[1]);
        draw_sidebar(
            f,
            body[0],
            &self.cfg,
            &palette,
            &mut self.sidebar,
            self.widgets.page(),
        );
        self.draw_page(f, body[1]);

        draw_footer(
            f,
            rows[2],
            &self.cfg,
            self.theme.dark_mode(),
            &palette,
            &mut self.footer,
        );

        let line = self.status_line.as_deref().unwrap_or(HELP);
        f.render_widget(
            Paragraph::new(Span::styled(line.to_string(), palette.muted())),
            rows[3],
        );

        // overlays last
        draw_user_menu(f, &self.cfg, &palette, &self.user_menu);
        draw_lang_menu(f, &self.cfg, &palette, &self.footer);
    }

    fn draw_page(&self, f: &mut Frame<'_>, area: Rect) {
        let palette = self.theme.palette();
        let labels = self.cfg.labels();
        let w = &self.widgets;
        match w.page() {
            Some(Page::Dashboard) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(10), // server status
                        Constraint::Length(6),  // stat cards
                        Constraint::Min(8),     // activity chart
                        Constraint::Min(8),     // recent tables
                    ])
                    .split(area);
                draw_status(f, rows[0], &w.status, labels, palette, self.tick);
                draw_chart(f, rows[1], &w.stats, labels, palette, self.tick);
                draw_chart(f, rows[2], &w.activity, labels, palette, self.tick);
                let tables = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Ratio(1, 3),
                        Constraint::Ratio(1, 3),
                        Constraint::Ratio(1, 3),
                    ])
                    .split(rows[3]);
                draw_recent(f, tables[0], &w.questions, labels, palette, self.tick);
                draw_recent(f, tables[1], &w.users, labels, palette, self.tick);
                draw_recent(f, tables[2], &w.submissions, labels, palette, self.tick);
            }
            Some(Page::Users) => draw_recent(f, area, &w.users, labels, palette, self.tick),
            Some(Page::Questions) => {
                draw_recent(f, area, &w.questions, labels, palette, self.tick)
            }
            Some(Page::Submissions) => {
                draw_recent(f, area, &w.submissions, labels, palette, self.tick)
            }
            None => {}
        }
    }

    pub fn cfg(&self) -> &DashConfig {
        &self.cfg
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryThemeStorage;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app(storage: MemoryThemeStorage) -> App {
        let mut cfg = DashConfig::default();
        cfg.set_lang("en");
        App::new(
            cfg,
            ApiClient::new("http://127.0.0.1:9"),
            ThemeStore::load(storage),
        )
    }

    fn render(app: &mut App) -> String {
        let mut term = Terminal::new(TestBackend::new(140, 48)).unwrap();
        term.draw(|f| app.draw(f)).unwrap();
        term.backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn theme_key_persists_and_quit_keys_stop() {
        let storage = MemoryThemeStorage::default();
        let mut a = app(storage.clone());
        a.handle_key(key(KeyCode::Char('t')));
        assert!(a.theme().dark_mode());
        assert_eq!(storage.value().as_deref(), Some("dark"));

        a.handle_key(key(KeyCode::Char('l')));
        a.handle_key(key(KeyCode::Esc));
        assert!(!a.should_quit(), "Esc closes the open menu first");
        a.handle_key(key(KeyCode::Esc));
        assert!(a.should_quit());
    }

    #[test]
    fn language_menu_digit_switches_labels() {
        let mut a = app(MemoryThemeStorage::default());
        a.handle_key(key(KeyCode::Char('l')));
        a.handle_key(key(KeyCode::Char('1')));
        assert_eq!(a.cfg().lang, "tr");
        assert_eq!(a.widgets().users.title(), "Son Kullanıcılar");
        assert!(render(&mut a).contains("Koyu Mod"));
    }

    #[test]
    fn external_entry_shows_url_without_mounting() {
        let mut a = app(MemoryThemeStorage::default());
        // Dashboard, Manage Users, Add User, Edit User, Manage Questions, Add Question
        for _ in 0..5 {
            a.handle_key(key(KeyCode::Down));
        }
        a.handle_key(key(KeyCode::Enter));
        assert_eq!(a.status_line(), Some("/admin/programming-questions/new"));
        assert!(a.widgets().page().is_none());
        assert!(render(&mut a).contains("/admin/programming-questions/new"));
    }

    #[test]
    fn footer_toggle_click_flips_theme() {
        let mut a = app(MemoryThemeStorage::default());
        render(&mut a);
        // footer block top border at row 43, first body row at 44
        a.handle_mouse(click(2, 44));
        assert!(a.theme().dark_mode());
        assert!(render(&mut a).contains("Light Mode"));
    }

    #[test]
    fn user_menu_click_outside_closes_it() {
        let mut a = app(MemoryThemeStorage::default());
        render(&mut a);
        a.handle_key(key(KeyCode::Char('u')));
        render(&mut a);
        assert!(render(&mut a).contains("Profile"));
        a.handle_mouse(click(60, 30));
        assert!(!render(&mut a).contains("Profile"));
    }

    #[test]
    fn add_and_edit_user_entries_are_external() {
        let mut a = app(MemoryThemeStorage::default());
        a.handle_key(key(KeyCode::Down));
        a.handle_key(key(KeyCode::Down));
        a.handle_key(key(KeyCode::Enter));
        assert_eq!(a.status_line(), Some("/admin/users/new"));
        a.handle_key(key(KeyCode::Down));
        a.handle_key(key(KeyCode::Enter));
        assert_eq!(a.status_line(), Some("/admin/users"));
        assert!(a.widgets().page().is_none());
    }

    #[tokio::test]
    async fn turkish_dashboard_panels_are_translated() {
        let mut cfg = DashConfig::default();
        assert_eq!(cfg.lang, "tr");
        cfg.user.email = Some("admin@example.com".into());
        let mut a = App::new(
            cfg,
            ApiClient::new("http://127.0.0.1:9"),
            ThemeStore::load(MemoryThemeStorage::default()),
        );
        a.navigate(NavTarget::Page(Page::Dashboard));
        let out = render(&mut a);
        assert!(out.contains("Koyu Mod"), "{out}");
        assert!(out.contains("Veriler yükleniyor..."), "{out}");
        assert!(out.contains("Yeni Kullanıcı Ekle"), "{out}");
        assert!(!out.contains("Loading..."));
        a.widgets.unmount_all();
    }

    #[tokio::test]
    async fn page_switch_remounts_widgets() {
        let mut a = app(MemoryThemeStorage::default());
        a.navigate(NavTarget::Page(Page::Dashboard));
        assert!(a.widgets().status.is_mounted());
        a.handle_key(key(KeyCode::Down));
        a.handle_key(key(KeyCode::Enter));
        assert_eq!(a.widgets().page(), Some(Page::Users));
        assert_eq!(a.status_line(), Some("/admin/users"));
        assert!(!a.widgets().status.is_mounted());
        assert_eq!(a.widgets().status.gauges().live_count(), 0);
        assert!(a.widgets().users.is_mounted());
        assert!(render(&mut a).contains("Recent Users"));
    }
}
