//! Top header: app name, nav links and the user menu (or login/register).

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::DashConfig;
use crate::ui::dropdown::Dropdown;
use crate::ui::palette::Palette;

/// A clickable span and the URL it points at.
pub type LinkHit = (Rect, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Link { label: String, url: String },
    Separator,
}

pub fn nav_links(cfg: &DashConfig) -> Vec<(String, String)> {
    let l = cfg.labels();
    vec![
        (l.home.clone(), cfg.nav.home.clone()),
        (l.questions.clone(), cfg.nav.questions.clone()),
        (l.leaderboard.clone(), cfg.nav.leaderboard.clone()),
        (l.about.clone(), cfg.nav.about.clone()),
    ]
}

pub fn user_menu(cfg: &DashConfig) -> Vec<MenuItem> {
    let l = cfg.labels();
    let link = |label: &str, url: &str| MenuItem::Link {
        label: label.to_string(),
        url: url.to_string(),
    };
    let mut items = Vec::with_capacity(5);
    if cfg.user.admin {
        items.push(link(&l.admin_panel, &cfg.nav.admin));
    }
    items.push(link(&l.profile, &cfg.nav.profile));
    items.push(link(&l.settings, &cfg.nav.settings));
    items.push(MenuItem::Separator);
    items.push(link(&l.logout, &cfg.nav.logout));
    items
}

struct Cursor<'a> {
    x: u16,
    y: u16,
    spans: Vec<Span<'a>>,
    hits: Vec<LinkHit>,
}

impl<'a> Cursor<'a> {
    fn push(&mut self, text: String, style: Style, url: Option<&str>) {
        let w = Span::raw(text.as_str()).width() as u16;
        if let Some(u) = url {
            self.hits.push((Rect::new(self.x, self.y, w, 1), u.to_string()));
        }
        self.x = self.x.saturating_add(w);
        self.spans.push(Span::styled(text, style));
    }
}

/// Draws the bar and records where the user button and its menu sit.
pub fn draw_header(
    f: &mut Frame<'_>,
    area: Rect,
    cfg: &DashConfig,
    palette: &Palette,
    menu: &mut Dropdown,
) -> Vec<LinkHit> {
    let labels = cfg.labels();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.border())
        .style(palette.base());
    let body = block.inner(area);
    f.render_widget(block, area);
    if body.height == 0 || body.width == 0 {
        return Vec::new();
    }

    let mut left = Cursor {
        x: body.x,
        y: body.y,
        spans: Vec::new(),
        hits: Vec::new(),
    };
    let home = Some(cfg.nav.home.as_str());
    left.push(format!("🐍 {}", labels.app_name), palette.title(), home);
    left.push(format!("  {}   ", labels.tagline), palette.muted(), None);
    for (label, url) in nav_links(cfg) {
        left.push(label, Style::default().fg(palette.accent), Some(url.as_str()));
        left.push("  ".into(), Style::default(), None);
    }
    let mut hits = left.hits;
    f.render_widget(Paragraph::new(Line::from(left.spans)), body);

    // right-aligned: user button or login/register
    if cfg.user.logged_in {
        let name = cfg.user.username.as_deref().unwrap_or("?");
        let text = format!(" 👤 {name} ▾ ");
        let w = (Span::raw(text.as_str()).width() as u16).min(body.width);
        let button = Rect::new(body.x + body.width - w, body.y, w, 1);
        let style = if menu.is_open() {
            palette.selected()
        } else {
            palette.title()
        };
        f.render_widget(Paragraph::new(Span::styled(text, style)), button);

        let items = user_menu(cfg);
        let widest = items
            .iter()
            .map(|i| match i {
                MenuItem::Link { label, .. } => Span::raw(label.as_str()).width() as u16,
                MenuItem::Separator => 0,
            })
            .chain(cfg.user.email.iter().map(|e| Span::raw(e.as_str()).width() as u16))
            .max()
            .unwrap_or(0);
        let screen = f.area();
        let mw = (widest + 4).max(w).min(screen.width);
        let mh = (items.len() as u16 + 2).min(screen.height.saturating_sub(button.y + 1));
        let mx = (button.x + button.width).saturating_sub(mw);
        menu.set_areas(button, Rect::new(mx, button.y + 1, mw, mh));
    } else {
        menu.close();
        menu.set_areas(Rect::default(), Rect::default());
        let mut right = Cursor {
            x: 0,
            y: body.y,
            spans: Vec::new(),
            hits: Vec::new(),
        };
        let login = labels.login.clone();
        let register = labels.register.clone();
        let w = Span::raw(login.as_str()).width() + Span::raw(register.as_str()).width() + 3;
        let w = w as u16;
        right.x = (body.x + body.width).saturating_sub(w);
        let rect = Rect::new(right.x, body.y, w.min(body.width), 1);
        let accent = Style::default().fg(palette.accent);
        right.push(login, accent, Some(cfg.nav.login.as_str()));
        right.push(" | ".into(), palette.muted(), None);
        right.push(register, accent, Some(cfg.nav.register.as_str()));
        f.render_widget(Paragraph::new(Line::from(right.spans)), rect);
        hits.extend(right.hits);
    }
    hits
}

/// Overlay; drawn last so it sits above the panels. The account email, when
/// known, is the frame title.
pub fn draw_user_menu(
    f: &mut Frame<'_>,
    cfg: &DashConfig,
    palette: &Palette,
    menu: &Dropdown,
) {
    if !menu.is_open() {
        return;
    }
    let area = menu.container();
    if area.width < 3 || area.height < 3 {
        return;
    }
    let inner_w = area.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = user_menu(cfg)
        .into_iter()
        .map(|item| match item {
            MenuItem::Link { label, .. } => {
                Line::from(Span::styled(format!(" {label}"), palette.base()))
            }
            MenuItem::Separator => {
                Line::from(Span::styled("─".repeat(inner_w), palette.border()))
            }
        })
        .collect();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border());
    if let Some(email) = cfg.user.email.as_deref() {
        block = block.title(Span::styled(email.to_string(), palette.muted()));
    }
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).style(palette.base()).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserIdentity;
    use ratatui::{backend::TestBackend, Terminal};

    fn text(t: &Terminal<TestBackend>) -> String {
        t.backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn menu_hides_admin_link_for_regular_users() {
        let mut cfg = DashConfig::default();
        cfg.set_lang("en");
        assert!(matches!(
            &user_menu(&cfg)[0],
            MenuItem::Link { label, .. } if label == "Admin Panel"
        ));
        cfg.user.admin = false;
        let items = user_menu(&cfg);
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], MenuItem::Link { label, .. } if label == "Profile"));
        assert_eq!(items[2], MenuItem::Separator);
    }

    #[test]
    fn logged_out_header_shows_login_links() {
        let mut cfg = DashConfig::default();
        cfg.set_lang("en");
        cfg.user = UserIdentity {
            logged_in: false,
            admin: false,
            username: None,
            email: None,
        };
        let mut menu = Dropdown::default();
        let mut term = Terminal::new(TestBackend::new(140, 2)).unwrap();
        let mut hits = Vec::new();
        term.draw(|f| {
            let area = f.area();
            hits = draw_header(f, area, &cfg, &Palette::light(), &mut menu);
        })
        .unwrap();
        let out = text(&term);
        assert!(out.contains("Log In"), "{out}");
        assert!(out.contains("Register"));
        assert!(hits.iter().any(|(_, u)| u == "/login"));
        assert!(hits.iter().any(|(_, u)| u == "/leaderboard"));
    }

    #[test]
    fn logged_in_header_places_user_menu_under_button() {
        let mut cfg = DashConfig::default();
        cfg.set_lang("en");
        let mut menu = Dropdown::default();
        let mut term = Terminal::new(TestBackend::new(140, 12)).unwrap();
        term.draw(|f| {
            let area = Rect::new(0, 0, 140, 2);
            draw_header(f, area, &cfg, &Palette::dark(), &mut menu);
        })
        .unwrap();
        assert!(text(&term).contains("admin"));
        let b = menu.button();
        assert_eq!(b.x + b.width, 140);
        assert_eq!(menu.container().y, b.y + 1);
        assert!(!menu.is_open());
    }

    #[test]
    fn open_menu_shows_account_email() {
        let mut cfg = DashConfig::default();
        cfg.user.email = Some("admin@example.com".into());
        let mut menu = Dropdown::default();
        let mut term = Terminal::new(TestBackend::new(140, 12)).unwrap();
        term.draw(|f| {
            draw_header(f, Rect::new(0, 0, 140, 2), &cfg, &Palette::light(), &mut menu);
        })
        .unwrap();
        menu.toggle();
        term.draw(|f| {
            draw_header(f, Rect::new(0, 0, 140, 2), &cfg, &Palette::light(), &mut menu);
            draw_user_menu(f, &cfg, &Palette::light(), &menu);
        })
        .unwrap();
        let out = text(&term);
        assert!(out.contains("admin@example.com"), "{out}");
        assert!(menu.container().width as usize >= "admin@example.com".len() + 2);
    }
}
