//! Footer: theme toggle, language picker and the copyright lines.

use chrono::Datelike;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::{DashConfig, LANGUAGES};
use crate::ui::dropdown::Dropdown;
use crate::ui::palette::Palette;
use crate::ui::util::hit;

#[derive(Debug, Default, Clone)]
pub struct FooterState {
    pub theme_button: Rect,
    pub lang: Dropdown,
}

impl FooterState {
    pub fn theme_hit(&self, column: u16, row: u16) -> bool {
        hit(self.theme_button, column, row)
    }

    /// Language code under an `Inside` click on the open menu.
    pub fn lang_at(&self, row: u16) -> Option<&'static str> {
        self.lang
            .item_at(row)
            .and_then(|i| LANGUAGES.get(i))
            .map(|(code, _, _)| *code)
    }
}

/// The toggle names the mode it switches to.
pub fn theme_button_label(cfg: &DashConfig, dark_mode: bool) -> String {
    let l = cfg.labels();
    if dark_mode {
        format!("[ ☀ {} ]", l.light_mode)
    } else {
        format!("[ ☾ {} ]", l.dark_mode)
    }
}

fn language(code: &str) -> (&'static str, &'static str) {
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, flag)| (*name, *flag))
        .unwrap_or(("?", "🌐"))
}

pub fn draw_footer(
    f: &mut Frame<'_>,
    area: Rect,
    cfg: &DashConfig,
    dark_mode: bool,
    palette: &Palette,
    state: &mut FooterState,
) {
    let labels = cfg.labels();
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(palette.border())
        .style(palette.base());
    let body = block.inner(area);
    f.render_widget(block, area);
    if body.height == 0 {
        return;
    }

    let toggle = theme_button_label(cfg, dark_mode);
    let (name, flag) = language(&cfg.lang);
    let lang = format!("[ {flag} {name} ▾ ]");
    let tw = Span::raw(toggle.as_str()).width() as u16;
    let lw = Span::raw(lang.as_str()).width() as u16;

    let year = chrono::Local::now().year();
    let lines = vec![
        Line::from(vec![
            Span::styled(toggle, palette.title()),
            Span::raw("  "),
            Span::styled(
                lang,
                if state.lang.is_open() {
                    palette.selected()
                } else {
                    palette.title()
                },
            ),
        ]),
        Line::from(Span::styled(
            format!("© {year} PythonPlayground. {}", labels.all_rights),
            palette.muted(),
        )),
        Line::from(Span::styled(labels.platform_desc.clone(), palette.muted())),
    ];
    f.render_widget(Paragraph::new(lines), body);

    state.theme_button = Rect::new(body.x, body.y, tw.min(body.width), 1);
    let lang_button = Rect::new(body.x + tw + 2, body.y, lw, 1).intersection(body);
    let mh = LANGUAGES.len() as u16 + 2;
    let mw = LANGUAGES
        .iter()
        .map(|(_, n, _)| Span::raw(*n).width() as u16 + 7)
        .max()
        .unwrap_or(lw)
        .max(lw);
    // opens upwards, the footer sits at the bottom of the screen
    let container = Rect::new(lang_button.x, body.y.saturating_sub(mh), mw, mh);
    state.lang.set_areas(lang_button, container);
}

pub fn draw_lang_menu(
    f: &mut Frame<'_>,
    cfg: &DashConfig,
    palette: &Palette,
    state: &FooterState,
) {
    if !state.lang.is_open() {
        return;
    }
    let area = state.lang.container().intersection(f.area());
    if area.height < 3 {
        return;
    }
    let lines: Vec<Line> = LANGUAGES
        .iter()
        .map(|(code, name, flag)| {
            let style = if *code == cfg.lang {
                palette.selected()
            } else {
                palette.base()
            };
            Line::from(Span::styled(format!(" {flag} {name}"), style))
        })
        .collect();
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).style(palette.base()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border()),
        ),
        area,
    );
}
