//! Admin sidebar: section headings plus selectable entries.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config::{DashConfig, NavUrls};
use crate::ui::palette::Palette;
use crate::ui::util::{hit, inner, truncate_middle};
use crate::widgets::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Page(Page),
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub label: String,
    pub indent: u16,
    /// Headings have none and cannot be selected.
    pub target: Option<NavTarget>,
}

fn heading(label: &str) -> SidebarEntry {
    SidebarEntry {
        label: label.to_string(),
        indent: 0,
        target: None,
    }
}

fn entry(label: &str, indent: u16, target: NavTarget) -> SidebarEntry {
    SidebarEntry {
        label: label.to_string(),
        indent,
        target: Some(target),
    }
}

/// Web address of the admin page a dashboard page mirrors.
pub fn page_url(nav: &NavUrls, page: Page) -> &str {
    match page {
        Page::Dashboard => nav.dashboard.as_str(),
        Page::Users => nav.users.as_str(),
        Page::Questions => nav.programming_questions.as_str(),
        Page::Submissions => nav.view_submissions.as_str(),
    }
}

pub fn sidebar_entries(cfg: &DashConfig) -> Vec<SidebarEntry> {
    let l = cfg.labels();
    let ext = |u: &str| NavTarget::External(u.to_string());
    vec![
        entry(&l.dashboard, 0, NavTarget::Page(Page::Dashboard)),
        heading(&l.users),
        entry(&l.manage_users, 1, NavTarget::Page(Page::Users)),
        entry(&l.add_user, 1, ext(&cfg.nav.add_user)),
        entry(&l.edit_user, 1, ext(&cfg.nav.edit_user)),
        heading(&l.programming_questions),
        entry(&l.manage_questions, 1, NavTarget::Page(Page::Questions)),
        entry(&l.add_question, 1, ext(&cfg.nav.new_programming_question)),
        entry(&l.add_question_ai, 1, ext(&cfg.nav.new_programming_question_ai)),
        entry(&l.view_submissions, 1, NavTarget::Page(Page::Submissions)),
        entry(&l.test_questions, 1, ext(&cfg.nav.test_question)),
        heading(&l.badges),
        entry(&l.manage_badges, 1, ext(&cfg.nav.badges)),
        entry(&l.add_badge, 1, ext(&cfg.nav.new_badge)),
        entry(&l.settings, 0, ext(&cfg.nav.admin_settings)),
    ]
}

#[derive(Debug, Clone)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
    selected: usize,
    area: Rect,
}

impl Sidebar {
    pub fn new(cfg: &DashConfig) -> Self {
        Self {
            entries: sidebar_entries(cfg),
            selected: 0,
            area: Rect::default(),
        }
    }

    /// Same layout in every language, so the selection stays put.
    pub fn relabel(&mut self, cfg: &DashConfig) {
        self.entries = sidebar_entries(cfg);
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&SidebarEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if let Some(i) = (self.selected + 1..self.entries.len()).find(|&i| self.selectable(i)) {
            self.selected = i;
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(i) = (0..self.selected).rev().find(|&i| self.selectable(i)) {
            self.selected = i;
        }
    }

    pub fn activate(&self) -> Option<NavTarget> {
        self.selected().and_then(|e| e.target.clone())
    }

    /// Click on an entry selects and activates it; headings are inert.
    pub fn click(&mut self, column: u16, row: u16) -> Option<NavTarget> {
        let body = inner(self.area);
        if !hit(body, column, row) {
            return None;
        }
        let idx = (row - body.y) as usize;
        if !self.selectable(idx) {
            return None;
        }
        self.selected = idx;
        self.activate()
    }

    fn selectable(&self, i: usize) -> bool {
        self.entries.get(i).is_some_and(|e| e.target.is_some())
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }
}

pub fn draw_sidebar(
    f: &mut Frame<'_>,
    area: Rect,
    cfg: &DashConfig,
    palette: &Palette,
    sidebar: &mut Sidebar,
    current: Option<Page>,
) {
    sidebar.set_area(area);
    let width = inner(area).width as usize;
    let lines: Vec<Line> = sidebar
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let active = matches!(e.target, Some(NavTarget::Page(p)) if Some(p) == current);
            let marker = if active { "▸ " } else { "  " };
            let pad = "  ".repeat(e.indent as usize);
            let text = truncate_middle(&format!("{marker}{pad}{}", e.label), width);
            let style = match (&e.target, i == sidebar.selected) {
                (None, _) => palette.header_row(),
                (Some(_), true) => palette.selected(),
                (Some(_), false) => palette.base(),
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(cfg.labels().admin_panel.clone(), palette.title()));
    f.render_widget(
        Paragraph::new(lines).style(palette.base()).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar() -> Sidebar {
        let mut cfg = DashConfig::default();
        cfg.set_lang("en");
        let mut s = Sidebar::new(&cfg);
        s.set_area(Rect::new(0, 2, 30, 18));
        s
    }

    #[test]
    fn keyboard_selection_skips_headings() {
        let mut s = sidebar();
        assert_eq!(s.activate(), Some(NavTarget::Page(Page::Dashboard)));
        s.select_next();
        assert_eq!(s.selected().unwrap().label, "Manage Users");
        s.select_next();
        s.select_next();
        assert_eq!(s.selected().unwrap().label, "Edit User");
        s.select_next();
        assert_eq!(s.activate(), Some(NavTarget::Page(Page::Questions)));
        for _ in 0..5 {
            s.select_prev();
        }
        assert_eq!(s.selected().unwrap().label, "Dashboard");
    }

    #[test]
    fn last_entry_stays_selected_at_the_end() {
        let mut s = sidebar();
        for _ in 0..30 {
            s.select_next();
        }
        assert_eq!(
            s.activate(),
            Some(NavTarget::External("/admin/settings".into()))
        );
    }

    #[test]
    fn click_maps_rows_to_entries() {
        let mut s = sidebar();
        // border at y=2, first entry at y=3
        assert_eq!(s.click(5, 3), Some(NavTarget::Page(Page::Dashboard)));
        // "Users" heading
        assert_eq!(s.click(5, 4), None);
        assert_eq!(
            s.click(5, 6),
            Some(NavTarget::External("/admin/users/new".into()))
        );
        assert_eq!(s.selected().unwrap().label, "Add User");
        assert_eq!(s.click(5, 7), Some(NavTarget::External("/admin/users".into())));
        assert_eq!(
            s.click(5, 10),
            Some(NavTarget::External("/admin/programming-questions/new".into()))
        );
        assert_eq!(s.selected().unwrap().label, "Add Question");
        assert_eq!(s.click(40, 10), None);
    }

    #[test]
    fn relabel_keeps_position() {
        let mut s = sidebar();
        s.select_next();
        let mut cfg = DashConfig::default();
        cfg.set_lang("tr");
        s.relabel(&cfg);
        assert_eq!(s.selected().unwrap().label, "Kullanıcıları Yönet");
    }

    #[test]
    fn pages_map_to_their_admin_urls() {
        let nav = NavUrls::default();
        assert_eq!(page_url(&nav, Page::Dashboard), "/admin/");
        assert_eq!(page_url(&nav, Page::Users), "/admin/users");
        assert_eq!(
            page_url(&nav, Page::Submissions),
            "/admin/programming-questions"
        );
    }
}
