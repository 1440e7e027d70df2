//! Table for any `RecentWidget`: one of spinner, error, placeholder or rows.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::config::Labels;
use crate::ui::palette::Palette;
use crate::ui::util::spinner;
use crate::widgets::recent::{ListView, RecentRow, RecentWidget, RowCell, Tone};

fn cell_style(tone: &Tone, palette: &Palette) -> Style {
    match tone {
        Tone::Plain => Style::default().fg(palette.fg),
        Tone::Strong => palette.title(),
        Tone::Muted => palette.muted(),
        Tone::Badge(c) => Style::default().fg(*c).add_modifier(Modifier::BOLD),
    }
}

fn to_cell(c: RowCell, palette: &Palette) -> Cell<'static> {
    let style = cell_style(&c.tone, palette);
    Cell::from(c.text).style(style)
}

pub fn draw_recent<R: RecentRow>(
    f: &mut Frame<'_>,
    area: Rect,
    w: &RecentWidget<R>,
    labels: &Labels,
    palette: &Palette,
    tick: u64,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(Span::styled(w.title().to_string(), palette.title()));

    match w.view() {
        ListView::Loading => f.render_widget(
            Paragraph::new(format!("{} {}", spinner(tick), labels.loading))
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(block),
            area,
        ),
        ListView::Failed(e) => f.render_widget(
            Paragraph::new(format!("⚠ {e}"))
                .style(palette.error())
                .block(block),
            area,
        ),
        ListView::Empty => f.render_widget(
            Paragraph::new(R::empty(labels).to_string())
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(block),
            area,
        ),
        ListView::Rows(rows) => {
            let columns = R::columns(labels);
            let widths: Vec<Constraint> = columns
                .iter()
                .map(|(_, w)| Constraint::Percentage(*w))
                .collect();
            let header = Row::new(columns.into_iter().map(|(h, _)| Cell::from(h)))
                .style(palette.header_row());
            let body = rows.iter().map(|r| {
                Row::new(r.cells(labels).into_iter().map(|c| to_cell(c, palette)))
            });
            let table = Table::new(body, widths)
                .header(header)
                .column_spacing(1)
                .block(block);
            f.render_widget(table, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuestionRow, UserRow};
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
    fn loading_panel_shows_title_and_spinner() {
        let w: RecentWidget<UserRow> = RecentWidget::new("Recent Users");
        let mut term = Terminal::new(TestBackend::new(50, 5)).unwrap();
        term.draw(|f| {
            let area = f.area();
            draw_recent(f, area, &w, &Labels::english(), &Palette::dark(), 1);
        })
        .unwrap();
        let out = text(&term);
        assert!(out.contains("Recent Users"));
        assert!(out.contains("Loading..."));
    }

    #[test]
    fn badge_cells_are_bold_in_their_color() {
        let p = Palette::light();
        let s = cell_style(&Tone::Badge(crate::ui::palette::RED), &p);
        assert_eq!(s.fg, Some(crate::ui::palette::RED));
        assert!(s.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn turkish_table_headers_badges_and_placeholder() {
        let tr = Labels::turkish();
        let rows = vec![QuestionRow {
            id: 1,
            title: "FizzBuzz".into(),
            difficulty: 1,
            points: 10,
            created_at: "2024-05-01".into(),
        }];
        let w = RecentWidget::with_rows("Son Sorular", rows);
        let mut term = Terminal::new(TestBackend::new(100, 6)).unwrap();
        term.draw(|f| {
            let area = f.area();
            draw_recent(f, area, &w, &tr, &Palette::light(), 0);
        })
        .unwrap();
        let out = text(&term);
        assert!(out.contains("Zorluk"), "{out}");
        assert!(out.contains("Kolay"), "{out}");
        assert!(!out.contains("Difficulty"));

        let empty: RecentWidget<UserRow> = RecentWidget::with_rows("Son Kullanıcılar", vec![]);
        term.draw(|f| {
            let area = f.area();
            draw_recent(f, area, &empty, &tr, &Palette::light(), 0);
        })
        .unwrap();
        assert!(text(&term).contains("Kullanıcı bulunamadı."));
    }
}
