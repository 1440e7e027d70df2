//! Server status panel: three gauges, readouts and version info.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::config::Labels;
use crate::gauge::{gauge_percentage, GaugeName};
use crate::types::ServerStatus;
use crate::ui::palette::Palette;
use crate::ui::util::{gb, spinner};
use crate::widgets::status::StatusWidget;

fn gauge_title(name: GaugeName, labels: &Labels) -> &str {
    match name {
        GaugeName::Cpu => labels.gauge_cpu.as_str(),
        GaugeName::Ram => labels.gauge_ram.as_str(),
        GaugeName::ProcessRam => labels.gauge_process_ram.as_str(),
    }
}

/// Two text lines under each gauge.
pub fn readouts(name: GaugeName, s: &ServerStatus, labels: &Labels) -> [String; 2] {
    match name {
        GaugeName::Cpu => [
            format!("{:.0}%", s.cpu_usage_percent.clamp(0.0, 100.0)),
            String::new(),
        ],
        GaugeName::Ram => [
            format!("{} / {}", gb(s.ram_used_gb), gb(s.ram_total_gb)),
            format!(
                "{:.1}% {}",
                gauge_percentage(s.ram_used_gb, s.ram_total_gb),
                labels.in_use
            ),
        ],
        GaugeName::ProcessRam => [
            format!("{} {}", gb(s.process_ram_used_gb), labels.in_use),
            format!("{}: {}", labels.total, gb(s.process_ram_allocated_gb)),
        ],
    }
}

pub fn draw_status(
    f: &mut Frame<'_>,
    area: Rect,
    w: &StatusWidget,
    labels: &Labels,
    palette: &Palette,
    tick: u64,
) {
    let mut title = vec![Span::styled(labels.server_status.clone(), palette.title())];
    if let Some(ts) = w.last_updated() {
        title.push(Span::styled(
            format!(" · {}", ts.format("%H:%M:%S")),
            palette.muted(),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(Line::from(title));
    let body = block.inner(area);
    f.render_widget(block, area);
    if body.height == 0 {
        return;
    }

    if w.show_spinner() {
        f.render_widget(
            Paragraph::new(format!("{} {}", spinner(tick), labels.loading))
                .style(palette.muted())
                .alignment(Alignment::Center),
            body,
        );
        return;
    }

    let banner = w.state().error().map(|e| format!("⚠ {e}"));
    let Some(status) = w.state().data() else {
        // failed before the first snapshot: the message is all there is
        if let Some(msg) = banner {
            f.render_widget(Paragraph::new(msg).style(palette.error()), body);
        }
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::from(banner.is_some())),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(body);

    if let Some(msg) = banner {
        f.render_widget(Paragraph::new(msg).style(palette.error()), rows[0]);
    }

    let versions = Line::from(vec![
        Span::styled(format!("{}: ", labels.runtime), palette.muted()),
        Span::styled(status.runtime_version.clone(), palette.base()),
        Span::styled(format!("  {}: ", labels.framework), palette.muted()),
        Span::styled(status.framework_version.clone(), palette.base()),
        Span::styled(format!("  {}: ", labels.database), palette.muted()),
        Span::styled(status.database_version.clone(), palette.base()),
    ]);
    f.render_widget(Paragraph::new(versions), rows[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[2]);

    for (name, col) in GaugeName::ALL.into_iter().zip(cols.iter()) {
        draw_gauge(f, *col, name, w, status, labels, palette);
    }
}

fn draw_gauge(
    f: &mut Frame<'_>,
    area: Rect,
    name: GaugeName,
    w: &StatusWidget,
    status: &ServerStatus,
    labels: &Labels,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(
            gauge_title(name, labels).to_string(),
            palette.title(),
        ));
    let body = block.inner(area);
    f.render_widget(block, area);
    if body.height == 0 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    if let Some(h) = w.gauges().get(name) {
        let pct = h.percentage();
        let g = Gauge::default()
            .gauge_style(Style::default().fg(h.fill()).bg(h.track()))
            .ratio(pct / 100.0)
            .use_unicode(true)
            .label(format!("{pct:.1}%"));
        f.render_widget(g, parts[0]);
    }

    let [a, b] = readouts(name, status, labels);
    let lines = vec![
        Line::from(Span::styled(a, palette.title())),
        Line::from(Span::styled(b, palette.muted())),
    ];
    f.render_widget(Paragraph::new(lines), parts[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ServerStatus {
        ServerStatus {
            cpu_usage_percent: 45.0,
            ram_used_gb: 3.0,
            ram_total_gb: 8.0,
            process_ram_used_gb: 1.2,
            process_ram_allocated_gb: 2.0,
            runtime_version: "3.12.1".into(),
            framework_version: "3.0.0".into(),
            database_version: "8.0.36".into(),
        }
    }

    #[test]
    fn readouts_format_like_the_panel() {
        let s = sample();
        let en = Labels::english();
        assert_eq!(readouts(GaugeName::Cpu, &s, &en)[0], "45%");
        assert_eq!(
            readouts(GaugeName::Ram, &s, &en),
            ["3.00 GB / 8.00 GB".to_string(), "37.5% in use".to_string()]
        );
        assert_eq!(
            readouts(GaugeName::ProcessRam, &s, &en),
            ["1.20 GB in use".to_string(), "Total: 2.00 GB".to_string()]
        );
    }

    #[test]
    fn readouts_follow_turkish_labels() {
        let s = sample();
        let tr = Labels::turkish();
        assert_eq!(readouts(GaugeName::Ram, &s, &tr)[1], "37.5% kullanımda");
        assert_eq!(
            readouts(GaugeName::ProcessRam, &s, &tr)[1],
            "Toplam: 2.00 GB"
        );
        assert_eq!(gauge_title(GaugeName::ProcessRam, &tr), "Uygulama RAM");
    }

    #[test]
    fn zero_total_ram_reads_zero_percent() {
        let mut s = sample();
        s.ram_total_gb = 0.0;
        assert_eq!(
            readouts(GaugeName::Ram, &s, &Labels::english())[1],
            "0.0% in use"
        );
    }

    #[test]
    fn spinner_until_first_snapshot() {
        use ratatui::{backend::TestBackend, Terminal};
        let w = StatusWidget::new();
        let mut term = Terminal::new(TestBackend::new(60, 8)).unwrap();
        term.draw(|f| {
            let area = f.area();
            draw_status(f, area, &w, &Labels::english(), &Palette::light(), 0);
        })
        .unwrap();
        let out: String = term
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(out.contains("Loading..."), "{out}");
        assert!(out.contains("Server Status"));
    }

    #[test]
    fn turkish_spinner_text() {
        use ratatui::{backend::TestBackend, Terminal};
        let w = StatusWidget::new();
        let mut term = Terminal::new(TestBackend::new(60, 8)).unwrap();
        term.draw(|f| {
            let area = f.area();
            draw_status(f, area, &w, &Labels::turkish(), &Palette::dark(), 0);
        })
        .unwrap();
        let out: String = term
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(out.contains("Veriler yükleniyor..."), "{out}");
        assert!(out.contains("Sunucu Durumu"));
    }
}
