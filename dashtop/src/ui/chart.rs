//! Admin chart panel: date-axis line/bar chart or the five stat cards.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::config::Labels;
use crate::types::ActivityStats;
use crate::ui::palette::Palette;
use crate::ui::util::{short_date, spinner};
use crate::widgets::admin_chart::{
    stat_cards, stat_values, ChartData, ChartWidget, MergedChart, SeriesKind,
};

fn graph_type(kind: SeriesKind) -> GraphType {
    match kind {
        SeriesKind::Line => GraphType::Line,
        SeriesKind::Bar => GraphType::Bar,
    }
}

/// Points per series, x = index into the shared date labels.
pub fn series_points(m: &MergedChart) -> Vec<Vec<(f64, f64)>> {
    m.series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v as f64))
                .collect()
        })
        .collect()
}

/// First, middle and last date; fewer when there are fewer points.
pub fn x_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 => vec![short_date(&labels[0])],
        2 => labels.iter().map(|d| short_date(d)).collect(),
        n => vec![
            short_date(&labels[0]),
            short_date(&labels[n / 2]),
            short_date(&labels[n - 1]),
        ],
    }
}

pub fn draw_chart(
    f: &mut Frame<'_>,
    area: Rect,
    w: &ChartWidget,
    labels: &Labels,
    palette: &Palette,
    tick: u64,
) {
    let mut title = vec![Span::styled(w.title().to_string(), palette.title())];
    if !w.kind().is_stats() {
        title.push(Span::styled(
            format!(" · {}", labels.last_days(w.days())),
            palette.muted(),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(Line::from(title));

    let state = w.state();
    if state.is_loading() {
        f.render_widget(
            Paragraph::new(format!("{} {}", spinner(tick), labels.loading))
                .style(palette.muted())
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }
    if let Some(e) = state.error() {
        f.render_widget(
            Paragraph::new(format!("⚠ {e}"))
                .style(palette.error())
                .block(block),
            area,
        );
        return;
    }
    match state.data() {
        Some(ChartData::Series(m)) => draw_series(f, area, block, m, palette),
        Some(ChartData::Stats(s)) => draw_stats(f, area, block, s, labels, palette),
        None => f.render_widget(block, area),
    }
}

fn draw_series(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    m: &MergedChart,
    palette: &Palette,
) {
    let points = series_points(m);
    let datasets: Vec<Dataset> = m
        .series
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (s, pts))| {
            // only the first dataset takes the configured kind
            let kind = if i == 0 { m.kind } else { SeriesKind::Line };
            Dataset::default()
                .name(s.label.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type(kind))
                .style(Style::default().fg(s.color))
                .data(pts)
        })
        .collect();

    let x_max = (m.labels.len().saturating_sub(1)).max(1) as f64;
    let y_top = m
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);
    let y_max = (y_top as f64 * 1.1).ceil();

    let x_axis = Axis::default()
        .style(palette.muted())
        .bounds([0.0, x_max])
        .labels(x_labels(&m.labels).into_iter().map(Span::raw).collect::<Vec<_>>());
    let y_axis = Axis::default()
        .style(palette.muted())
        .bounds([0.0, y_max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{}", (y_max / 2.0).round())),
            Span::raw(format!("{y_max}")),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);
}

fn draw_stats(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    s: &ActivityStats,
    labels: &Labels,
    palette: &Palette,
) {
    let body = block.inner(area);
    f.render_widget(block, area);
    if body.height == 0 {
        return;
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(body);
    let values = stat_values(s);
    let cards = stat_cards(labels);
    for (((icon, label, color), value), col) in cards.iter().zip(values).zip(cols.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(format!("{icon} {label}"), palette.muted())),
            Line::from(Span::styled(
                value,
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(*color)),
        );
        f.render_widget(card, *col);
    }
}
