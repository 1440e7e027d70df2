//! Admin chart: a single `{date, count}` series, several series joined by date,
//! or the activity stat cards.

use std::collections::{BTreeSet, HashMap};

use futures::future::try_join_all;
use ratatui::style::Color;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::api::{ApiClient, ApiResult};
use crate::config::Labels;
use crate::fetch::{FetchState, Fetched, RequestTokens};
use crate::types::{ActivityStats, DailyCount};
use crate::ui::palette::{BLUE, GREEN, ORANGE, PURPLE, YELLOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesKind {
    #[default]
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesConfig {
    pub url: String,
    pub label: String,
    pub color: Color,
    pub kind: Option<SeriesKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line { endpoint: String },
    Combined { series: Vec<SeriesConfig> },
    Stats { endpoint: String },
}

impl ChartKind {
    /// Registrations and solved questions on one date axis.
    pub fn activity(labels: &Labels) -> Self {
        ChartKind::Combined {
            series: vec![
                SeriesConfig {
                    url: "/api/chart/registrations".into(),
                    label: labels.registrations.clone(),
                    color: BLUE,
                    kind: None,
                },
                SeriesConfig {
                    url: "/api/chart/solved-questions".into(),
                    label: labels.solved.clone(),
                    color: GREEN,
                    kind: None,
                },
            ],
        }
    }

    pub fn stats() -> Self {
        ChartKind::Stats {
            endpoint: "/api/chart/activity-stats".into(),
        }
    }

    pub fn is_stats(&self) -> bool {
        matches!(self, ChartKind::Stats { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedSeries {
    pub label: String,
    pub color: Color,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergedChart {
    /// Sorted ascending, `YYYY-MM-DD`.
    pub labels: Vec<String>,
    pub series: Vec<MergedSeries>,
    pub kind: SeriesKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Series(MergedChart),
    Stats(ActivityStats),
}

/// Union of all dates, each series backfilled with 0 where it has no point.
/// The first config's kind decides how the whole chart is drawn.
pub fn merge_series(inputs: Vec<(SeriesConfig, Vec<DailyCount>)>) -> MergedChart {
    let labels: Vec<String> = inputs
        .iter()
        .flat_map(|(_, points)| points.iter().map(|p| p.date.clone()))
        .filter(|d| !d.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let kind = inputs
        .first()
        .and_then(|(cfg, _)| cfg.kind)
        .unwrap_or_default();

    let series = inputs
        .into_iter()
        .map(|(cfg, points)| {
            let mut by_date: HashMap<&str, u64> = HashMap::with_capacity(points.len());
            for p in &points {
                // first point wins on duplicate dates
                by_date.entry(p.date.as_str()).or_insert(p.count);
            }
            let values = labels
                .iter()
                .map(|d| by_date.get(d.as_str()).copied().unwrap_or(0))
                .collect();
            MergedSeries {
                label: cfg.label,
                color: cfg.color,
                values,
            }
        })
        .collect();

    MergedChart {
        labels,
        series,
        kind,
    }
}

async fn load(
    client: ApiClient,
    kind: ChartKind,
    title: String,
    days: u32,
) -> ApiResult<ChartData> {
    match kind {
        ChartKind::Line { endpoint } => {
            let points = client.daily_counts(&endpoint, days).await?;
            let cfg = SeriesConfig {
                url: endpoint,
                label: title,
                color: BLUE,
                kind: Some(SeriesKind::Line),
            };
            Ok(ChartData::Series(merge_series(vec![(cfg, points)])))
        }
        ChartKind::Combined { series } => {
            let fetched =
                try_join_all(series.iter().map(|s| client.daily_counts(&s.url, days))).await?;
            Ok(ChartData::Series(merge_series(
                series.into_iter().zip(fetched).collect(),
            )))
        }
        ChartKind::Stats { endpoint } => {
            Ok(ChartData::Stats(client.activity_stats(&endpoint, days).await?))
        }
    }
}

pub struct ChartWidget {
    title: String,
    kind: ChartKind,
    days: u32,
    state: FetchState<ChartData>,
    tokens: RequestTokens,
    rx: Option<UnboundedReceiver<Fetched<ChartData>>>,
}

impl ChartWidget {
    pub fn new(title: impl Into<String>, kind: ChartKind, days: u32) -> Self {
        Self {
            title: title.into(),
            kind,
            days,
            state: FetchState::new(),
            tokens: RequestTokens::default(),
            rx: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn kind(&self) -> &ChartKind {
        &self.kind
    }

    /// Renames combined series in place, positionally, including data
    /// already on screen.
    pub fn set_series_labels(&mut self, names: &[&str]) {
        if let ChartKind::Combined { series } = &mut self.kind {
            for (cfg, name) in series.iter_mut().zip(names) {
                cfg.label = name.to_string();
            }
        }
        if let Some(ChartData::Series(m)) = self.state.data_mut() {
            for (s, name) in m.series.iter_mut().zip(names) {
                s.label = name.to_string();
            }
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn mount(&mut self, client: &ApiClient) {
        self.tokens.mount();
        self.state.reset();
        let ticket = self.tokens.issue();
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);

        let fut = load(client.clone(), self.kind.clone(), self.title.clone(), self.days);
        tokio::spawn(async move {
            let result = fut.await;
            let _ = tx.send(Fetched { ticket, result });
        });
        info!(title = %self.title, days = self.days, "chart widget mounted");
    }

    pub fn unmount(&mut self) {
        if self.tokens.is_mounted() {
            self.tokens.unmount();
            self.rx = None;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.tokens.is_mounted()
    }

    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.rx.as_mut().and_then(|rx| rx.try_recv().ok()) {
            if self.apply(msg) {
                applied += 1;
            }
        }
        applied
    }

    pub fn apply(&mut self, msg: Fetched<ChartData>) -> bool {
        if !self.tokens.accept(msg.ticket) {
            debug!(title = %self.title, "dropping stale chart data");
            return false;
        }
        self.state.settle(msg.result);
        true
    }

    pub fn state(&self) -> &FetchState<ChartData> {
        &self.state
    }
}

/// Icon, caption and accent per card, in `stat_values` order.
pub fn stat_cards(labels: &Labels) -> [(&'static str, &str, Color); 5] {
    [
        ("👤", labels.stat_new_users.as_str(), BLUE),
        ("📝", labels.stat_total_submissions.as_str(), PURPLE),
        ("✅", labels.stat_correct.as_str(), GREEN),
        ("🔥", labels.stat_active_users.as_str(), ORANGE),
        ("📊", labels.stat_accuracy.as_str(), YELLOW),
    ]
}

/// Card values in `stat_cards` order.
pub fn stat_values(s: &ActivityStats) -> [String; 5] {
    [
        s.new_users.to_string(),
        s.total_submissions.to_string(),
        s.correct_submissions.to_string(),
        s.active_users.to_string(),
        format!("{}%", s.accuracy()),
    ]
}
