//! One fetch-on-mount table widget, parameterized over the row kind
//! (questions, users, submissions).

use ratatui::style::Color;
use serde::de::DeserializeOwned;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::config::Labels;
use crate::fetch::{FetchState, Fetched, RequestTokens};
use crate::types::{QuestionRow, SubmissionRow, UserRow};
use crate::ui::palette::{BLUE, GRAY, GREEN, RED, YELLOW};

#[derive(Debug, Clone, PartialEq)]
pub enum Tone {
    Plain,
    Strong,
    Muted,
    Badge(Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowCell {
    pub text: String,
    pub tone: Tone,
}

impl RowCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Strong,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Muted,
        }
    }

    pub fn badge(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Badge(color),
        }
    }
}

/// A column: header text and relative width.
pub type Column = (String, u16);

pub trait RecentRow: DeserializeOwned + Send + 'static {
    const PATH: &'static str;
    const LIMIT: Option<u32>;

    fn columns(labels: &Labels) -> Vec<Column>;
    fn empty(labels: &Labels) -> &str;
    fn cells(&self, labels: &Labels) -> Vec<RowCell>;
}

pub fn difficulty_badge(level: i64, labels: &Labels) -> (&str, Color) {
    match level {
        1 => (labels.easy.as_str(), GREEN),
        2 => (labels.medium.as_str(), BLUE),
        3 => (labels.hard.as_str(), YELLOW),
        4 => (labels.very_hard.as_str(), RED),
        _ => (labels.unknown.as_str(), GRAY),
    }
}

pub fn correctness_badge(correct: bool, labels: &Labels) -> (&str, Color) {
    if correct {
        (labels.passed.as_str(), GREEN)
    } else {
        (labels.failed.as_str(), RED)
    }
}

fn col(header: &str, width: u16) -> Column {
    (header.to_string(), width)
}

impl RecentRow for QuestionRow {
    const PATH: &'static str = "/api/last-questions-detail";
    const LIMIT: Option<u32> = Some(5);

    fn columns(labels: &Labels) -> Vec<Column> {
        vec![
            col(&labels.col_question_title, 50),
            col(&labels.col_difficulty, 18),
            col(&labels.col_points, 10),
            col(&labels.col_date, 22),
        ]
    }

    fn empty(labels: &Labels) -> &str {
        &labels.no_questions
    }

    fn cells(&self, labels: &Labels) -> Vec<RowCell> {
        let (label, color) = difficulty_badge(self.difficulty, labels);
        vec![
            RowCell::strong(&self.title),
            RowCell::badge(label, color),
            RowCell::plain(self.points.to_string()),
            RowCell::muted(&self.created_at),
        ]
    }
}

impl RecentRow for UserRow {
    const PATH: &'static str = "/api/recent-users";
    const LIMIT: Option<u32> = None;

    fn columns(labels: &Labels) -> Vec<Column> {
        vec![
            col(&labels.col_username, 25),
            col(&labels.col_email, 35),
            col(&labels.col_roles, 20),
            col(&labels.col_date, 20),
        ]
    }

    fn empty(labels: &Labels) -> &str {
        &labels.no_users
    }

    fn cells(&self, _labels: &Labels) -> Vec<RowCell> {
        vec![
            RowCell::strong(&self.username),
            RowCell::muted(&self.email),
            RowCell::badge(self.roles.join(", "), BLUE),
            RowCell::muted(&self.registered),
        ]
    }
}

impl RecentRow for SubmissionRow {
    const PATH: &'static str = "/api/last-submissions";
    const LIMIT: Option<u32> = Some(10);

    fn columns(labels: &Labels) -> Vec<Column> {
        vec![
            col(&labels.col_user, 18),
            col(&labels.col_question, 34),
            col(&labels.col_result, 12),
            col(&labels.col_time_ms, 12),
            col(&labels.col_date, 24),
        ]
    }

    fn empty(labels: &Labels) -> &str {
        &labels.no_submissions
    }

    fn cells(&self, labels: &Labels) -> Vec<RowCell> {
        let (label, color) = correctness_badge(self.is_correct, labels);
        vec![
            RowCell::strong(&self.username),
            RowCell::strong(&self.question_title),
            RowCell::badge(label, color),
            RowCell::plain(format!("{:.2}", self.execution_time)),
            RowCell::muted(&self.created_at),
        ]
    }
}

/// Exactly one of these is drawn.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, R> {
    Loading,
    Failed(&'a str),
    Empty,
    Rows(&'a [R]),
}

pub struct RecentWidget<R: RecentRow> {
    title: String,
    state: FetchState<Vec<R>>,
    tokens: RequestTokens,
    rx: Option<UnboundedReceiver<Fetched<Vec<R>>>>,
}

impl<R: RecentRow> RecentWidget<R> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: FetchState::new(),
            tokens: RequestTokens::default(),
            rx: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_rows(title: &str, rows: Vec<R>) -> Self {
        let mut w = Self::new(title);
        w.begin();
        w.state.succeed(rows);
        w
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Starts the single fetch. The request is not cancelled on unmount; its
    /// result is dropped on arrival instead.
    pub fn mount(&mut self, client: &ApiClient) {
        self.begin();
        let ticket = self.tokens.issue();
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);

        let client = client.clone();
        tokio::spawn(async move {
            let query: Vec<(&str, String)> = R::LIMIT
                .map(|n| vec![("limit", n.to_string())])
                .unwrap_or_default();
            let result = client.get_json::<Vec<R>>(R::PATH, &query).await;
            let _ = tx.send(Fetched { ticket, result });
        });
        info!(path = R::PATH, "recent widget mounted");
    }

    fn begin(&mut self) {
        self.tokens.mount();
        self.state.reset();
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

    pub fn apply(&mut self, msg: Fetched<Vec<R>>) -> bool {
        if !self.tokens.accept(msg.ticket) {
            debug!(path = R::PATH, "dropping stale rows");
            return false;
        }
        self.state.settle(msg.result);
        true
    }

    pub fn view(&self) -> ListView<'_, R> {
        if self.state.is_loading() {
            return ListView::Loading;
        }
        if let Some(e) = self.state.error() {
            return ListView::Failed(e);
        }
        match self.state.data() {
            Some(rows) if !rows.is_empty() => ListView::Rows(rows),
            _ => ListView::Empty,
        }
    }
}
