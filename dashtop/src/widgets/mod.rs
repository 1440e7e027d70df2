//! Data-fetching widgets and the page that decides which of them are mounted.

pub mod admin_chart;
pub mod recent;
pub mod status;

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, StatusSource};
use crate::config::Labels;
use crate::types::{QuestionRow, SubmissionRow, UserRow};
use crate::ui::palette::Palette;
use admin_chart::{ChartKind, ChartWidget};
use recent::RecentWidget;
use status::StatusWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Users,
    Questions,
    Submissions,
}

pub struct Widgets {
    pub status: StatusWidget,
    pub questions: RecentWidget<QuestionRow>,
    pub users: RecentWidget<UserRow>,
    pub submissions: RecentWidget<SubmissionRow>,
    pub activity: ChartWidget,
    pub stats: ChartWidget,
    page: Option<Page>,
}

impl Widgets {
    pub fn new(labels: &Labels, days: u32) -> Self {
        Self {
            status: StatusWidget::new(),
            questions: RecentWidget::new(&labels.recent_questions),
            users: RecentWidget::new(&labels.recent_users),
            submissions: RecentWidget::new(&labels.recent_submissions),
            activity: ChartWidget::new(
                &labels.activity_chart,
                ChartKind::activity(labels),
                days,
            ),
            stats: ChartWidget::new(&labels.activity_stats, ChartKind::stats(), days),
            page: None,
        }
    }

    pub fn page(&self) -> Option<Page> {
        self.page
    }

    /// Swaps the mounted set: everything on the old page goes down first.
    pub fn mount_page(&mut self, page: Page, client: &ApiClient) {
        self.unmount_all();
        match page {
            Page::Dashboard => {
                let source: Arc<dyn StatusSource> = Arc::new(client.clone());
                self.status.mount(source);
                self.questions.mount(client);
                self.users.mount(client);
                self.submissions.mount(client);
                self.activity.mount(client);
                self.stats.mount(client);
            }
            Page::Users => self.users.mount(client),
            Page::Questions => self.questions.mount(client),
            Page::Submissions => self.submissions.mount(client),
        }
        self.page = Some(page);
        info!(?page, "page mounted");
    }

    pub fn unmount_all(&mut self) {
        self.status.unmount();
        self.questions.unmount();
        self.users.unmount();
        self.submissions.unmount();
        self.activity.unmount();
        self.stats.unmount();
        self.page = None;
    }

    pub fn pump(&mut self, palette: &Palette) -> usize {
        self.status.pump(palette)
            + self.questions.pump()
            + self.users.pump()
            + self.submissions.pump()
            + self.activity.pump()
            + self.stats.pump()
    }

    /// Language switch: titles and series names follow the new label table.
    /// Row text is looked up at draw time.
    pub fn relabel(&mut self, labels: &Labels) {
        self.questions.set_title(&labels.recent_questions);
        self.users.set_title(&labels.recent_users);
        self.submissions.set_title(&labels.recent_submissions);
        self.activity.set_title(&labels.activity_chart);
        self.activity
            .set_series_labels(&[labels.registrations.as_str(), labels.solved.as_str()]);
        self.stats.set_title(&labels.activity_stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relabel_follows_language() {
        let mut w = Widgets::new(&Labels::english(), 30);
        assert_eq!(w.users.title(), "Recent Users");
        w.relabel(&Labels::turkish());
        assert_eq!(w.users.title(), "Son Kullanıcılar");
        assert_eq!(w.stats.title(), "Aktivite");
        assert!(matches!(
            w.activity.kind(),
            ChartKind::Combined { series } if series[0].label == "Kayıtlar"
        ));
        assert!(w.page().is_none());
    }
}
