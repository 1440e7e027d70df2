//! Server status panel state: a 5 s poll loop feeding three gauges.
//!
//! The poll loop runs as its own task and reports over a channel; the UI loop
//! drains it with `pump`. Unmount aborts the task (which owns the interval)
//! and disposes every gauge handle.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use tokio::{
    sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::{interval, timeout, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::api::{ApiError, StatusSource, REQUEST_TIMEOUT};
use crate::fetch::{FetchState, Fetched, RequestTokens, Ticket};
use crate::gauge::{GaugeName, GaugeRegistry};
use crate::types::ServerStatus;
use crate::ui::palette::Palette;

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct StatusWidget {
    state: FetchState<ServerStatus>,
    gauges: GaugeRegistry,
    last_updated: Option<DateTime<Local>>,
    tokens: RequestTokens,
    poller: Option<JoinHandle<()>>,
    rx: Option<UnboundedReceiver<Fetched<ServerStatus>>>,
    teardowns: usize,
}

impl Default for StatusWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusWidget {
    pub fn new() -> Self {
        Self {
            state: FetchState::new(),
            gauges: GaugeRegistry::new(),
            last_updated: None,
            tokens: RequestTokens::default(),
            poller: None,
            rx: None,
            teardowns: 0,
        }
    }

    /// Fetches now, then every `POLL_INTERVAL`. Remounting tears down first.
    pub fn mount(&mut self, source: Arc<dyn StatusSource>) {
        if self.is_mounted() {
            self.unmount();
        }
        let generation = self.tokens.mount();
        self.state.reset();
        self.last_updated = None;

        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        self.poller = Some(tokio::spawn(poll_status(source, tx, generation)));
        info!(generation, "status widget mounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.tokens.is_mounted()
    }

    /// Teardown: stop the timer, release gauges. Returns false if there was
    /// nothing mounted, so repeated calls are no-ops.
    pub fn unmount(&mut self) -> bool {
        if !self.tokens.is_mounted() {
            return false;
        }
        if let Some(task) = self.poller.take() {
            task.abort();
        }
        self.rx = None;
        self.tokens.unmount();
        let released = self.gauges.dispose();
        self.teardowns += 1;
        info!(released, "status widget unmounted");
        true
    }

    /// Applies everything the poll task has delivered so far.
    pub fn pump(&mut self, palette: &Palette) -> usize {
        let mut applied = 0;
        loop {
            let Some(rx) = self.rx.as_mut() else { break };
            match rx.try_recv() {
                Ok(msg) => {
                    if self.apply(msg, palette) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    pub fn apply(&mut self, msg: Fetched<ServerStatus>, palette: &Palette) -> bool {
        if !self.tokens.accept(msg.ticket) {
            debug!(ticket = ?msg.ticket, "dropping stale status result");
            return false;
        }
        match msg.result {
            Ok(status) => {
                self.update_gauges(&status, palette);
                self.state.succeed(status);
                let now = Local::now();
                self.last_updated = Some(match self.last_updated {
                    Some(prev) if prev > now => prev,
                    _ => now,
                });
            }
            Err(e) => {
                warn!(error = %e, "status fetch failed");
                self.state.fail(e.to_string());
            }
        }
        true
    }

    fn update_gauges(&mut self, s: &ServerStatus, palette: &Palette) {
        self.gauges
            .update(GaugeName::Cpu, s.cpu_usage_percent, 100.0, palette);
        self.gauges
            .update(GaugeName::Ram, s.ram_used_gb, s.ram_total_gb, palette);
        self.gauges.update(
            GaugeName::ProcessRam,
            s.process_ram_used_gb,
            s.process_ram_allocated_gb,
            palette,
        );
    }

    pub fn restyle(&mut self, palette: &Palette) {
        self.gauges.restyle(palette);
    }

    pub fn state(&self) -> &FetchState<ServerStatus> {
        &self.state
    }

    pub fn gauges(&self) -> &GaugeRegistry {
        &self.gauges
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Full-panel spinner only until the first snapshot arrives.
    pub fn show_spinner(&self) -> bool {
        self.state.is_loading() && self.state.data().is_none()
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns
    }

    pub fn generation(&self) -> u64 {
        self.tokens.generation()
    }
}

impl Drop for StatusWidget {
    fn drop(&mut self) {
        if let Some(task) = self.poller.take() {
            task.abort();
        }
    }
}

/// One request in flight at a time. Each fetch is cut off after
/// `REQUEST_TIMEOUT`, so a server that never answers still yields an error
/// and the next tick still runs.
async fn poll_status(
    source: Arc<dyn StatusSource>,
    tx: UnboundedSender<Fetched<ServerStatus>>,
    generation: u64,
) {
    let mut ticker = interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq = 0u64;
    loop {
        ticker.tick().await;
        seq += 1;
        let result = match timeout(REQUEST_TIMEOUT, source.fetch_status()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(seq, "status fetch timed out");
                Err(ApiError::Network(format!(
                    "no response within {}s",
                    REQUEST_TIMEOUT.as_secs()
                )))
            }
        };
        let msg = Fetched {
            ticket: Ticket::new(generation, seq),
            result,
        };
        if tx.send(msg).is_err() {
            // receiver gone: widget unmounted
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::ColorTier;

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

    // Drives a widget without spawning the poll task
    fn mounted_offline() -> StatusWidget {
        let mut w = StatusWidget::new();
        w.tokens.mount();
        w
    }

    fn msg(
        w: &StatusWidget,
        seq: u64,
        result: Result<ServerStatus, ApiError>,
    ) -> Fetched<ServerStatus> {
        Fetched {
            ticket: Ticket::new(w.generation(), seq),
            result,
        }
    }

    #[test]
    fn scenario_gauges_match_snapshot() {
        let palette = Palette::light();
        let mut w = mounted_offline();
        assert!(w.show_spinner());
        let m = msg(&w, 1, Ok(sample()));
        assert!(w.apply(m, &palette));

        let cpu = w.gauges().get(GaugeName::Cpu).unwrap();
        assert_eq!(cpu.percentage(), 45.0);
        assert_eq!(cpu.tier(), ColorTier::A);
        let ram = w.gauges().get(GaugeName::Ram).unwrap();
        assert_eq!(ram.percentage(), 37.5);
        assert_eq!(ram.tier(), ColorTier::A);
        let proc_ram = w.gauges().get(GaugeName::ProcessRam).unwrap();
        assert!((proc_ram.percentage() - 60.0).abs() < 1e-9);
        assert_eq!(proc_ram.tier(), ColorTier::B);
        assert!(w.last_updated().is_some());
        assert!(!w.show_spinner());
    }

    #[test]
    fn failure_keeps_last_snapshot_visible() {
        let palette = Palette::light();
        let mut w = mounted_offline();
        let ok = msg(&w, 1, Ok(sample()));
        w.apply(ok, &palette);
        let stamp = w.last_updated();
        let err = msg(&w, 2, Err(ApiError::Http(500, "boom".into())));
        w.apply(err, &palette);

        assert_eq!(w.state().data(), Some(&sample()));
        assert_eq!(w.state().error(), Some("HTTP 500: boom"));
        assert_eq!(w.last_updated(), stamp);
        assert!(!w.show_spinner());
        assert_eq!(w.gauges().live_count(), 3);
    }

    #[test]
    fn zero_totals_render_as_zero_percent() {
        let palette = Palette::light();
        let mut w = mounted_offline();
        let mut s = sample();
        s.ram_total_gb = 0.0;
        s.process_ram_allocated_gb = 0.0;
        let m = msg(&w, 1, Ok(s));
        w.apply(m, &palette);
        assert_eq!(w.gauges().get(GaugeName::Ram).unwrap().percentage(), 0.0);
        assert_eq!(
            w.gauges().get(GaugeName::ProcessRam).unwrap().percentage(),
            0.0
        );
    }

    #[test]
    fn out_of_order_result_is_ignored() {
        let palette = Palette::light();
        let mut w = mounted_offline();
        let mut newer = sample();
        newer.cpu_usage_percent = 90.0;
        let m2 = msg(&w, 2, Ok(newer));
        let m1 = msg(&w, 1, Ok(sample()));
        assert!(w.apply(m2, &palette));
        assert!(!w.apply(m1, &palette));
        assert_eq!(w.gauges().get(GaugeName::Cpu).unwrap().percentage(), 90.0);
    }

    #[test]
    fn unmount_runs_teardown_once() {
        let palette = Palette::light();
        let mut w = mounted_offline();
        for seq in 1..=4 {
            let m = msg(&w, seq, Ok(sample()));
            w.apply(m, &palette);
        }
        assert_eq!(w.gauges().created_count(), 3);
        assert!(w.unmount());
        assert!(!w.unmount());
        assert_eq!(w.teardowns(), 1);
        assert_eq!(w.gauges().live_count(), 0);
        assert_eq!(w.gauges().destroyed_count(), 3);

        // late arrival from the old mount
        let late = Fetched {
            ticket: Ticket::new(w.generation() - 1, 5),
            result: Ok(sample()),
        };
        assert!(!w.apply(late, &palette));
        assert_eq!(w.gauges().live_count(), 0);
    }
}
