//! Gauge math and the owned handle map behind the status panel's three gauges.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use ratatui::style::Color;
use tracing::debug;

use crate::ui::palette::Palette;

pub const TIER_B_FROM: f64 = 60.0;
pub const TIER_C_FROM: f64 = 80.0;

/// `value / max` as a percentage in 0..=100; zero (or nonsense) max reads as 0.
pub fn gauge_percentage(value: f64, max: f64) -> f64 {
    if !(max > 0.0) || !value.is_finite() || !max.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    A,
    B,
    C,
}

impl ColorTier {
    pub fn for_percentage(pct: f64) -> Self {
        if pct < TIER_B_FROM {
            ColorTier::A
        } else if pct < TIER_C_FROM {
            ColorTier::B
        } else {
            ColorTier::C
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GaugeName {
    Cpu,
    Ram,
    ProcessRam,
}

impl GaugeName {
    pub const ALL: [GaugeName; 3] = [GaugeName::Cpu, GaugeName::Ram, GaugeName::ProcessRam];

    pub fn as_str(self) -> &'static str {
        match self {
            GaugeName::Cpu => "cpu",
            GaugeName::Ram => "ram",
            GaugeName::ProcessRam => "processRam",
        }
    }
}

/// A two-slice half donut: `[used, 100 - used]`.
#[derive(Debug)]
pub struct GaugeHandle {
    name: GaugeName,
    slices: [f64; 2],
    fill: Color,
    track: Color,
    animate: bool,
    redraws: u64,
}

impl GaugeHandle {
    fn create(name: GaugeName, pct: f64, fill: Color, track: Color) -> Self {
        Self {
            name,
            slices: [pct, 100.0 - pct],
            fill,
            track,
            animate: false,
            redraws: 1,
        }
    }

    fn set(&mut self, pct: f64, fill: Color, track: Color) {
        self.slices = [pct, 100.0 - pct];
        self.fill = fill;
        self.track = track;
        self.request_redraw();
    }

    fn request_redraw(&mut self) {
        self.animate = false;
        self.redraws += 1;
    }

    fn destroy(self) -> GaugeName {
        debug!(gauge = self.name.as_str(), "gauge destroyed");
        self.name
    }

    pub fn name(&self) -> GaugeName {
        self.name
    }

    pub fn percentage(&self) -> f64 {
        self.slices[0]
    }

    pub fn slices(&self) -> [f64; 2] {
        self.slices
    }

    pub fn tier(&self) -> ColorTier {
        ColorTier::for_percentage(self.slices[0])
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn track(&self) -> Color {
        self.track
    }

    pub fn animates(&self) -> bool {
        self.animate
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

/// At most one live handle per name. Handles are created on first update,
/// mutated afterwards and only released through `dispose`.
#[derive(Debug, Default)]
pub struct GaugeRegistry {
    handles: BTreeMap<GaugeName, GaugeHandle>,
    created: usize,
    destroyed: usize,
}

impl GaugeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        name: GaugeName,
        value: f64,
        max: f64,
        palette: &Palette,
    ) -> &GaugeHandle {
        let pct = gauge_percentage(value, max);
        let fill = palette.tier(ColorTier::for_percentage(pct));
        let track = palette.gauge_track;

        match self.handles.entry(name) {
            Entry::Occupied(o) => {
                let h = o.into_mut();
                h.set(pct, fill, track);
                h
            }
            Entry::Vacant(v) => {
                self.created += 1;
                debug!(gauge = name.as_str(), pct, "gauge created");
                v.insert(GaugeHandle::create(name, pct, fill, track))
            }
        }
    }

    /// Re-colors the unused slice of every live handle (theme change).
    pub fn restyle(&mut self, palette: &Palette) {
        for h in self.handles.values_mut() {
            let pct = h.percentage();
            let fill = h.fill;
            h.set(pct, fill, palette.gauge_track);
        }
    }

    pub fn get(&self, name: GaugeName) -> Option<&GaugeHandle> {
        self.handles.get(&name)
    }

    pub fn live_count(&self) -> usize {
        self.handles.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Destroys every held handle; returns how many were released.
    pub fn dispose(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let n = handles.into_values().map(GaugeHandle::destroy).count();
        self.destroyed += n;
        n
    }
}
