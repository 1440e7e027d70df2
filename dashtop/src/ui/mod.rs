//! UI module root: exposes drawing functions for individual panels.

pub mod chart;
pub mod dropdown;
pub mod footer;
pub mod header;
pub mod palette;
pub mod recent;
pub mod sidebar;
pub mod status;
pub mod util;
