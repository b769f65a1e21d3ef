//! UI module root: exposes drawing functions for individual panels.

pub mod chart;
pub mod devices;
pub mod header;
pub mod login;
pub mod summary;
pub mod theme;
pub mod util;
