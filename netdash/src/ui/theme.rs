//! Shared UI theme constants.

use ratatui::style::Color;

pub const ONLINE: Color = Color::Green;
pub const OFFLINE: Color = Color::Red;
pub const UNKNOWN: Color = Color::DarkGray;
pub const ACCENT: Color = Color::Cyan;
pub const STALE: Color = Color::Yellow;

// Scrollbar colors
pub const SB_ARROW: Color = Color::Rgb(170, 170, 180);
pub const SB_TRACK: Color = Color::Rgb(170, 170, 180);
pub const SB_THUMB: Color = Color::Rgb(170, 170, 180);
