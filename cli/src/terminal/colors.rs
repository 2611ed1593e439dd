use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const PATH: Color = Color::Cyan;
pub const LOCKED: Color = Color::Red;
pub const UNLOCKED: Color = Color::Green;

pub const TIER_NONE: Color = Color::BrightBlack;
pub const TIER_BASIC: Color = Color::White;
pub const TIER_SCRIPT: Color = Color::Magenta;
pub const TIER_DIAMOND: Color = Color::BrightCyan;
pub const TIER_INFINITY: Color = Color::BrightYellow;
