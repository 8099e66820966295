use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const OPEN: Color = Color::BrightGreen;
pub const CLOSED: Color = Color::BrightBlack;
pub const UNREACHABLE: Color = Color::Yellow;
pub const TIMED_OUT: Color = Color::BrightYellow;
pub const ERROR: Color = Color::Red;
