//! Program output. Everything is emitted as a tracing event on [`PRINT_TARGET`]
//! so it is written through the same writer as the progress bar and never tears it.

use std::fmt::Display;

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

pub const PRINT_TARGET: &str = "sweep::print";

/// Width of headers, rules and centred lines.
const WIDTH: usize = 64;
/// Keys in [`field`] are padded with dots to this width.
const KEY_WIDTH: usize = 12;

#[macro_export]
macro_rules! sprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title = format!(" sweep v{} ", env!("CARGO_PKG_VERSION"));
    let side = "━".repeat(WIDTH.saturating_sub(title.width()) / 2);
    print(&format!(
        "{}{}{}",
        side.color(colors::SEPARATOR),
        title.color(colors::PRIMARY).bold(),
        side.color(colors::SEPARATOR)
    ));
}

/// `── TITLE ────…`, padded to the full width.
pub fn header(title: &str) {
    let label = format!("── {} ", title.to_uppercase());
    let tail = "─".repeat(WIDTH.saturating_sub(label.width()));
    print(&format!("{}{}", label.color(colors::PRIMARY), tail.color(colors::SEPARATOR)));
}

pub fn rule() {
    print(&"═".repeat(WIDTH).color(colors::SEPARATOR).to_string());
}

/// `Key.........: value`
pub fn field(key: &str, value: impl Display) {
    let dots = ".".repeat(KEY_WIDTH.saturating_sub(key.width()) + 1);
    bullet(format!(
        "{}{} {}",
        key.color(colors::PRIMARY),
        format!("{dots}:").color(colors::SEPARATOR),
        value
    ));
}

pub fn bullet(msg: impl Display) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg));
}

pub fn centered(msg: &str) {
    let pad = WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{}", " ".repeat(pad), msg));
}

pub fn no_results() {
    bullet("no open targets found".red().bold());
}
