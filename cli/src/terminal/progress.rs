use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TEMPLATE: &str = "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} probed {msg}";

/// Opens the span that carries the scan's progress bar.
///
/// The bar is only drawn while the span is entered. A hidden bar is a disabled span.
pub fn scan_span(total: usize, hidden: bool) -> Span {
    if hidden {
        return Span::none();
    }

    let span = info_span!("scan", indicatif.pb_show = true);

    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        let style = style.progress_chars("=> ").tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);
        span.pb_set_style(&style);
    }
    span.pb_set_length(total as u64);
    span
}

pub fn advance(span: &Span, open: usize) {
    span.pb_inc(1);
    if open > 0 {
        span.pb_set_message(&format!("({open} open)"));
    }
}
