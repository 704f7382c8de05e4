use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::{format_uptime, kb_to_mb};
use crate::system::rank::SortMode;
use crate::system::snapshot::{MemorySample, SystemSnapshot};

pub const BAR_WIDTH: usize = 40;

/// Number of filled cells for `ratio` of a `width`-cell bar.
pub fn bar_fill(ratio: f64, width: usize) -> usize {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    ((ratio * width as f64).round() as usize).min(width)
}

pub fn memory_bar(memory: &MemorySample, width: usize) -> String {
    let ratio = memory.used_ratio();
    let fill = bar_fill(ratio, width);
    format!(
        "[{}{}] {:.1}%",
        "#".repeat(fill),
        "-".repeat(width - fill),
        ratio * 100.0
    )
}

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, sort_mode: SortMode) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let memory = &snapshot.memory;

    let summary = Line::from(vec![
        Span::styled("Uptime: ", label),
        Span::raw(format_uptime(snapshot.uptime_secs)),
        Span::styled("   CPU: ", label),
        Span::raw(format!("{:.1}%", snapshot.cpu_usage_percent)),
        Span::styled("   Tasks: ", label),
        Span::raw(snapshot.processes.len().to_string()),
        Span::styled("   Sort: ", label),
        Span::styled(sort_mode.label(), Style::default().fg(Color::Cyan)),
    ]);

    let memory_line = Line::from(vec![
        Span::styled("Memory: ", label),
        Span::raw(format!(
            "{:.0} MB total | {:.0} MB used | {:.0} MB available",
            kb_to_mb(memory.total_kb),
            kb_to_mb(memory.used_kb()),
            kb_to_mb(memory.available_kb),
        )),
    ]);

    let width = BAR_WIDTH.min((area.width as usize).saturating_sub(10));
    let bar = Line::from(Span::styled(
        memory_bar(memory, width),
        Style::default().fg(Color::Green),
    ));

    frame.render_widget(Paragraph::new(vec![summary, memory_line, bar]), area);
}
