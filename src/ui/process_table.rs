use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::format::{fit_width, kb_to_mb};
use crate::system::process::ProcessRecord;

const USER_WIDTH: usize = 10;

pub fn header_line() -> String {
    format!(
        "{:<7} {:<10} {:<6} {:>10} {:>7}  {}",
        "PID", "USER", "STATE", "MEM(MB)", "MEM%", "COMMAND"
    )
}

pub fn format_row(process: &ProcessRecord) -> String {
    format!(
        "{:<7} {} {:<6} {:>10.2} {:>7.2}  {}",
        process.pid,
        fit_width(&process.user, USER_WIDTH),
        process.state,
        kb_to_mb(process.resident_kb),
        process.mem_percent,
        process.command
    )
}

/// First row to draw so that `selected` stays inside a `visible`-row viewport.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    selected.saturating_sub(visible - 1)
}

/// Header, rule, then as many rows as fit. The selected row is drawn reversed.
pub fn render(frame: &mut Frame, area: Rect, processes: &[ProcessRecord], selected: usize) {
    if area.height == 0 {
        return;
    }
    let width = area.width as usize;
    let visible = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(selected, visible);

    let mut lines = vec![
        Line::styled(
            fit_width(&header_line(), width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw("\u{2500}".repeat(width)),
    ];

    for (i, process) in processes.iter().enumerate().skip(offset).take(visible) {
        let style = if i == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::styled(fit_width(&format_row(process), width), style));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
