use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::StatusMessage;

/// Rule on the first row, command hints on the second.
pub fn render_footer(frame: &mut Frame, area: Rect, entries: &[(String, &str)]) {
    let mut spans = Vec::new();
    for (key, desc) in entries {
        spans.extend(pill_spans(key, desc));
    }
    let lines = vec![
        Line::raw("\u{2500}".repeat(area.width as usize)),
        Line::from(spans),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let color = if status.is_error {
        Color::Red
    } else {
        Color::Green
    };
    let line = Line::from(Span::styled(
        format!(" {}", status.text),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
        ),
        Span::raw(format!(" {desc}")),
    ]
}
