pub mod header;
pub mod process_table;
pub mod statusbar;

use color_eyre::Result;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::{DefaultTerminal, Frame};

use crate::app::App;

const TITLE: &str = " proctop ";

/// The full-screen terminal, restored on drop whichever way the program exits.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    /// Enters raw mode and the alternate screen. Also installs a panic hook
    /// that restores the terminal before the panic message prints.
    pub fn start() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(TerminalSession { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

pub fn draw(frame: &mut Frame, app: &App) {
    let frame_block = Block::bordered()
        .title(Line::from(TITLE).centered())
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = frame_block.inner(frame.area());
    frame.render_widget(frame_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

    header::render(frame, chunks[0], &app.snapshot, app.sort_mode);
    process_table::render(frame, chunks[2], app.processes(), app.selected_index);
    statusbar::render_footer(frame, chunks[3], &app.keybinds.footer_entries());
    statusbar::render_status(frame, chunks[4], app.status_message.as_ref());
}

#[cfg(test)]
mod tests;
