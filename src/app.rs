use std::thread;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use crate::action::{Action, Direction};
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::event::EventSource;
use crate::system::collector::Collector;
use crate::system::kill::ProcessController;
use crate::system::process::ProcessRecord;
use crate::system::rank::{SortMode, rank};
use crate::system::reader::ProcReader;
use crate::system::snapshot::SystemSnapshot;
use crate::ui;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub kill: KeyCode,
    pub sort_pid: KeyCode,
    pub sort_cpu: KeyCode,
    pub sort_memory: KeyCode,
    pub cycle_sort: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            sort_pid: parse_key(&kb.sort_pid).unwrap_or(KeyCode::Char('p')),
            sort_cpu: parse_key(&kb.sort_cpu).unwrap_or(KeyCode::Char('c')),
            sort_memory: parse_key(&kb.sort_memory).unwrap_or(KeyCode::Char('m')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
        }
    }

    /// (key_label, description) pairs for the footer.
    pub fn footer_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (
                format!(
                    "{}/{}/{}",
                    key_label(self.sort_pid),
                    key_label(self.sort_cpu),
                    key_label(self.sort_memory)
                ),
                "Sort PID/CPU/Mem",
            ),
            (key_label(self.cycle_sort), "Cycle sort"),
            ("\u{2191}\u{2193}".to_string(), "Navigate"),
            (key_label(self.kill), "Kill"),
            (key_label(self.quit), "Quit"),
        ]
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

/// Letter keys match regardless of case.
fn key_matches(bound: KeyCode, pressed: KeyCode) -> bool {
    match (bound, pressed) {
        (KeyCode::Char(b), KeyCode::Char(p)) => b.eq_ignore_ascii_case(&p),
        _ => bound == pressed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Clamps `selected` into `[0, len)`, or 0 for an empty list.
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 { 0 } else { selected.min(len - 1) }
}

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub controller: ProcessController,
    pub snapshot: SystemSnapshot,
    pub selected_index: usize,
    pub sort_mode: SortMode,
    pub status_message: Option<StatusMessage>,
    pub keybinds: ResolvedKeybinds,
    pub refresh_rate: Duration,
    pub kill_pause: Duration,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let reader = ProcReader::new(&config.general.proc_root);
        Self::with_parts(Collector::new(reader), ProcessController::new(), config)
    }

    pub fn with_parts(collector: Collector, controller: ProcessController, config: &Config) -> Self {
        App {
            running: true,
            collector,
            controller,
            snapshot: SystemSnapshot::default(),
            selected_index: 0,
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            refresh_rate: Duration::from_millis(config.general.refresh_rate_ms),
            kill_pause: Duration::from_millis(config.general.kill_pause_ms),
        }
    }

    /// Samples, ranks and clamps the selection. Clears the previous status message.
    pub fn refresh_data(&mut self) {
        self.status_message = None;
        self.snapshot = self.collector.refresh();
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let processes = std::mem::take(&mut self.snapshot.processes);
        self.snapshot.processes = rank(processes, self.sort_mode);
        self.selected_index = clamp_selection(self.selected_index, self.processes().len());
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.snapshot.processes
    }

    pub fn selected_process(&self) -> Option<&ProcessRecord> {
        self.snapshot.processes.get(self.selected_index)
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.selected_process().map(|p| p.pid)
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::Navigate(Direction::Up);
        }
        if let KeyCode::Down = code {
            return Action::Navigate(Direction::Down);
        }

        if key_matches(kb.quit, code) {
            return Action::Quit;
        }
        if key_matches(kb.kill, code) {
            return match self.selected_pid() {
                Some(pid) => Action::Kill(pid),
                None => Action::None,
            };
        }
        if key_matches(kb.sort_pid, code) {
            return Action::SortBy(SortMode::Pid);
        }
        if key_matches(kb.sort_cpu, code) {
            return Action::SortBy(SortMode::Cpu);
        }
        if key_matches(kb.sort_memory, code) {
            return Action::SortBy(SortMode::Memory);
        }
        if key_matches(kb.cycle_sort, code) {
            return Action::CycleSortMode;
        }

        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::Kill(pid) => {
                let outcome = self.controller.terminate(pid);
                debug!(pid, ?outcome, "kill requested");
                self.status_message = Some(StatusMessage {
                    text: outcome.message(pid),
                    is_error: !outcome.is_success(),
                });
            }
            Action::SortBy(mode) => {
                self.sort_mode = mode;
                self.apply_sort();
            }
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                self.apply_sort();
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.processes().len();
        let target = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => self.selected_index + 1,
        };
        self.selected_index = clamp_selection(target, len);
    }
}

/// The refresh loop: sample, rank, draw, then wait up to `refresh_rate` for a key.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut impl EventSource,
) -> Result<()> {
    while app.running {
        app.refresh_data();
        draw(terminal, app)?;

        let Some(key) = events.next_key(app.refresh_rate)? else {
            continue;
        };
        let action = app.map_key(key);
        let is_kill = matches!(action, Action::Kill(_));
        app.dispatch(action);

        if is_kill {
            // Keep the outcome on screen before the next cycle redraws over it.
            draw(terminal, app)?;
            thread::sleep(app.kill_pause);
        }
    }
    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<()> {
    terminal
        .draw(|frame| ui::draw(frame, app))
        .map_err(|e| eyre!("failed to draw frame: {e}"))?;
    Ok(())
}
