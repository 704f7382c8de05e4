use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::app::StatusMessage;
use crate::system::process::ProcessRecord;
use crate::system::rank::SortMode;
use crate::system::snapshot::{MemorySample, SystemSnapshot};
use crate::ui::{header, process_table, statusbar};

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_buffer<F>(width: u16, height: u16, draw: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal.backend().buffer().clone()
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    buffer_to_string(&render_buffer(width, height, draw))
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
        .collect()
}

fn make_process(pid: u32, command: &str, resident_kb: u64) -> ProcessRecord {
    ProcessRecord {
        pid,
        user: "root".to_string(),
        command: command.to_string(),
        state: 'S',
        resident_kb,
        mem_percent: 0.0,
        cpu_percent: 0.0,
    }
}

fn make_snapshot() -> SystemSnapshot {
    SystemSnapshot {
        cpu_usage_percent: 12.5,
        memory: MemorySample {
            total_kb: 16_384_000,
            free_kb: 2_000_000,
            available_kb: 8_000_000,
        },
        uptime_secs: 5400.0,
        processes: vec![
            make_process(20, "big", 5000),
            make_process(300, "mid", 700),
        ],
        ..SystemSnapshot::default()
    }
}

#[test]
fn memory_bar_fill_matches_used_ratio() {
    let memory = make_snapshot().memory;
    let bar = header::memory_bar(&memory, header::BAR_WIDTH);
    assert_eq!(
        bar,
        format!("[{}{}] 51.2%", "#".repeat(20), "-".repeat(20))
    );
}

#[test]
fn bar_fill_rounds_and_clamps() {
    assert_eq!(header::bar_fill(0.5117, 40), 20);
    assert_eq!(header::bar_fill(0.99, 40), 40);
    assert_eq!(header::bar_fill(1.7, 40), 40);
    assert_eq!(header::bar_fill(-0.2, 40), 0);
    assert_eq!(header::bar_fill(f64::NAN, 40), 0);
}

#[test]
fn header_shows_summary_and_memory() {
    let snapshot = make_snapshot();
    let output = render_to_string(100, 3, |frame| {
        header::render(frame, Rect::new(0, 0, 100, 3), &snapshot, SortMode::Memory);
    });

    assert!(output.contains("Uptime: 1.50 hrs"));
    assert!(output.contains("CPU: 12.5%"));
    assert!(output.contains("Tasks: 2"));
    assert!(output.contains("Sort: Memory"));
    assert!(output.contains("16000 MB total | 8188 MB used | 7812 MB available"));
    assert!(output.contains("51.2%"));
}

#[test]
fn table_highlights_selected_row() {
    let processes = vec![
        make_process(20, "big", 5000),
        make_process(300, "mid", 700),
        make_process(1, "init", 100),
    ];
    let buf = render_buffer(60, 6, |frame| {
        process_table::render(frame, Rect::new(0, 0, 60, 6), &processes, 1);
    });

    assert!(row_text(&buf, 0).starts_with("PID     USER       STATE"));
    assert!(row_text(&buf, 2).starts_with("20 "));
    assert!(row_text(&buf, 3).starts_with("300 "));

    let selected = buf.cell((0, 3)).unwrap();
    assert!(selected.modifier.contains(Modifier::REVERSED));
    let other = buf.cell((0, 2)).unwrap();
    assert!(!other.modifier.contains(Modifier::REVERSED));
}

#[test]
fn table_truncates_to_available_height() {
    let processes: Vec<ProcessRecord> = (1..=50)
        .map(|pid| make_process(pid, "worker", 10))
        .collect();
    let buf = render_buffer(60, 5, |frame| {
        process_table::render(frame, Rect::new(0, 0, 60, 5), &processes, 0);
    });

    // Header + rule + three rows.
    assert!(row_text(&buf, 2).starts_with("1 "));
    assert!(row_text(&buf, 4).starts_with("3 "));
}

#[test]
fn table_scrolls_to_keep_selection_visible() {
    let processes: Vec<ProcessRecord> = (1..=50)
        .map(|pid| make_process(pid, "worker", 10))
        .collect();
    let buf = render_buffer(60, 5, |frame| {
        process_table::render(frame, Rect::new(0, 0, 60, 5), &processes, 40);
    });

    assert!(row_text(&buf, 4).starts_with("41 "));
    assert!(buf.cell((0, 4)).unwrap().modifier.contains(Modifier::REVERSED));
}

#[test]
fn empty_table_shows_header_only() {
    let output = render_to_string(60, 4, |frame| {
        process_table::render(frame, Rect::new(0, 0, 60, 4), &[], 0);
    });
    let rows: Vec<&str> = output.lines().collect();
    assert!(rows[0].starts_with("PID"));
    assert!(rows[2].trim().is_empty());
    assert!(rows[3].trim().is_empty());
}

#[test]
fn footer_lists_commands() {
    let entries = vec![
        ("p/c/m".to_string(), "Sort PID/CPU/Mem"),
        ("k".to_string(), "Kill"),
        ("q".to_string(), "Quit"),
    ];
    let output = render_to_string(80, 2, |frame| {
        statusbar::render_footer(frame, Rect::new(0, 0, 80, 2), &entries);
    });
    assert!(output.contains(" p/c/m  Sort PID/CPU/Mem"));
    assert!(output.contains(" k  Kill"));
    assert!(output.contains(" q  Quit"));
}

#[test]
fn status_line_shows_kill_outcome() {
    let status = StatusMessage {
        text: "PID 42 no longer exists".to_string(),
        is_error: true,
    };
    let output = render_to_string(40, 1, |frame| {
        statusbar::render_status(frame, Rect::new(0, 0, 40, 1), Some(&status));
    });
    assert!(output.starts_with(" PID 42 no longer exists"));

    let blank = render_to_string(40, 1, |frame| {
        statusbar::render_status(frame, Rect::new(0, 0, 40, 1), None);
    });
    assert!(blank.trim().is_empty());
}
