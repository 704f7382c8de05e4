use std::cmp::Ordering;

use super::process::ProcessRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    Pid,
    /// Orders by `cpu_percent`, which is always 0 today, so the input order survives.
    Cpu,
    #[default]
    Memory,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Memory => SortMode::Cpu,
            SortMode::Cpu => SortMode::Pid,
            SortMode::Pid => SortMode::Memory,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Pid => "PID",
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pid" | "id" => SortMode::Pid,
            "cpu" => SortMode::Cpu,
            _ => SortMode::Memory,
        }
    }

    fn compare(self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            SortMode::Pid => a.pid.cmp(&b.pid),
            SortMode::Cpu => b.cpu_percent.total_cmp(&a.cpu_percent),
            SortMode::Memory => b.resident_kb.cmp(&a.resident_kb),
        }
    }
}

/// Stable sort, so ties keep the incoming (ascending pid) order.
pub fn rank(mut records: Vec<ProcessRecord>, mode: SortMode) -> Vec<ProcessRecord> {
    records.sort_by(|a, b| mode.compare(a, b));
    records
}
