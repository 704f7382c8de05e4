use tracing::debug;

use super::catalog::build_catalog;
use super::reader::ProcReader;
use super::snapshot::{ProcessorSample, SystemSnapshot};

pub struct Collector {
    reader: ProcReader,
    prev_cpu: Option<ProcessorSample>,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(ProcReader::default())
    }
}

impl Collector {
    pub fn new(reader: ProcReader) -> Self {
        Collector {
            reader,
            prev_cpu: None,
        }
    }

    /// Samples one full cycle. The process list is unranked, in ascending pid order.
    pub fn refresh(&mut self) -> SystemSnapshot {
        let _refresh_span = tracing::debug_span!("collector.refresh").entered();

        let cpu = self.reader.read_processor_sample();
        let cpu_usage_percent = self
            .prev_cpu
            .map(|prev| cpu.busy_percent_since(&prev))
            .unwrap_or(0.0);
        self.prev_cpu = Some(cpu);

        let memory = self.reader.read_memory_sample();
        let uptime_secs = self.reader.read_uptime_seconds();
        let pids = self.reader.list_live_process_ids();
        let processes = build_catalog(&self.reader, &pids, memory.total_kb);

        debug!(
            processes = processes.len(),
            total_kb = memory.total_kb,
            available_kb = memory.available_kb,
            "snapshot collected"
        );

        SystemSnapshot {
            cpu_usage_percent,
            memory,
            uptime_secs,
            processes,
        }
    }
}
