use super::process::ProcessRecord;
use super::reader::ProcReader;

/// Reads one record per id and fills in memory percent of `total_kb`.
/// Output keeps the order of `ids`.
pub fn build_catalog(reader: &ProcReader, ids: &[u32], total_kb: u64) -> Vec<ProcessRecord> {
    ids.iter()
        .map(|&pid| reader.read_process_record(pid).with_mem_percent(total_kb))
        .collect()
}
