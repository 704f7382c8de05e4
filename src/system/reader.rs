use std::fs;
use std::path::{Path, PathBuf};

use nix::unistd::{SysconfVar, Uid, User, sysconf};
use tracing::{debug, trace};

use super::process::{
    ProcessParts, ProcessRecord, join_cmdline, parse_stat_line, parse_status_uid,
};
use super::snapshot::{MemorySample, ProcessorSample, parse_uptime};

const FALLBACK_PAGE_SIZE: u64 = 4096;

pub type UserLookup = fn(u32) -> Option<String>;

/// Reads kernel text sources under a procfs root.
///
/// Every read degrades to a zero or sentinel value when the source is
/// missing or malformed; processes exiting mid-read are expected.
pub struct ProcReader {
    root: PathBuf,
    page_size: u64,
    lookup_user: UserLookup,
}

impl Default for ProcReader {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcReader {
            root: root.into(),
            page_size: host_page_size(),
            lookup_user: lookup_user_name,
        }
    }

    pub fn with_page_size(mut self, bytes: u64) -> Self {
        self.page_size = bytes;
        self
    }

    pub fn with_user_lookup(mut self, lookup: UserLookup) -> Self {
        self.lookup_user = lookup;
        self
    }

    /// Kernel text may carry arbitrary bytes (process names); invalid UTF-8 is replaced.
    fn read_text(&self, path: &Path) -> Option<String> {
        match fs::read(path) {
            Ok(raw) => Some(String::from_utf8_lossy(&raw).into_owned()),
            Err(err) => {
                trace!(path = %path.display(), %err, "source unavailable");
                None
            }
        }
    }

    pub fn read_processor_sample(&self) -> ProcessorSample {
        self.read_text(&self.root.join("stat"))
            .map(|text| ProcessorSample::parse(&text))
            .unwrap_or_default()
    }

    pub fn read_memory_sample(&self) -> MemorySample {
        self.read_text(&self.root.join("meminfo"))
            .map(|text| MemorySample::parse(&text))
            .unwrap_or_default()
    }

    pub fn read_uptime_seconds(&self) -> f64 {
        self.read_text(&self.root.join("uptime"))
            .map(|text| parse_uptime(&text))
            .unwrap_or(0.0)
    }

    /// Numeric entries of the procfs root, ascending.
    pub fn list_live_process_ids(&self) -> Vec<u32> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(root = %self.root.display(), %err, "cannot enumerate processes");
                return Vec::new();
            }
        };

        let mut pids: Vec<u32> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name();
                let name = name.to_str()?;
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                name.parse::<u32>().ok().filter(|pid| *pid > 0)
            })
            .collect();
        pids.sort_unstable();
        pids
    }

    pub fn read_process_record(&self, pid: u32) -> ProcessRecord {
        ProcessRecord::from_parts(pid, self.read_process_parts(pid), self.page_size)
    }

    fn read_process_parts(&self, pid: u32) -> ProcessParts {
        let dir = self.root.join(pid.to_string());

        let stat = self
            .read_text(&dir.join("stat"))
            .and_then(|text| text.lines().next().and_then(parse_stat_line));
        if stat.is_none() {
            trace!(pid, "stat missing or malformed");
        }

        let argv = fs::read(dir.join("cmdline"))
            .ok()
            .and_then(|raw| join_cmdline(&raw));

        let owner = self
            .read_text(&dir.join("status"))
            .and_then(|text| parse_status_uid(&text))
            .and_then(self.lookup_user);

        ProcessParts { stat, argv, owner }
    }
}

fn host_page_size() -> u64 {
    match sysconf(SysconfVar::PAGE_SIZE) {
        Ok(Some(size)) if size > 0 => size as u64,
        _ => FALLBACK_PAGE_SIZE,
    }
}

fn lookup_user_name(uid: u32) -> Option<String> {
    User::from_uid(Uid::from_raw(uid))
        .ok()
        .flatten()
        .map(|user| user.name)
}
