pub const UNKNOWN_USER: &str = "unknown";
pub const UNKNOWN_STATE: char = '?';

/// Index of the resident-set-size field, counted from the first field after `)`.
const RSS_FIELD: usize = 21;

/// One live process as displayed in the table.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub user: String,
    pub command: String,
    pub state: char,
    pub resident_kb: u64,
    pub mem_percent: f32,
    /// Always 0: no interval sampling of per-process ticks is done.
    pub cpu_percent: f32,
}

/// Fields taken from `/proc/<pid>/stat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatFields {
    pub name: String,
    pub state: char,
    pub rss_pages: u64,
}

impl Default for StatFields {
    fn default() -> Self {
        StatFields {
            name: String::new(),
            state: UNKNOWN_STATE,
            rss_pages: 0,
        }
    }
}

/// Per-source results for one pid. Each group defaults on its own.
#[derive(Clone, Debug, Default)]
pub struct ProcessParts {
    pub stat: Option<StatFields>,
    pub argv: Option<String>,
    pub owner: Option<String>,
}

impl ProcessRecord {
    pub fn from_parts(pid: u32, parts: ProcessParts, page_size: u64) -> Self {
        let stat = parts.stat.unwrap_or_default();
        let resident_kb = stat.rss_pages.saturating_mul(page_size) / 1024;
        ProcessRecord {
            pid,
            user: parts.owner.unwrap_or_else(|| UNKNOWN_USER.to_string()),
            command: parts.argv.unwrap_or(stat.name),
            state: stat.state,
            resident_kb,
            mem_percent: 0.0,
            cpu_percent: 0.0,
        }
    }

    pub fn with_mem_percent(mut self, total_kb: u64) -> Self {
        self.mem_percent = mem_percent(self.resident_kb, total_kb);
        self
    }
}

pub fn mem_percent(resident_kb: u64, total_kb: u64) -> f32 {
    if total_kb == 0 {
        return 0.0;
    }
    (100.0 * resident_kb as f64 / total_kb as f64) as f32
}

/// Parses a stat line. The command name is everything between the first `(`
/// and the last `)`, so names containing spaces or parentheses survive.
pub fn parse_stat_line(line: &str) -> Option<StatFields> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    if close <= open {
        return None;
    }

    let name = line[open + 1..close].to_string();
    let fields: Vec<&str> = line[close + 1..].split_whitespace().collect();
    let state = fields
        .first()
        .and_then(|f| f.chars().next())
        .unwrap_or(UNKNOWN_STATE);
    let rss_pages = fields
        .get(RSS_FIELD)
        .and_then(|f| f.parse::<i64>().ok())
        .map(|pages| pages.max(0) as u64)
        .unwrap_or(0);

    Some(StatFields {
        name,
        state,
        rss_pages,
    })
}

/// Joins a NUL-separated argument vector with single spaces.
/// Returns `None` for kernel threads and other empty vectors.
pub fn join_cmdline(raw: &[u8]) -> Option<String> {
    let joined = raw
        .split(|b| *b == 0)
        .filter(|piece| !piece.is_empty())
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

/// Real uid from the `Uid:` line of `/proc/<pid>/status`.
pub fn parse_status_uid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|uid| uid.parse().ok())
}

/// A well-formed stat line with `rss_pages` in the resident-set-size slot.
#[doc(hidden)]
pub fn stat_line(pid: u32, name: &str, state: char, rss_pages: u64) -> String {
    format!(
        "{pid} ({name}) {state} 1 {pid} {pid} 0 -1 4194560 120 0 0 0 7 3 0 0 20 0 1 0 4242 9000000 {rss_pages} 18446744073709551615 1 1 0 0 0 0 0 0 0 17 0 0 0"
    )
}
