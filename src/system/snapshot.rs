use super::process::ProcessRecord;

/// Aggregate CPU counters from the first line of `/proc/stat`, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl ProcessorSample {
    /// Parses the aggregate `cpu` line. Anything else yields an all-zero sample.
    pub fn parse(text: &str) -> Self {
        let Some(line) = text.lines().next() else {
            return Self::default();
        };
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("cpu") {
            return Self::default();
        }
        let mut next = || {
            tokens
                .next()
                .and_then(|t| t.parse::<u64>().ok())
                .unwrap_or(0)
        };
        ProcessorSample {
            user: next(),
            nice: next(),
            system: next(),
            idle: next(),
        }
    }

    pub fn active(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
    }

    pub fn total(&self) -> u64 {
        self.active().saturating_add(self.idle)
    }

    /// System-wide busy percentage over the interval since `prev`.
    pub fn busy_percent_since(&self, prev: &ProcessorSample) -> f32 {
        let total = self.total().saturating_sub(prev.total());
        if total == 0 {
            return 0.0;
        }
        let active = self.active().saturating_sub(prev.active());
        (active as f64 / total as f64 * 100.0).clamp(0.0, 100.0) as f32
    }
}

/// Memory counters from `/proc/meminfo`, in KiB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub total_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
}

impl MemorySample {
    pub fn parse(text: &str) -> Self {
        let mut sample = MemorySample::default();
        let (mut total, mut free, mut available) = (false, false, false);

        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(key), value) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let value = value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            match key {
                "MemTotal:" => {
                    sample.total_kb = value;
                    total = true;
                }
                "MemFree:" => {
                    sample.free_kb = value;
                    free = true;
                }
                "MemAvailable:" => {
                    sample.available_kb = value;
                    available = true;
                }
                _ => {}
            }
            if total && free && available {
                break;
            }
        }
        sample
    }

    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available_kb)
    }

    pub fn used_ratio(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        self.used_kb() as f64 / self.total_kb as f64
    }
}

pub fn parse_uptime(text: &str) -> f64 {
    text.split_whitespace()
        .next()
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Everything sampled in one refresh cycle.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    pub cpu_usage_percent: f32,
    pub memory: MemorySample,
    pub uptime_secs: f64,
    pub processes: Vec<ProcessRecord>,
}
