use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::{debug, warn};

/// Delivers a signal to a pid.
pub trait SignalSender {
    fn send(&self, pid: u32, signal: Signal) -> Result<(), Errno>;
}

/// Signals through `kill(2)`.
pub struct HostSignals;

impl SignalSender for HostSignals {
    fn send(&self, pid: u32, sig: Signal) -> Result<(), Errno> {
        // 0 and values past i32::MAX would address process groups.
        let raw = i32::try_from(pid)
            .ok()
            .filter(|raw| *raw > 0)
            .ok_or(Errno::ESRCH)?;
        signal::kill(Pid::from_raw(raw), sig)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    Signaled,
    AlreadyGone,
    Escalated,
    Failed(String),
}

impl KillOutcome {
    pub fn message(&self, pid: u32) -> String {
        match self {
            KillOutcome::Signaled => format!("Sent SIGTERM to PID {pid}"),
            KillOutcome::AlreadyGone => format!("PID {pid} no longer exists"),
            KillOutcome::Escalated => format!("SIGTERM failed; sent SIGKILL to PID {pid}"),
            KillOutcome::Failed(reason) => format!("Failed to terminate PID {pid}: {reason}"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, KillOutcome::Signaled | KillOutcome::Escalated)
    }
}

pub struct ProcessController {
    signals: Box<dyn SignalSender>,
}

impl Default for ProcessController {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessController {
    pub fn new() -> Self {
        Self::with_sender(HostSignals)
    }

    pub fn with_sender(sender: impl SignalSender + 'static) -> Self {
        ProcessController {
            signals: Box::new(sender),
        }
    }

    /// SIGTERM, then a single SIGKILL escalation unless the process is already gone.
    pub fn terminate(&self, pid: u32) -> KillOutcome {
        let err = match self.signals.send(pid, Signal::SIGTERM) {
            Ok(()) => {
                debug!(pid, "sent SIGTERM");
                return KillOutcome::Signaled;
            }
            Err(Errno::ESRCH) => {
                debug!(pid, "process already gone");
                return KillOutcome::AlreadyGone;
            }
            Err(err) => err,
        };

        warn!(pid, %err, "SIGTERM failed, escalating to SIGKILL");
        match self.signals.send(pid, Signal::SIGKILL) {
            Ok(()) => KillOutcome::Escalated,
            Err(err) => {
                warn!(pid, %err, "SIGKILL failed");
                KillOutcome::Failed(err.desc().to_string())
            }
        }
    }
}
