//! Program uptime.
//!
//! On the V5 Brain this is the user program uptime reported by VEXos. On other
//! platforms it is measured from the first call, which is close enough to
//! program start for logging and loop timing.

use std::time::Duration;

/// Time since the user program started.
#[cfg(target_os = "vexos")]
pub fn uptime() -> Duration { vexide::time::user_uptime() }

/// Time since the user program started.
#[cfg(not(target_os = "vexos"))]
pub fn uptime() -> Duration {
    static START: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
    START.get_or_init(std::time::Instant::now).elapsed()
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    #[test]
    fn uptime_is_monotonic() {
        let first = super::uptime();
        thread::sleep(Duration::from_millis(2));
        assert!(super::uptime() >= first + Duration::from_millis(2));
    }
}
