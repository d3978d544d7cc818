//! Background execution of controllers.
//!
//! Every controller in [`motion`](crate::motion) is advanced by calling its
//! [`Updatable::update`] once per cycle. A [`Runner`] owns that loop so the
//! autonomous routine never has to manage timing itself: start one runner per
//! controller, submit goals, and wait for completion.
//!
//! Calls on one runner never overlap, since the next cycle only starts after
//! `update()` returns. Once [`Runner::stop`] returns no further `update()`
//! will begin; a call that was already in flight is allowed to finish.
//!
//! On the host each runner is an OS thread. On the V5 Brain it is a `vexide`
//! task, scheduled cooperatively with the rest of the program.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rev::motion::runner::Runner;
//!
//! let odom = Arc::new(TwoRotationInertialOdometry::new(forward, lateral, imu));
//! let _odom_runner = Runner::with_default_period(odom.clone());
//!
//! // ...the pose now updates every 10 ms until the runner is dropped.
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use humantime::format_duration;
use log::info;

use crate::clock::uptime;

/// Period used by [`Runner::with_default_period`].
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(10);

/// Something that advances by one step each time it is called.
///
/// Implementations use interior mutability, since the runner and the code
/// submitting goals share the same instance.
pub trait Updatable: Send + Sync {
    fn update(&self);
}

/// Repeatedly calls [`Updatable::update`] on a fixed period.
///
/// Dropping a runner stops it.
pub struct Runner {
    stop:   Arc<AtomicBool>,
    period: Duration,
    #[cfg(not(target_os = "vexos"))]
    handle: Option<std::thread::JoinHandle<()>>,
}

impl Runner {
    /// Starts calling `target.update()` every `period`.
    ///
    /// The first update happens immediately. Each cycle then sleeps for
    /// whatever is left of the period; an overrun delays the next cycle
    /// instead of triggering a catch-up burst.
    pub fn start(target: Arc<dyn Updatable>, period: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        info!("Runner started with a {} period", format_duration(period));
        Self::spawn(target, period, stop)
    }

    /// Starts a runner with the [`DEFAULT_PERIOD`].
    pub fn with_default_period(target: Arc<dyn Updatable>) -> Self {
        Self::start(target, DEFAULT_PERIOD)
    }

    pub fn period(&self) -> Duration { self.period }

    pub fn is_running(&self) -> bool { !self.stop.load(Ordering::Acquire) }

    #[cfg(not(target_os = "vexos"))]
    fn spawn(target: Arc<dyn Updatable>, period: Duration, stop: Arc<AtomicBool>) -> Self {
        let flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || run_loop(target.as_ref(), period, &flag));
        Self {
            stop,
            period,
            handle: Some(handle),
        }
    }

    #[cfg(target_os = "vexos")]
    fn spawn(target: Arc<dyn Updatable>, period: Duration, stop: Arc<AtomicBool>) -> Self {
        let flag = Arc::clone(&stop);
        vexide::task::spawn(async move {
            while !flag.load(Ordering::Acquire) {
                let started = uptime();
                target.update();
                let elapsed = uptime().saturating_sub(started);
                vexide::time::sleep(period.saturating_sub(elapsed)).await;
            }
        })
        .detach();
        Self { stop, period }
    }

    /// Stops the loop.
    ///
    /// On the host this waits for the runner thread to exit, so no update
    /// can begin after it returns. On the V5 Brain the task observes the flag
    /// before its next cycle.
    pub fn stop(&mut self) {
        if self.stop.swap(true, Ordering::AcqRel) {
            return;
        }
        #[cfg(not(target_os = "vexos"))]
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            // A target that stops its own runner cannot wait for itself.
            if handle.thread().id() != std::thread::current().id() {
                let _ = handle.join();
            }
        }
        info!("Runner stopped");
    }
}

impl Drop for Runner {
    fn drop(&mut self) { self.stop(); }
}

#[cfg(not(target_os = "vexos"))]
fn run_loop(target: &dyn Updatable, period: Duration, stop: &AtomicBool) {
    while !stop.load(Ordering::Acquire) {
        let deadline = uptime() + period;
        target.update();
        loop {
            let now = uptime();
            if now >= deadline || stop.load(Ordering::Acquire) {
                break;
            }
            std::thread::park_timeout(deadline - now);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::AtomicUsize,
        thread,
        time::{Duration, Instant},
    };

    use super::*;

    #[derive(Default)]
    struct Counter {
        started:  AtomicUsize,
        finished: AtomicUsize,
        active:   AtomicBool,
        overlaps: AtomicUsize,
        work:     Duration,
    }

    impl Updatable for Counter {
        fn update(&self) {
            if self.active.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            self.started.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.work);
            self.finished.fetch_add(1, Ordering::SeqCst);
            self.active.store(false, Ordering::SeqCst);
        }
    }

    fn wait_for(counter: &Counter, at_least: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.started.load(Ordering::SeqCst) < at_least {
            assert!(Instant::now() < deadline, "runner never reached {at_least} updates");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn updates_repeatedly_until_stopped() {
        let counter = Arc::new(Counter::default());
        let mut runner = Runner::start(counter.clone(), Duration::from_millis(2));
        assert!(runner.is_running());
        wait_for(&counter, 5);

        runner.stop();
        assert!(!runner.is_running());
        let after_stop = counter.started.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(counter.started.load(Ordering::SeqCst), after_stop);
        assert_eq!(counter.overlaps.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_lets_in_flight_update_finish() {
        let counter = Arc::new(Counter {
            work: Duration::from_millis(40),
            ..Default::default()
        });
        let mut runner = Runner::start(counter.clone(), Duration::from_millis(1));
        wait_for(&counter, 1);

        runner.stop();
        let started = counter.started.load(Ordering::SeqCst);
        assert_eq!(counter.finished.load(Ordering::SeqCst), started);
        thread::sleep(Duration::from_millis(60));
        assert_eq!(counter.started.load(Ordering::SeqCst), started);
    }

    #[test]
    fn dropping_stops_the_loop() {
        let counter = Arc::new(Counter::default());
        let runner = Runner::with_default_period(counter.clone());
        assert_eq!(runner.period(), DEFAULT_PERIOD);
        wait_for(&counter, 2);

        drop(runner);
        let after_drop = counter.started.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(counter.started.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn period_bounds_the_update_rate() {
        let counter = Arc::new(Counter::default());
        let runner = Runner::start(counter.clone(), Duration::from_millis(20));
        thread::sleep(Duration::from_millis(100));
        drop(runner);
        // At most one call per period, plus the immediate first call.
        assert!(counter.started.load(Ordering::SeqCst) <= 6);
    }
}
