//! Swarm observer trait for progress reporting and data collection.

use rr_core::Tick;

use crate::Robot;

/// Callbacks invoked by [`Swarm::run`][crate::Swarm::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SwarmObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, robots: &[Robot]) {
///         if tick.0 % self.interval == 0 {
///             log::info!("tick {tick}: {} robots", robots.len());
///         }
///     }
/// }
/// ```
pub trait SwarmObserver {
    /// Called at the very start of each round, before any behavior runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every robot has run its behavior for this round.
    fn on_tick_end(&mut self, _tick: Tick, _robots: &[Robot]) {}

    /// Called once after the final round completes.
    fn on_swarm_end(&mut self, _final_tick: Tick) {}
}

/// A [`SwarmObserver`] that does nothing.
pub struct NoopObserver;

impl SwarmObserver for NoopObserver {}
