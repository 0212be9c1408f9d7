//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick stands for a
//! host-chosen number of milliseconds (the robot controller's basic time
//! step, 32 ms by default in most simulators).  Every send and every receive
//! on the medium costs exactly one tick, so the clock also counts radio
//! operations.
//!
//! The clock never sleeps: advancing it is pure bookkeeping.  A host that
//! needs real-time pacing does so behind its own `Stepper` implementation.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Default controller time step, in milliseconds.
pub const DEFAULT_TIME_STEP_MS: u32 = 32;

/// Tick counter plus the simulated milliseconds those ticks represent.
///
/// Steps may carry different durations (the host decides), so elapsed time is
/// accumulated rather than derived from `current_tick`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick: advanced by [`SimClock::step`].
    pub current_tick: Tick,
    /// Simulated milliseconds since tick 0.
    pub elapsed_ms:   u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick lasting `time_step_ms`.
    #[inline]
    pub fn step(&mut self, time_step_ms: u32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_ms += u64::from(time_step_ms);
    }

    /// Elapsed simulated time as (seconds, milliseconds).
    pub fn elapsed_secs_ms(&self) -> (u64, u32) {
        (self.elapsed_ms / 1_000, (self.elapsed_ms % 1_000) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, ms) = self.elapsed_secs_ms();
        write!(f, "{} ({}.{:03} s)", self.current_tick, s, ms)
    }
}
