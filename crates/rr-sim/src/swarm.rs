//! The `Swarm` struct and its tick loop.

use rr_core::{PeerId, Position, SimClock, Tick};
use rr_radio::BroadcastMedium;

use crate::{Behavior, Robot, SimResult, SwarmConfig, SwarmObserver, TickContext};

/// The swarm runner.
///
/// Holds the shared medium, every robot, and the behavior they all run.
/// Create via [`SwarmBuilder`][crate::SwarmBuilder].
pub struct Swarm<B: Behavior> {
    pub config: SwarmConfig,

    /// Counts completed rounds.
    pub clock: SimClock,

    /// The channel every robot's radio is attached to.
    pub medium: BroadcastMedium,

    /// Robots in roster order.
    pub robots: Vec<Robot>,

    pub behavior: B,
}

impl<B: Behavior> Swarm<B> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run rounds from the current tick to `config.end_tick()`.
    pub fn run<O: SwarmObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.process_tick(observer)?;
        }
        observer.on_swarm_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` rounds from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SwarmObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(observer)?;
        }
        Ok(())
    }

    pub fn robot(&self, id: &PeerId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == *id)
    }

    pub fn robot_mut(&mut self, id: &PeerId) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.id == *id)
    }

    /// Move a robot's radio on the medium.
    pub fn move_robot(&mut self, id: &PeerId, position: Position) -> SimResult<()> {
        Ok(self.medium.move_radio(id, position)?)
    }

    /// Total number of messages waiting in all inboxes.
    pub fn inbox_total(&self) -> usize {
        self.robots.iter().map(|r| r.inbox.len()).sum()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SwarmObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now: Tick = self.clock.current_tick;
        observer.on_tick_start(now);

        let ctx = TickContext { tick: now, time_step_ms: self.config.time_step_ms };
        for robot in &mut self.robots {
            self.behavior.on_tick(robot, &ctx)?;
        }

        observer.on_tick_end(now, &self.robots);
        self.clock.step(self.config.time_step_ms);
        Ok(())
    }
}
