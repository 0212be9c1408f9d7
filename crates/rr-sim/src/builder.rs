//! Fluent builder for constructing a [`Swarm`].

use std::collections::HashMap;

use rr_comm::CommManager;
use rr_core::{AgentRng, PeerId, SimClock};
use rr_radio::BroadcastMedium;

use crate::roster::check_roster;
use crate::{Behavior, Robot, RosterEntry, SimError, SimResult, Swarm, SwarmConfig};

/// Fluent builder for [`Swarm<B>`].
///
/// # Required inputs
///
/// - [`SwarmConfig`]: tick count, seed, comm settings, medium settings
/// - `B: Behavior`: the behavior every robot runs
/// - a roster, via [`roster`][Self::roster]
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                               |
/// |---------------------|---------------------------------------|
/// | `.known_peers(m)`   | every robot knows every other robot   |
///
/// # Example
///
/// ```rust,ignore
/// let mut swarm = SwarmBuilder::new(config, RelayBehavior::default())
///     .roster(load_roster_csv(path)?)
///     .build()?;
/// swarm.run(&mut NoopObserver)?;
/// ```
pub struct SwarmBuilder<B: Behavior> {
    config:      SwarmConfig,
    behavior:    B,
    roster:      Vec<RosterEntry>,
    known_peers: Option<HashMap<PeerId, Vec<PeerId>>>,
}

impl<B: Behavior> SwarmBuilder<B> {
    pub fn new(config: SwarmConfig, behavior: B) -> Self {
        Self {
            config,
            behavior,
            roster:      Vec::new(),
            known_peers: None,
        }
    }

    /// Robots to create, in the order they act each round.
    pub fn roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = roster;
        self
    }

    /// Explicit known-peer lists by robot name.
    ///
    /// Robots missing from the map know nobody.
    pub fn known_peers(mut self, known_peers: HashMap<PeerId, Vec<PeerId>>) -> Self {
        self.known_peers = Some(known_peers);
        self
    }

    /// Validate inputs, attach every robot to a fresh medium, and return a
    /// ready-to-run [`Swarm`].
    pub fn build(self) -> SimResult<Swarm<B>> {
        if self.roster.is_empty() {
            return Err(SimError::Config("roster is empty".into()));
        }
        if self.config.time_step_ms == 0 {
            return Err(SimError::Config("time_step_ms must be positive".into()));
        }
        check_roster(&self.roster)?;

        let medium = BroadcastMedium::new(self.config.medium.clone())?;
        let mut known_peers = self.known_peers;

        let mut robots = Vec::with_capacity(self.roster.len());
        for (slot, entry) in self.roster.iter().enumerate() {
            let device = medium.attach(entry.id.clone(), entry.position)?;
            let comm = CommManager::new(self.config.comm_config_for(&entry.id), device)?;
            let peers = match known_peers.as_mut() {
                Some(map) => map.remove(&entry.id).unwrap_or_default(),
                None => self
                    .roster
                    .iter()
                    .filter(|other| other.id != entry.id)
                    .map(|other| other.id.clone())
                    .collect(),
            };
            let rng = AgentRng::new(self.config.seed, slot as u32);
            robots.push(Robot::new(comm, peers, rng));
        }

        Ok(Swarm {
            config:   self.config,
            clock:    SimClock::new(),
            medium,
            robots,
            behavior: self.behavior,
        })
    }
}
