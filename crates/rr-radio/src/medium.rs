//! In-process broadcast medium with limited range.
//!
//! # Delivery model
//!
//! Every frame a radio emits is copied into the receive queue of each *other*
//! attached radio whose distance to the sender is at most `range_m`, then
//! each copy is independently dropped with `loss_probability`.  Delivery is
//! immediate: the frame is queued before `send` returns, and a receiver sees
//! it the next time it drains its queue.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps radio positions to roster slots so in-range
//! receivers are found without scanning every radio.  Moving a radio marks
//! the index dirty; it is rebuilt with `bulk_load` on the next emission.
//!
//! # Ownership
//!
//! One medium is shared by every radio of a swarm through `Rc<RefCell<_>>`.
//! That makes [`RadioDevice`] `!Send`, which matches the single-threaded,
//! tick-driven model of the communication manager.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use log::trace;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rr_core::{PeerId, Position, SimClock, SimRng};

use crate::{Emitter, RadioError, RadioResult, Receiver, Stepper};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Physical parameters of the shared channel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediumConfig {
    /// Maximum sender→receiver distance in metres.  `<= 0` means unlimited.
    pub range_m: f32,

    /// Probability in `[0, 1]` that any single delivery is lost.
    pub loss_probability: f64,

    /// Seed for the loss RNG.
    pub seed: u64,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            range_m:          0.0,
            loss_probability: 0.0,
            seed:             0,
        }
    }
}

impl MediumConfig {
    pub fn validate(&self) -> RadioResult<()> {
        if !self.range_m.is_finite() {
            return Err(RadioError::Config(format!("range_m must be finite, got {}", self.range_m)));
        }
        if !(0.0..=1.0).contains(&self.loss_probability) {
            return Err(RadioError::Config(format!(
                "loss_probability must be in [0, 1], got {}",
                self.loss_probability
            )));
        }
        Ok(())
    }

    #[inline]
    fn is_unlimited(&self) -> bool {
        self.range_m <= 0.0
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a radio's position with its
/// slot in the medium.
#[derive(Clone)]
struct RadioEntry {
    position: Position,
    slot:     usize,
}

impl RTreeObject for RadioEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position.as_array())
    }
}

impl PointDistance for RadioEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        self.position.distance_sq(Position::new(point[0], point[1]))
    }
}

// ── Shared state ──────────────────────────────────────────────────────────────

struct RadioSlot {
    id:       PeerId,
    position: Position,
    queue:    VecDeque<String>,
}

struct MediumState {
    config:         MediumConfig,
    radios:         Vec<RadioSlot>,
    slot_of:        HashMap<PeerId, usize>,
    spatial_idx:    RTree<RadioEntry>,
    index_dirty:    bool,
    rng:            SimRng,
    frames_emitted: u64,
}

impl MediumState {
    fn rebuild_index(&mut self) {
        let entries: Vec<RadioEntry> = self
            .radios
            .iter()
            .enumerate()
            .map(|(slot, r)| RadioEntry { position: r.position, slot })
            .collect();
        self.spatial_idx = RTree::bulk_load(entries);
        self.index_dirty = false;
    }

    /// Slots of every radio that can hear `from`, ascending.
    fn receivers_of(&mut self, from: usize) -> Vec<usize> {
        let mut slots: Vec<usize> = if self.config.is_unlimited() {
            (0..self.radios.len()).collect()
        } else {
            if self.index_dirty {
                self.rebuild_index();
            }
            let origin = self.radios[from].position.as_array();
            let range_sq = self.config.range_m * self.config.range_m;
            self.spatial_idx
                .locate_within_distance(origin, range_sq)
                .map(|e| e.slot)
                .collect()
        };
        slots.retain(|&s| s != from);
        slots.sort_unstable();
        slots
    }

    fn emit(&mut self, from: usize, frame: &str) {
        self.frames_emitted += 1;
        let loss = self.config.loss_probability;
        for slot in self.receivers_of(from) {
            if loss > 0.0 && self.rng.gen_bool(loss) {
                trace!("{} -> {} : lost : {}", self.radios[from].id, self.radios[slot].id, frame);
                continue;
            }
            self.radios[slot].queue.push_back(frame.to_owned());
        }
    }
}

// ── BroadcastMedium ───────────────────────────────────────────────────────────

/// Handle to one shared channel.  Cloning shares the same channel.
#[derive(Clone)]
pub struct BroadcastMedium {
    state: Rc<RefCell<MediumState>>,
}

impl BroadcastMedium {
    pub fn new(config: MediumConfig) -> RadioResult<Self> {
        config.validate()?;
        let rng = SimRng::new(config.seed);
        Ok(Self {
            state: Rc::new(RefCell::new(MediumState {
                config,
                radios:         Vec::new(),
                slot_of:        HashMap::new(),
                spatial_idx:    RTree::new(),
                index_dirty:    false,
                rng,
                frames_emitted: 0,
            })),
        })
    }

    /// Register a radio named `id` at `position` and return its device.
    pub fn attach(&self, id: PeerId, position: Position) -> RadioResult<RadioDevice> {
        check_position(&id, position)?;
        let mut state = self.state.borrow_mut();
        if state.slot_of.contains_key(&id) {
            return Err(RadioError::DuplicateRadio(id));
        }
        let slot = state.radios.len();
        state.radios.push(RadioSlot { id: id.clone(), position, queue: VecDeque::new() });
        state.slot_of.insert(id.clone(), slot);
        state.index_dirty = true;
        Ok(RadioDevice {
            id,
            slot,
            medium: Rc::clone(&self.state),
            clock: SimClock::new(),
        })
    }

    /// Move an attached radio.
    pub fn move_radio(&self, id: &PeerId, position: Position) -> RadioResult<()> {
        check_position(id, position)?;
        let mut state = self.state.borrow_mut();
        let slot = *state
            .slot_of
            .get(id)
            .ok_or_else(|| RadioError::UnknownRadio(id.clone()))?;
        state.radios[slot].position = position;
        state.index_dirty = true;
        Ok(())
    }

    pub fn position_of(&self, id: &PeerId) -> Option<Position> {
        let state = self.state.borrow();
        state.slot_of.get(id).map(|&slot| state.radios[slot].position)
    }

    /// Frames waiting in `id`'s receive queue.
    pub fn pending_for(&self, id: &PeerId) -> Option<usize> {
        let state = self.state.borrow();
        state.slot_of.get(id).map(|&slot| state.radios[slot].queue.len())
    }

    /// Total emissions since the medium was created.
    pub fn frames_emitted(&self) -> u64 {
        self.state.borrow().frames_emitted
    }

    pub fn radio_count(&self) -> usize {
        self.state.borrow().radios.len()
    }
}

fn check_position(id: &PeerId, position: Position) -> RadioResult<()> {
    if !position.is_finite() {
        return Err(RadioError::Config(format!("radio {id} placed at non-finite position {position}")));
    }
    Ok(())
}

// ── RadioDevice ───────────────────────────────────────────────────────────────

/// One robot's emitter, receiver and clock on a [`BroadcastMedium`].
pub struct RadioDevice {
    id:     PeerId,
    slot:   usize,
    medium: Rc<RefCell<MediumState>>,
    clock:  SimClock,
}

impl std::fmt::Debug for RadioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioDevice")
            .field("id", &self.id)
            .field("slot", &self.slot)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl RadioDevice {
    pub fn id(&self) -> &PeerId {
        &self.id
    }

    /// This radio's local clock, advanced by every [`Stepper::step`].
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }
}

impl Emitter for RadioDevice {
    fn send(&mut self, frame: &str) {
        self.medium.borrow_mut().emit(self.slot, frame);
    }
}

impl Receiver for RadioDevice {
    fn queue_length(&self) -> usize {
        self.medium.borrow().radios[self.slot].queue.len()
    }

    fn next_frame(&mut self) -> Option<String> {
        self.medium.borrow_mut().radios[self.slot].queue.pop_front()
    }

    fn advance_to_next_frame(&mut self) {
        self.medium.borrow_mut().radios[self.slot].queue.pop_front();
    }
}

impl Stepper for RadioDevice {
    fn step(&mut self, time_step_ms: u32) {
        self.clock.step(time_step_ms);
    }
}
