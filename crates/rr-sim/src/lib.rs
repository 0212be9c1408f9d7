//! `rr-sim`: an in-process host for a swarm of communicating robots.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   for robot in roster order:
//!     behavior.on_tick(robot)      // sends and receives through robot.comm
//!   observer.on_tick_end(tick, &robots)
//!   advance swarm clock
//! ```
//!
//! Each robot's radio keeps its own clock: every send and every receive
//! advances it by one tick, exactly as a controller's blocking step would.
//! The swarm clock counts rounds of the loop above.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`config`]   | `SwarmConfig`                                              |
//! | [`robot`]    | `Robot`: comm manager, inbox, known peers, RNG            |
//! | [`behavior`] | `Behavior` trait, `TickContext`, `NoopBehavior`, `RelayBehavior` |
//! | [`swarm`]    | `Swarm` and its tick loop                                  |
//! | [`builder`]  | `SwarmBuilder`                                             |
//! | [`observer`] | `SwarmObserver`, `NoopObserver`                            |
//! | [`roster`]   | `RosterEntry`, `load_roster_csv`, `load_roster_reader`     |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let roster = load_roster_reader(Cursor::new(ROSTER_CSV))?;
//! let mut swarm = SwarmBuilder::new(config, RelayBehavior::default())
//!     .roster(roster)
//!     .build()?;
//! swarm.run(&mut NoopObserver)?;
//! ```

pub mod behavior;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod robot;
pub mod roster;
pub mod swarm;


pub use behavior::{Behavior, NoopBehavior, RelayBehavior, TickContext, RELAY_MEMORY_TICKS};
pub use builder::SwarmBuilder;
pub use config::SwarmConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SwarmObserver};
pub use robot::Robot;
pub use roster::{load_roster_csv, load_roster_reader, RosterEntry};
pub use swarm::Swarm;
