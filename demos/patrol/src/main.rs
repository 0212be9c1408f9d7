//! patrol: smallest runnable scenario for the robot_relay framework.
//!
//! Six robots and a remote controller share a 12 m-range radio channel laid
//! out as a corridor, so messages from one end only reach the other end by
//! being relayed.  The remote hands out a sweep task, later a robot raises an
//! emergency, and every robot keeps wandering a little each round.
//!
//! Run with `RUST_LOG=debug` to see every frame sent and accepted.

use std::io::Cursor;

use anyhow::Result;
use log::info;

use rr_core::{PeerId, Position, Priority, Tick};
use rr_sim::{
    load_roster_reader, Behavior, RelayBehavior, Robot, SimResult, SwarmBuilder, SwarmConfig,
    SwarmObserver, TickContext,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROUNDS_PER_LEG: u64 = 10;
const WANDER_M:       f32 = 0.5;

const TASK_TICK:      u64 = 3;
const EMERGENCY_TICK: u64 = 15;

// ── Scenario files ────────────────────────────────────────────────────────────

const CONFIG_JSON: &str = r#"{
    "total_ticks": 30,
    "seed": 42,
    "time_step_ms": 32,
    "max_relay_count": 5,
    "malformed_policy": "skip",
    "hop_limit_broadcasts": false,
    "medium": { "range_m": 12.0, "loss_probability": 0.05, "seed": 7 }
}"#;

const ROSTER_CSV: &str = "\
name,x,y\n\
remote,0.0,0.0\n\
robot_1,10.0,0.0\n\
robot_2,20.0,0.0\n\
robot_3,30.0,0.0\n\
robot_4,40.0,0.0\n\
robot_5,50.0,0.0\n\
robot_6,60.0,0.0\n\
";

// ── Behavior ──────────────────────────────────────────────────────────────────

/// Relay everything, let the remote and robot_3 inject traffic on cue, and
/// finish the current activity with a small chance each round.
struct PatrolBehavior {
    relay: RelayBehavior,
}

impl Behavior for PatrolBehavior {
    fn on_tick(&self, robot: &mut Robot, ctx: &TickContext) -> SimResult<()> {
        self.relay.on_tick(robot, ctx)?;

        let tick = ctx.tick.0;
        if robot.id == "remote" && tick == TASK_TICK {
            robot.send_to_all(Priority::Task, "sweep sector B");
        }
        if robot.id == "robot_3" && tick == EMERGENCY_TICK {
            robot.broadcast(Priority::Emergency, "obstacle at 30,0");
        }

        if robot.current_priority != Priority::None && robot.rng.gen_bool(0.1) {
            info!("{} : finished {} activity", robot.id, robot.current_priority);
            robot.finish_activity();
        }
        Ok(())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct TrafficObserver {
    rounds:     u64,
    peak_inbox: usize,
}

impl SwarmObserver for TrafficObserver {
    fn on_tick_end(&mut self, tick: Tick, robots: &[Robot]) {
        self.rounds += 1;
        let total: usize = robots.iter().map(|r| r.inbox.len()).sum();
        self.peak_inbox = self.peak_inbox.max(total);
        let busy = robots.iter().filter(|r| r.current_priority != Priority::None).count();
        info!("{tick}: {busy} busy robots, {total} queued messages");
    }

    fn on_swarm_end(&mut self, final_tick: Tick) {
        info!("swarm finished at {final_tick}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config: SwarmConfig = serde_json::from_str(CONFIG_JSON)?;
    let roster = load_roster_reader(Cursor::new(ROSTER_CSV))?;

    println!("=== patrol: robot_relay swarm ===");
    println!(
        "Robots: {}  |  Rounds: {}  |  Range: {} m  |  Loss: {:.0} %",
        roster.len(),
        config.total_ticks,
        config.medium.range_m,
        config.medium.loss_probability * 100.0,
    );
    println!();

    let behavior = PatrolBehavior {
        relay: RelayBehavior { max_relay_count: config.max_relay_count, ..RelayBehavior::default() },
    };
    let mut swarm = SwarmBuilder::new(config, behavior).roster(roster).build()?;
    let mut obs = TrafficObserver::default();

    // Run in legs, nudging every robot between legs.
    while swarm.clock.current_tick < swarm.config.end_tick() {
        let remaining = swarm.config.end_tick().since(swarm.clock.current_tick);
        swarm.run_ticks(remaining.min(ROUNDS_PER_LEG), &mut obs)?;
        wander(&mut swarm)?;
    }
    obs.on_swarm_end(swarm.clock.current_tick);

    println!(
        "Rounds: {}  |  Frames emitted: {}  |  Peak queued: {}",
        obs.rounds,
        swarm.medium.frames_emitted(),
        obs.peak_inbox,
    );
    println!();

    println!("{:<10} {:<14} {:<8} {:<16}", "Robot", "Activity", "Inbox", "Position");
    println!("{}", "-".repeat(48));
    for robot in &swarm.robots {
        let pos = swarm.medium.position_of(&robot.id).unwrap_or_default();
        println!(
            "{:<10} {:<14} {:<8} {:<16}",
            robot.id,
            robot.current_priority.to_string(),
            robot.inbox.len(),
            pos.to_string(),
        );
    }

    Ok(())
}

/// Move every robot by up to `WANDER_M` on each axis.
fn wander<B: Behavior>(swarm: &mut rr_sim::Swarm<B>) -> Result<()> {
    let moves: Vec<(PeerId, Position)> = swarm
        .robots
        .iter_mut()
        .map(|robot| {
            let here = swarm.medium.position_of(&robot.id).unwrap_or_default();
            let dx = robot.rng.gen_range(-WANDER_M..=WANDER_M);
            let dy = robot.rng.gen_range(-WANDER_M..=WANDER_M);
            (robot.id.clone(), Position::new(here.x + dx, here.y + dy))
        })
        .collect();

    for (id, pos) in moves {
        swarm.move_robot(&id, pos)?;
    }
    Ok(())
}
