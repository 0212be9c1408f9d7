//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PeerId, Recipient};

    #[test]
    fn peer_id_compares_with_str() {
        let id = PeerId::from("robot_1");
        assert_eq!(id, "robot_1");
        assert_eq!(id.as_str(), "robot_1");
        assert_eq!(id.to_string(), "robot_1");
    }

    #[test]
    fn empty_wire_field_is_broadcast() {
        assert_eq!(Recipient::from_wire(""), Recipient::Broadcast);
        assert!(Recipient::from_wire("").is_broadcast());
    }

    #[test]
    fn named_wire_field_is_peer() {
        let r = Recipient::from_wire("remote");
        assert_eq!(r, Recipient::Peer(PeerId::from("remote")));
        assert_eq!(r.as_wire(), "remote");
        assert!(r.is_peer(&PeerId::from("remote")));
        assert!(!r.is_peer(&PeerId::from("robot_2")));
    }

    #[test]
    fn broadcast_renders_empty_on_wire() {
        assert_eq!(Recipient::Broadcast.as_wire(), "");
        assert!(!Recipient::Broadcast.is_peer(&PeerId::from("")));
    }

    #[test]
    fn empty_peer_id_converts_to_broadcast() {
        assert_eq!(Recipient::from(PeerId::default()), Recipient::Broadcast);
        assert_eq!(
            Recipient::from(PeerId::from("a")),
            Recipient::Peer(PeerId::from("a")),
        );
    }
}

#[cfg(test)]
mod priority {
    use crate::Priority;

    #[test]
    fn ranks_are_strictly_increasing() {
        for pair in Priority::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank(), "{:?}", pair);
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn labels_parse_back() {
        for p in Priority::ALL {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
            assert_eq!(p.to_string(), p.as_str());
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("urgent".parse::<Priority>().is_err());
        // Labels are exact; no prefix stripping or case folding.
        assert!("Task".parse::<Priority>().is_err());
        assert!("PRIORITY.task".parse::<Priority>().is_err());
    }

    #[test]
    fn default_is_none() {
        assert_eq!(Priority::default(), Priority::None);
        assert_eq!(Priority::None.rank(), 0);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn clock_accumulates_step_durations() {
        let mut clock = SimClock::new();
        clock.step(32);
        clock.step(32);
        clock.step(64);
        assert_eq!(clock.current_tick, Tick(3));
        assert_eq!(clock.elapsed_ms, 128);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new();
        for _ in 0..40 {
            clock.step(32);
        }
        assert_eq!(clock.elapsed_secs_ms(), (1, 280));
        assert_eq!(clock.to_string(), "T40 (1.280 s)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn pythagorean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_sq(b) - 25.0).abs() < 1e-6);
        assert!((b.distance_sq(a) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn zero_distance() {
        let p = Position::new(1.5, -2.0);
        assert_eq!(p.distance_sq(p), 0.0);
        assert_eq!(p.as_array(), [1.5, -2.0]);
    }

    #[test]
    fn non_finite_coordinates_are_flagged() {
        assert!(Position::new(1.0, -4.0).is_finite());
        assert!(!Position::new(f32::NAN, 0.0).is_finite());
        assert!(!Position::new(0.0, f32::INFINITY).is_finite());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentRng, SimRng};

    #[test]
    fn agent_rng_is_deterministic() {
        let mut a = AgentRng::new(42, 3);
        let mut b = AgentRng::new(42, 3);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn different_slots_diverge() {
        let mut a = AgentRng::new(42, 0);
        let mut b = AgentRng::new(42, 1);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(7);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(2.0)); // clamped
    }

    #[test]
    fn sim_rng_is_reproducible() {
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        for _ in 0..16 {
            assert_eq!(a.gen_bool(0.5), b.gen_bool(0.5));
        }
    }
}
