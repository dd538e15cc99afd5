#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::classifier::DeltaClassifier;
    use crate::config::GestureConfig;
    use crate::gate::{ArmState, ChatterGate};
    use crate::types::Command;

    // 480 px frame @ 0.14 fraction: rails at ±67.2 px, inner band 40.32 px,
    // cooldown 250 ms — the shipped defaults.

    fn setup() -> (DeltaClassifier, ChatterGate) {
        (
            DeltaClassifier::new(&GestureConfig::default(), 480),
            ChatterGate::new(Duration::from_millis(250)),
        )
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn first_out_frame_fires_immediately() {
        let (c, mut gate) = setup();
        let fired = gate.update(&c.classify(0.0, 80.0), Instant::now());
        assert_eq!(fired, Some(Command::Extend));
        assert_eq!(gate.state(), ArmState::Disarmed);
    }

    #[test]
    fn held_delta_fires_exactly_once() {
        let (c, mut gate) = setup();
        let t0 = Instant::now();
        let mut fires = 0;
        for i in 0..200 {
            if gate.update(&c.classify(0.0, 80.0), at(t0, i * 40)).is_some() {
                fires += 1;
            }
        }
        assert_eq!(fires, 1);
    }

    #[test]
    fn rearm_then_fire_sequence() {
        // +80 at t=0 fires; +80 during cooldown: no; +80 after cooldown but
        // not re-armed: no; +10 re-arms; +80 fires again.
        let (c, mut gate) = setup();
        let t0 = Instant::now();

        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 0)), Some(Command::Extend));
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 100)), None);
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 300)), None);
        assert_eq!(gate.update(&c.classify(0.0, 10.0), at(t0, 400)), None);
        assert_eq!(gate.state(), ArmState::Armed);
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 500)), Some(Command::Extend));
    }

    #[test]
    fn opposite_direction_still_needs_rearm() {
        // Swinging straight across from In to Out must not fire twice.
        let (c, mut gate) = setup();
        let t0 = Instant::now();

        assert_eq!(gate.update(&c.classify(0.0, -90.0), at(t0, 0)), Some(Command::Retract));
        assert_eq!(gate.update(&c.classify(0.0, 90.0), at(t0, 50)), None);
        // Even past the cooldown, no inner-band pass means no fire
        assert_eq!(gate.update(&c.classify(0.0, 90.0), at(t0, 400)), None);
    }

    #[test]
    fn consecutive_fires_respect_cooldown() {
        let (c, mut gate) = setup();
        let t0 = Instant::now();
        let mut fire_times = Vec::new();

        // Alternate out/centre every 60 ms: re-arm is satisfied constantly,
        // so only the cooldown limits the rate.
        for i in 0..50u64 {
            let thumb = if i % 2 == 0 { 80.0 } else { 0.0 };
            let now = at(t0, i * 60);
            if gate.update(&c.classify(0.0, thumb), now).is_some() {
                fire_times.push(now);
            }
        }
        assert!(fire_times.len() >= 2);
        for pair in fire_times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(250));
        }
    }

    #[test]
    fn neutral_never_fires_nor_rearms() {
        let (c, mut gate) = setup();
        let t0 = Instant::now();
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 0)), Some(Command::Extend));

        // 50 px: neutral zone, but outside the 40.32 px inner band
        for i in 1..20u64 {
            assert_eq!(gate.update(&c.classify(0.0, 50.0), at(t0, i * 50)), None);
        }
        assert_eq!(gate.state(), ArmState::Disarmed);
    }

    #[test]
    fn rearm_and_fire_check_share_a_frame() {
        // A disarmed gate seeing an inner-band frame re-arms on that same
        // frame; the frame itself is neutral so nothing fires until the
        // next excursion.
        let (c, mut gate) = setup();
        let t0 = Instant::now();
        gate.update(&c.classify(0.0, 80.0), at(t0, 0));
        assert_eq!(gate.update(&c.classify(0.0, 5.0), at(t0, 300)), None);
        assert_eq!(gate.state(), ArmState::Armed);
    }

    #[test]
    fn manual_override_disarms_and_stamps_cooldown() {
        let (c, mut gate) = setup();
        let t0 = Instant::now();

        gate.force(at(t0, 0));
        assert_eq!(gate.state(), ArmState::Disarmed);

        // Automatic fire right after: blocked by both cooldown and arming
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 100)), None);

        // Re-arm, wait out the cooldown, then fire
        assert_eq!(gate.update(&c.classify(0.0, 0.0), at(t0, 300)), None);
        assert_eq!(gate.update(&c.classify(0.0, 80.0), at(t0, 350)), Some(Command::Extend));
    }
}
