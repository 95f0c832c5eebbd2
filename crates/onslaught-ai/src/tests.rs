#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use onslaught_core::config::EnemyConfig;
    use onslaught_core::enums::{AiState, EnemyKind};

    use crate::fsm::{evaluate, AiContext, Locomotion};
    use crate::steering::{look_rotation, repath_interval, rotate_towards};

    fn stats() -> EnemyConfig {
        EnemyConfig {
            max_health: 100.0,
            chase_speed: 4.0,
            patrol_speed: 1.0,
            rotation_speed: 3.0,
            detection_range: 10.0,
            attack_range: 2.0,
            attack_damage: 5.0,
            attack_cooldown: 1.0,
        }
    }

    fn make_context(stats: &EnemyConfig, state: AiState, distance: f32, now: f64) -> AiContext<'_> {
        AiContext {
            state,
            distance_sq: distance * distance,
            stats,
            has_line_of_sight: true,
            now,
            last_attack_time: 0.0,
            last_repath_time: 0.0,
            repath_interval: 0.5,
        }
    }

    #[test]
    fn test_idle_to_chasing_at_detection_range() {
        let s = stats();
        let update = evaluate(&make_context(&s, AiState::Idle, 10.0, 2.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Chasing);
        assert_eq!(update.locomotion, Locomotion::Chase);
        assert!(update.repath, "interval elapsed, first chase should repath");
    }

    #[test]
    fn test_idle_to_chasing_waits_for_repath_interval() {
        let s = stats();
        let mut ctx = make_context(&s, AiState::Idle, 5.0, 2.0);
        ctx.last_repath_time = 1.8;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AiState::Chasing);
        assert!(!update.repath, "repath requested before interval elapsed");
    }

    #[test]
    fn test_idle_stays_outside_detection_range() {
        let s = stats();
        let update = evaluate(&make_context(&s, AiState::Idle, 10.01, 2.0));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Idle);
        assert_eq!(update.locomotion, Locomotion::Unchanged);
    }

    #[test]
    fn test_idle_requires_line_of_sight() {
        let s = stats();
        let mut ctx = make_context(&s, AiState::Idle, 3.0, 2.0);
        ctx.has_line_of_sight = false;
        assert_eq!(evaluate(&ctx).new_state, AiState::Idle);
    }

    #[test]
    fn test_chasing_to_attacking_halts() {
        let s = stats();
        let update = evaluate(&make_context(&s, AiState::Chasing, 1.5, 2.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Attacking);
        assert_eq!(update.locomotion, Locomotion::Halt);
        assert!(!update.attack, "attack happens on a later visit");
    }

    #[test]
    fn test_chasing_hysteresis_band() {
        let s = stats();
        // Inside the 1.5x band: keep chasing.
        let update = evaluate(&make_context(&s, AiState::Chasing, 14.9, 2.0));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Chasing);
        assert!(update.repath);

        // Beyond the band: give up.
        let update = evaluate(&make_context(&s, AiState::Chasing, 15.1, 2.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Idle);
        assert_eq!(update.locomotion, Locomotion::Patrol);
    }

    #[test]
    fn test_chasing_throttles_repath() {
        let s = stats();
        let mut ctx = make_context(&s, AiState::Chasing, 8.0, 2.0);
        ctx.last_repath_time = 1.7;
        assert!(!evaluate(&ctx).repath);
        ctx.last_repath_time = 1.5;
        assert!(evaluate(&ctx).repath);
    }

    #[test]
    fn test_attacking_respects_cooldown() {
        let s = stats();
        let mut ctx = make_context(&s, AiState::Attacking, 1.0, 2.0);
        ctx.last_attack_time = 1.5;
        let update = evaluate(&ctx);
        assert!(!update.attack, "cooldown has not elapsed");
        assert!(update.face_target);

        ctx.last_attack_time = 1.0;
        let update = evaluate(&ctx);
        assert!(update.attack, "exactly one cooldown later should attack");
        assert!(!update.state_changed);
    }

    #[test]
    fn test_attacking_in_band_does_not_attack_or_leave() {
        let s = stats();
        // Between attack range (2.0) and release (3.0).
        let update = evaluate(&make_context(&s, AiState::Attacking, 2.5, 10.0));
        assert!(!update.state_changed);
        assert!(!update.attack, "out of reach, no damage");
        assert!(update.face_target);
    }

    #[test]
    fn test_attacking_to_chasing_resumes_movement() {
        let s = stats();
        let update = evaluate(&make_context(&s, AiState::Attacking, 3.1, 10.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Chasing);
        assert_eq!(update.locomotion, Locomotion::Chase);
        assert!(!update.attack);
        assert!(!update.face_target, "only an attacking enemy turns in place");
    }

    #[test]
    fn test_oscillation_near_detection_flips_once() {
        let s = stats();
        let mut state = AiState::Idle;
        let mut flips = 0;
        for i in 0..40 {
            let distance = if i % 2 == 0 { 9.9 } else { 10.05 };
            let update = evaluate(&make_context(&s, state, distance, i as f64));
            if update.state_changed {
                flips += 1;
            }
            state = update.new_state;
        }
        assert_eq!(flips, 1, "only the first crossing should change state");
        assert_eq!(state, AiState::Chasing);
    }

    #[test]
    fn test_baseline_kinds_run_the_same_machine() {
        for kind in EnemyKind::ALL {
            let s = EnemyConfig::baseline(kind);
            let update = evaluate(&make_context(&s, AiState::Idle, s.detection_range * 0.5, 5.0));
            assert_eq!(update.new_state, AiState::Chasing, "{kind:?} should detect");
        }
    }

    #[test]
    fn test_repath_interval_near_far() {
        assert_eq!(repath_interval(99.0, 0.25, 1.0, 10.0), 0.25);
        assert_eq!(repath_interval(100.0, 0.25, 1.0, 10.0), 0.25);
        assert_eq!(repath_interval(100.1, 0.25, 1.0, 10.0), 1.0);
    }

    #[test]
    fn test_look_rotation_faces_target() {
        let rot = look_rotation(Vec3::ZERO, Vec3::new(5.0, 3.0, 0.0)).unwrap();
        let forward = rot * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5, "forward was {forward:?}");
        assert!(look_rotation(Vec3::ONE, Vec3::new(1.0, 9.0, 1.0)).is_none());
    }

    #[test]
    fn test_rotate_towards_is_bounded() {
        let target = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let step = rotate_towards(Quat::IDENTITY, target, 0.5);
        assert!((Quat::IDENTITY.angle_between(step) - 0.5).abs() < 1e-4);

        let snapped = rotate_towards(Quat::IDENTITY, target, 10.0);
        assert_eq!(snapped, target, "large step should land on the target");
    }
}
