use rebound::{DampingModel, FrameObserver, NoOpFrameObserver, OverscrollConfig, SpringState};

struct SubStepCounter(usize);

impl FrameObserver<f64> for SubStepCounter {
    fn on_sub_step(&mut self, _index: usize) {
        self.0 += 1;
    }
}

#[test]
fn released_spring_settles() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(60.0, 0.0);
    for _ in 0..120 {
        spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
    }
    assert!(spring.is_settled(config.settle_position, config.settle_velocity));
}

#[test]
fn critically_damped_no_overshoot() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(60.0, 0.0);
    for _ in 0..600 {
        spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
        assert!(spring.position() >= 0.0, "Overshoot detected: {}", spring.position());
    }
}

#[test]
fn position_never_exceeds_max_overscroll() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(70.0, 5000.0);
    for _ in 0..600 {
        spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
        assert!(
            spring.position().abs() <= config.max_overscroll,
            "position {} beyond limit {}",
            spring.position(),
            config.max_overscroll,
        );
    }
}

#[test]
fn acceleration_change_respects_jerk_limit() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(50.0, -800.0);
    let dts = [1.0 / 60.0, 0.032, 0.004, 1.0 / 144.0, 0.02, 0.0];
    for i in 0..300 {
        let dt = dts[i % dts.len()];
        let before = spring.previous_acceleration();
        spring.step(dt, &config, &mut NoOpFrameObserver);
        let change = (spring.previous_acceleration() - before).abs();
        assert!(
            change <= config.jerk_limit * dt + 1e-6,
            "step {}: |Δa| = {} exceeds J*dt = {}",
            i,
            change,
            config.jerk_limit * dt,
        );
    }
}

#[test]
fn tight_jerk_limit_still_bounds_acceleration() {
    let config = OverscrollConfig::<f64>::new().with_jerk_limit(3600.0);
    let mut spring = SpringState::new(40.0, 0.0);
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        let before = spring.previous_acceleration();
        spring.step(dt, &config, &mut NoOpFrameObserver);
        assert!((spring.previous_acceleration() - before).abs() <= 3600.0 * dt + 1e-9);
        assert!(spring.position().abs() <= config.max_overscroll);
    }
}

#[test]
fn legacy_damping_settles() {
    let config = OverscrollConfig::<f64>::new()
        .with_damping(DampingModel::Legacy { base: 34.0, per_velocity: 0.06 });
    let mut spring = SpringState::new(-30.0, 0.0);
    for _ in 0..120 {
        spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
    }
    assert!(spring.is_settled(config.settle_position, config.settle_velocity));
}

#[test]
fn sub_steps_are_observed() {
    let config = OverscrollConfig::<f64>::new().with_sub_steps(6);
    let mut spring = SpringState::new(10.0, 0.0);
    let mut counter = SubStepCounter(0);
    spring.step(1.0 / 60.0, &config, &mut counter);
    spring.step(1.0 / 60.0, &config, &mut counter);
    assert_eq!(counter.0, 12);
}

#[test]
fn zero_dt_no_change() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(12.0, 30.0);
    let before = spring;
    spring.step(0.0, &config, &mut NoOpFrameObserver);
    assert_eq!(spring, before);
}

#[test]
fn f32_spring_settles() {
    let config = OverscrollConfig::<f32>::new();
    let mut spring = SpringState::new(40.0f32, 0.0);
    for _ in 0..120 {
        spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
    }
    assert!(spring.is_settled(config.settle_position, config.settle_velocity));
}

#[test]
fn snap_to_rest_zeroes_everything() {
    let config = OverscrollConfig::<f64>::new();
    let mut spring = SpringState::new(25.0, 100.0);
    spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
    spring.snap_to_rest();
    assert_eq!(spring, SpringState::at_rest());
    assert_eq!(spring.previous_acceleration(), 0.0);
}
