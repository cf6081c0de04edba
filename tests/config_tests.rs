use rebound::*;

#[test]
fn defaults_validate() {
    assert_eq!(OverscrollConfig::<f64>::new().validate(), Ok(()));
    assert_eq!(OverscrollConfig::<f32>::default().validate(), Ok(()));
    assert_eq!(GlideConfig::<f64>::new().validate(), Ok(()));
    assert_eq!(SizingConfig::new().validate(), Ok(()));
}

#[test]
fn critical_damping_coefficient() {
    let model = DampingModel::Ratio { ratio: 1.0 };
    assert_eq!(model.coefficient(100.0, 1.0, 50.0), 20.0);
    let legacy = DampingModel::Legacy { base: 34.0, per_velocity: 0.5 };
    assert_eq!(legacy.coefficient(100.0, 1.0, -10.0), 39.0);
}

#[test]
fn reduced_motion_tightens_everything() {
    let base = OverscrollConfig::<f64>::new();
    let reduced = base.reduced_motion();
    assert_eq!(reduced.max_overscroll, 20.0);
    assert_eq!(reduced.rebound_amount, 0.0);
    assert_eq!(reduced.damping, DampingModel::Ratio { ratio: 1.35 });
    assert_eq!(reduced.jerk_limit, base.jerk_limit * 0.65);
    assert_eq!(reduced.stiffness, base.stiffness);

    let small = OverscrollConfig::<f64>::new().with_max_overscroll(12.0).reduced_motion();
    assert_eq!(small.max_overscroll, 12.0, "reduced motion never grows the limit");
}

#[test]
fn reduced_motion_scales_legacy_base_only() {
    let config = OverscrollConfig::<f64>::new()
        .with_damping(DampingModel::Legacy { base: 20.0, per_velocity: 0.1 })
        .with_reduced_motion(true);
    match config.damping {
        DampingModel::Legacy { base, per_velocity } => {
            assert!((base - 27.0).abs() < 1e-9);
            assert_eq!(per_velocity, 0.1);
        }
        other => panic!("damping model changed to {:?}", other),
    }
}

#[test]
fn non_finite_values_are_named() {
    let config = OverscrollConfig::<f64>::new().with_jerk_limit(f64::INFINITY);
    assert_eq!(config.validate(), Err(ReboundError::NonFinite { field: "jerk_limit" }));

    let config = OverscrollConfig::<f64>::new()
        .with_damping(DampingModel::Legacy { base: 1.0, per_velocity: f64::NAN });
    assert_eq!(
        config.validate(),
        Err(ReboundError::NonFinite { field: "damping.per_velocity" })
    );
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases = [
        OverscrollConfig::<f64>::new().with_stiffness(0.0),
        OverscrollConfig::<f64>::new().with_stiffening(-1.0),
        OverscrollConfig::<f64>::new().with_input_gain(-0.1),
        OverscrollConfig::<f64>::new().with_rebound_amount(-0.5),
        OverscrollConfig::<f64>::new().with_max_dt_ms(0.0),
        OverscrollConfig::<f64>::new().with_settle_thresholds(0.0, 3.0),
        OverscrollConfig::<f64>::new().with_damping(DampingModel::Ratio { ratio: 0.0 }),
        OverscrollConfig::<f64>::new().with_damping(DampingModel::Legacy { base: 0.0, per_velocity: 0.0 }),
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(ReboundError::OutOfRange { .. })),
            "accepted {:?}",
            config
        );
    }
}

#[test]
fn legacy_model_needs_base_damping() {
    let undamped = OverscrollConfig::<f64>::new()
        .with_damping(DampingModel::Legacy { base: 0.0, per_velocity: 0.0 });
    assert_eq!(
        undamped.validate(),
        Err(ReboundError::OutOfRange { field: "damping.base", requirement: "greater than zero" })
    );
    assert!(OverscrollEngine::new(undamped).is_err());

    let velocity_free = OverscrollConfig::<f64>::new()
        .with_damping(DampingModel::Legacy { base: 12.0, per_velocity: 0.0 });
    assert_eq!(velocity_free.validate(), Ok(()));
}

#[test]
fn sub_steps_never_drop_to_zero() {
    let config = OverscrollConfig::<f64>::new().with_sub_steps(0);
    assert_eq!(config.sub_steps, 1);
    let mut raw = OverscrollConfig::<f64>::new();
    raw.sub_steps = 0;
    assert_eq!(
        raw.validate(),
        Err(ReboundError::OutOfRange { field: "sub_steps", requirement: "at least 1" })
    );
}

#[test]
fn error_messages_are_readable() {
    let err = OverscrollConfig::<f64>::new().with_mass(-1.0).validate().unwrap_err();
    assert_eq!(err.to_string(), "tuning value `mass` must be greater than zero");
    assert_eq!(
        ReboundError::SurfaceUnavailable.to_string(),
        "scroll surface is detached or reports non-finite metrics"
    );
}

#[cfg(feature = "serde")]
mod serde_config {
    use rebound::*;

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "stiffness": 200.0,
            "damping": { "model": "legacy", "base": 30.0, "per_velocity": 0.1 }
        }"#;
        let config: OverscrollConfig<f64> = serde_json::from_str(json).unwrap();
        assert_eq!(config.stiffness, 200.0);
        assert_eq!(config.damping, DampingModel::Legacy { base: 30.0, per_velocity: 0.1 });
        assert_eq!(config.max_overscroll, 72.0);
        assert_eq!(config.sub_steps, 4);
    }

    #[test]
    fn damping_model_is_tagged() {
        let value = serde_json::to_value(OverscrollConfig::<f64>::new()).unwrap();
        assert_eq!(value["damping"]["model"], "ratio");
        assert_eq!(value["damping"]["ratio"], 1.0);
    }

    #[test]
    fn packing_serializes_by_id() {
        let packing = pack(&[Card::new("b", 10.0, 10.0), Card::new("a", 20.0, 20.0)], 100.0, 0.0, None).unwrap();
        let value = serde_json::to_value(&packing).unwrap();
        assert_eq!(value["positions"]["a"]["x"], 0.0);
        assert_eq!(value["positions"]["b"]["x"], 20.0);
        assert_eq!(value["total_height"], 20.0);
    }

    #[test]
    fn sizing_and_intent_have_defaults() {
        let sizing: SizingConfig = serde_json::from_str(r#"{ "gap": 24.0 }"#).unwrap();
        assert_eq!(sizing.gap, 24.0);
        assert_eq!(sizing.min_unit, 120.0);
        let intent: AxisIntent<f64> = serde_json::from_str("{}").unwrap();
        assert_eq!(intent, AxisIntent::new());
    }
}
