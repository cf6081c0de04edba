use rebound::*;

#[test]
fn spring_deterministic() {
    let config = OverscrollConfig::<f32>::new();
    let results: Vec<_> = (0..10).map(|_| {
        let mut spring = SpringState::new(48.0f32, -300.0);
        for _ in 0..500 {
            spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
        }
        spring
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0].position(), r.position());
        assert_eq!(results[0].velocity(), r.velocity());
    }
}

#[test]
fn engine_deterministic() {
    let metrics = ScrollMetrics::new(0.0, 2400.0);
    let results: Vec<_> = (0..5).map(|_| {
        let mut engine = OverscrollEngine::<f64>::new(OverscrollConfig::new()).unwrap();
        let mut trace = Vec::new();
        let mut t = 0.0;
        for i in 0..90 {
            t += 1000.0 / 60.0 + (i % 3) as f64;
            if i < 12 {
                engine.handle_input(-25.0 - i as f64, metrics, t);
            }
            trace.push(engine.tick(t).offset());
        }
        trace
    }).collect();

    for r in &results[1..] {
        assert_eq!(&results[0], r);
    }
}

#[test]
fn packing_deterministic() {
    let cards: Vec<Card> = (0..40)
        .map(|i| Card::new(format!("p{i}"), 80.0 + (i * 37 % 150) as f64, 60.0 + (i * 53 % 170) as f64))
        .collect();
    let pin = PinnedCard::new("p7", 333.0, 120.0);
    let results: Vec<_> = (0..5)
        .map(|_| pack(&cards, 960.0, 12.0, Some(&pin)).unwrap())
        .collect();

    for r in &results[1..] {
        assert_eq!(results[0].total_height, r.total_height);
        for (a, b) in results[0].positions.iter().zip(r.positions.iter()) {
            assert_eq!(a, b);
        }
    }
}
