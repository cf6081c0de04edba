use proptest::prelude::*;
use proptest::test_runner::Config;
use rebound::{pack, Card, Packing, PinnedCard};

fn cards_strategy(max_len: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec((40_u32..320, 40_u32..320), 1..max_len).prop_map(|sizes| {
        sizes
            .into_iter()
            .enumerate()
            .map(|(i, (w, h))| Card::new(format!("card-{i}"), f64::from(w), f64::from(h)))
            .collect()
    })
}

fn separated(a: (f64, f64, &Card), b: (f64, f64, &Card), gap: f64) -> bool {
    let (ax, ay, ac) = a;
    let (bx, by, bc) = b;
    !(ax < bx + bc.width + gap && ax + ac.width > bx - gap)
        || !(ay < by + bc.height + gap && ay + ac.height > by - gap)
}

fn assert_no_overlap(cards: &[Card], packing: &Packing, gap: f64) -> Result<(), TestCaseError> {
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            let pa = packing.positions[&a.id];
            let pb = packing.positions[&b.id];
            let ok = separated((pa.x, pa.y, a), (pb.x, pb.y, b), gap)
                || separated((pb.x, pb.y, b), (pa.x, pa.y, a), gap);
            prop_assert!(ok, "{} at {:?} and {} at {:?} are closer than {}", a.id, pa, b.id, pb, gap);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn packed_cards_never_overlap(
        cards in cards_strategy(24),
        width in 320_u32..1200,
        gap in 0_u32..24,
    ) {
        let gap = f64::from(gap);
        let packing = pack(&cards, f64::from(width), gap, None).unwrap();
        prop_assert_eq!(packing.positions.len(), cards.len());
        assert_no_overlap(&cards, &packing, gap)?;
    }

    #[test]
    fn packed_cards_stay_in_container(
        cards in cards_strategy(24),
        width in 320_u32..1200,
        gap in 0_u32..24,
    ) {
        let width = f64::from(width);
        let packing = pack(&cards, width, f64::from(gap), None).unwrap();
        let mut lowest = 0.0_f64;
        for card in &cards {
            let p = packing.positions[&card.id];
            prop_assert!(p.x >= 0.0 && p.y >= 0.0);
            prop_assert!(p.x + card.width <= width, "{} overflows at x = {}", card.id, p.x);
            lowest = lowest.max(p.y + card.height);
        }
        prop_assert_eq!(packing.total_height, lowest);
    }

    #[test]
    fn pinned_layouts_never_overlap(
        cards in cards_strategy(16),
        width in 320_u32..1200,
        gap in 0_u32..24,
        pin_index in any::<prop::sample::Index>(),
        pin_x in -200.0_f64..1400.0,
        pin_y in -100.0_f64..600.0,
    ) {
        let gap = f64::from(gap);
        let width = f64::from(width);
        let pinned_card = &cards[pin_index.index(cards.len())];
        let pin = PinnedCard::new(pinned_card.id.clone(), pin_x, pin_y);
        let packing = pack(&cards, width, gap, Some(&pin)).unwrap();

        let p = packing.positions[&pin.id];
        prop_assert_eq!(p.x, pin_x.clamp(0.0, (width - pinned_card.width).max(0.0)) + 0.0);
        prop_assert_eq!(p.y, pin_y.max(0.0) + 0.0);
        assert_no_overlap(&cards, &packing, gap)?;
    }

    #[test]
    fn packing_is_deterministic(
        cards in cards_strategy(20),
        width in 320_u32..1200,
        gap in 0_u32..24,
    ) {
        let mut shuffled = cards.clone();
        shuffled.reverse();
        let first = pack(&cards, f64::from(width), f64::from(gap), None).unwrap();
        let second = pack(&shuffled, f64::from(width), f64::from(gap), None).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn appending_a_smaller_card_never_lowers_height(
        cards in cards_strategy(16),
        width in 320_u32..1200,
        gap in 0_u32..24,
        extra in (10_u32..40, 10_u32..40),
    ) {
        let width = f64::from(width);
        let gap = f64::from(gap);
        let before = pack(&cards, width, gap, None).unwrap();

        let mut grown = cards.clone();
        grown.push(Card::new("extra", f64::from(extra.0), f64::from(extra.1)));
        let after = pack(&grown, width, gap, None).unwrap();

        prop_assert!(after.total_height >= before.total_height);
        for card in &cards {
            prop_assert_eq!(after.positions[&card.id], before.positions[&card.id]);
        }
    }
}
