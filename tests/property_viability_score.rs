use ikigai::domain::models::{Viability, MAX_VALUES};
use ikigai::{Bucket, UserInput, ViabilityBreakdown};
use proptest::prelude::*;

fn breakdown() -> impl Strategy<Value = ViabilityBreakdown> {
    (0u8..=10, 0u8..=10, 0u8..=10, 0u8..=10, 0u8..=10).prop_map(
        |(motivation, skills, market, time, financial)| ViabilityBreakdown {
            motivation,
            skills,
            market,
            time,
            financial,
        },
    )
}

proptest! {
    /// Property: the overall score is round(mean * 10) and stays in 0..=100
    #[test]
    fn prop_score_formula(b in breakdown()) {
        let expected = ((f64::from(b.sum()) / 5.0) * 10.0).round();
        prop_assert_eq!(f64::from(b.overall_score()), expected);
        prop_assert!(b.overall_score() <= 100);
        prop_assert_eq!(u32::from(b.overall_score()), b.sum() * 2);
    }

    /// Property: whatever score the service claims, the stored one is derived
    #[test]
    fn prop_service_score_overwritten(b in breakdown(), claimed in any::<u8>()) {
        let mut viability = Viability {
            score: claimed,
            reasoning: String::new(),
            breakdown: b,
        };
        viability.recompute_score();
        prop_assert_eq!(viability.score, b.overall_score());
    }

    /// Property: removing one item keeps the others in their original order
    #[test]
    fn prop_remove_keeps_relative_order(
        items in prop::collection::vec("[a-z]{1,8}", 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut input = UserInput::new();
        for item in &items {
            input.add_item(Bucket::Needs, item);
        }
        let index = pick.index(items.len());

        let removed = input.remove_item(Bucket::Needs, index).unwrap();

        let mut expected = items.clone();
        prop_assert_eq!(removed, expected.remove(index));
        prop_assert_eq!(input.bucket(Bucket::Needs), expected.as_slice());
    }

    /// Property: never more than three values, first ones win
    #[test]
    fn prop_values_capped(values in prop::collection::vec("[a-z]{1,8}", 0..10)) {
        let mut input = UserInput::new();
        for value in &values {
            input.add_value(value);
        }
        let kept = values.len().min(MAX_VALUES);
        prop_assert_eq!(input.values(), &values[..kept]);
    }
}

#[test]
fn test_reference_example() {
    let b = ViabilityBreakdown {
        motivation: 8,
        skills: 7,
        market: 6,
        time: 9,
        financial: 5,
    };
    assert_eq!(b.overall_score(), 70);
}
