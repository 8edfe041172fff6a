//! # Pass Chain
//!
//! The backend does not guarantee `receiver(i) == passer(i + 1)`. For drawing
//! and for metrics we want one continuous polyline, so every origin after the
//! first is overwritten with the previous destination.

use crate::models::PassEvent;

/// Build a spatially connected copy of `passes`.
///
/// `output[0] == passes[0]`; for `i > 0`, `output[i]` origin equals
/// `output[i - 1]` destination. Empty and single-event input come back unchanged.
pub fn build_pass_chain(passes: &[PassEvent]) -> Vec<PassEvent> {
    let mut chained: Vec<PassEvent> = Vec::with_capacity(passes.len());

    for pass in passes {
        let mut link = pass.clone();
        if let Some(prev) = chained.last() {
            link.passer_x = prev.receiver_x;
            link.passer_y = prev.receiver_y;
        }
        chained.push(link);
    }

    chained
}

/// True when every origin after the first sits on the previous destination.
pub fn is_continuous(passes: &[PassEvent]) -> bool {
    passes
        .windows(2)
        .all(|w| w[1].passer_x == w[0].receiver_x && w[1].passer_y == w[0].receiver_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single() {
        assert!(build_pass_chain(&[]).is_empty());

        let single = vec![PassEvent::new((1.0, 2.0), (3.0, 4.0))];
        assert_eq!(build_pass_chain(&single), single);
    }

    #[test]
    fn test_origins_follow_destinations() {
        let passes = vec![
            PassEvent::new((0.0, 0.0), (10.0, 0.0)),
            PassEvent::new((20.0, 0.0), (30.0, 0.0)),
            PassEvent::new((5.0, 5.0), (6.0, 6.0)),
        ];
        let chained = build_pass_chain(&passes);

        assert_eq!(chained[0], passes[0]);
        assert_eq!(chained[1].origin(), (10.0, 0.0));
        assert_eq!(chained[2].origin(), (30.0, 0.0));
        // destinations untouched
        assert_eq!(chained[2].destination(), (6.0, 6.0));
        assert!(is_continuous(&chained));
        assert!(!is_continuous(&passes));
    }

    #[test]
    fn test_keeps_metadata() {
        let mut pass = PassEvent::new((9.0, 9.0), (1.0, 1.0));
        pass.passer_id = Some(4);
        pass.outcome = Some("successful".into());
        let chained = build_pass_chain(&[PassEvent::new((0.0, 0.0), (2.0, 2.0)), pass]);
        assert_eq!(chained[1].passer_id, Some(4));
        assert_eq!(chained[1].outcome.as_deref(), Some("successful"));
    }

    proptest! {
        #[test]
        fn prop_chain_is_continuous(
            coords in prop::collection::vec(
                (-500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0, -500.0f64..500.0),
                0..20,
            )
        ) {
            let passes: Vec<PassEvent> = coords
                .iter()
                .map(|&(a, b, c, d)| PassEvent::new((a, b), (c, d)))
                .collect();
            let chained = build_pass_chain(&passes);

            prop_assert_eq!(chained.len(), passes.len());
            prop_assert!(is_continuous(&chained));
            if let Some(first) = passes.first() {
                prop_assert_eq!(&chained[0], first);
            }
        }
    }
}
