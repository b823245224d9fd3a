/// Property-based tests for value order and advantage rules
use proptest::prelude::*;

use crate::domain::{test_gens, RuleSet, ValueOrder};

proptest! {
    /// Property: without a revolution a rank covers anything not stronger in
    /// base order; with one the comparison flips.
    #[test]
    fn prop_cover_follows_active_order(
        a in test_gens::rank(),
        b in test_gens::rank(),
        reversed in any::<bool>(),
    ) {
        let mut order = ValueOrder::new(13);
        if reversed {
            order.reverse();
        }
        let covers = order.can_cover(a, b).unwrap();
        if reversed {
            prop_assert_eq!(covers, a.0 <= b.0);
        } else {
            prop_assert_eq!(covers, a.0 >= b.0);
        }
    }

    /// Property: two revolutions restore the original order
    #[test]
    fn prop_revolution_is_an_involution(a in test_gens::rank(), b in test_gens::rank()) {
        let original = ValueOrder::new(13);
        let mut order = original;
        order.reverse();
        order.reverse();
        prop_assert_eq!(order, original);
        prop_assert_eq!(order.compare(a, b).unwrap(), original.compare(a, b).unwrap());
    }

    /// Property: advantages are antisymmetric and sum to zero
    #[test]
    fn prop_advantages_are_symmetric(players in 2usize..=10, cards in 0u8..=4) {
        let rules = RuleSet { exchange_cards: cards, ..RuleSet::default() };
        let adv = rules.advantages(players);
        prop_assert_eq!(adv.len(), players);
        for i in 0..players {
            prop_assert_eq!(adv[i], -adv[players - 1 - i]);
        }
        prop_assert_eq!(adv.iter().map(|&a| i32::from(a)).sum::<i32>(), 0);
        prop_assert!(adv[0] <= 0);
    }
}
