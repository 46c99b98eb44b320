use proptest::prelude::*;
use std::cmp::Ordering;
use teen_patti::cards::{Card, Rank, Suit};
use teen_patti::evaluator::{evaluate_three, Category};

fn rank_from_val(v: u8) -> Rank {
    Rank::from_value(v).unwrap_or(Rank::Ace)
}

fn any_rank() -> impl Strategy<Value = Rank> {
    (2u8..=14u8).prop_map(rank_from_val)
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

fn any_card() -> impl Strategy<Value = Card> {
    (any_rank(), any_suit()).prop_map(|(r, s)| Card::new(r, s))
}

/// Off-suit run topped by `top` (4..=14).
fn sequence_cards(top: u8) -> [Card; 3] {
    [
        Card::new(rank_from_val(top - 2), Suit::Clubs),
        Card::new(rank_from_val(top - 1), Suit::Diamonds),
        Card::new(rank_from_val(top), Suit::Hearts),
    ]
}

/// Three distinct ranks that do not form a run, highest first.
fn color_ranks() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::btree_set(2u8..=14u8, 3)
        .prop_map(|set| set.into_iter().rev().collect::<Vec<u8>>())
        .prop_filter("non-sequence ranks", |v| {
            let run = v[0] == v[1] + 1 && v[1] == v[2] + 1;
            let wheel = v == &[14, 3, 2];
            !(run || wheel)
        })
}

proptest! {
    #[test]
    fn ordering_is_antisymmetric_and_transitive(
        a in prop::array::uniform3(any_card()),
        b in prop::array::uniform3(any_card()),
        c in prop::array::uniform3(any_card()),
    ) {
        let ea = evaluate_three(&a);
        let eb = evaluate_three(&b);
        let ec = evaluate_three(&c);
        if ea >= eb && eb >= ea { prop_assert_eq!(ea, eb); }
        if ea >= eb && eb >= ec { prop_assert!(ea >= ec); }
    }

    #[test]
    fn card_order_does_not_matter(cards in prop::array::uniform3(any_card())) {
        let [x, y, z] = cards;
        let base = evaluate_three(&cards);
        prop_assert_eq!(base, evaluate_three(&[z, x, y]));
        prop_assert_eq!(base, evaluate_three(&[y, z, x]));
        prop_assert_eq!(base, evaluate_three(&[z, y, x]));
    }

    #[test]
    fn category_dominates_tiebreaks(
        a in prop::array::uniform3(any_card()),
        b in prop::array::uniform3(any_card()),
    ) {
        let ea = evaluate_three(&a);
        let eb = evaluate_three(&b);
        if ea.category != eb.category {
            prop_assert_eq!(ea.cmp(&eb), ea.category.cmp(&eb.category));
        }
    }

    #[test]
    fn sequence_ordering_respects_top_card(top_hi in 5u8..=14u8, top_lo in 4u8..=13u8) {
        prop_assume!(top_hi > top_lo);
        let e_hi = evaluate_three(&sequence_cards(top_hi));
        let e_lo = evaluate_three(&sequence_cards(top_lo));
        prop_assert_eq!(e_hi.category, Category::Sequence);
        prop_assert_eq!(e_lo.category, Category::Sequence);
        prop_assert!(e_hi > e_lo);
    }

    #[test]
    fn color_kicker_ordering(a in color_ranks(), b in color_ranks()) {
        let hand = |v: &[u8]| [
            Card::new(rank_from_val(v[0]), Suit::Hearts),
            Card::new(rank_from_val(v[1]), Suit::Hearts),
            Card::new(rank_from_val(v[2]), Suit::Hearts),
        ];
        let e_a = evaluate_three(&hand(a.as_slice()));
        let e_b = evaluate_three(&hand(b.as_slice()));
        prop_assert_eq!(e_a.category, Category::Color);
        prop_assert_eq!(e_b.category, Category::Color);
        match a.cmp(&b) {
            Ordering::Greater => prop_assert!(e_a > e_b),
            Ordering::Less => prop_assert!(e_a < e_b),
            Ordering::Equal => prop_assert_eq!(e_a, e_b),
        }
    }

    #[test]
    fn any_trail_beats_any_other_hand(r in any_rank(), other in prop::array::uniform3(any_card())) {
        let trail = [
            Card::new(r, Suit::Spades),
            Card::new(r, Suit::Hearts),
            Card::new(r, Suit::Clubs),
        ];
        let e_other = evaluate_three(&other);
        prop_assume!(e_other.category != Category::Trail);
        prop_assert!(evaluate_three(&trail) > e_other);
    }
}
