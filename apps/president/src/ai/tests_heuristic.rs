use crate::ai::{AiConfig, GiftRequest, HeuristicAi, PlayRequest, PlayStrategy};
use crate::domain::{Card, DeckSpec, Move, Play, RuleSet, ValueOrder};

fn hand(tokens: &[&str]) -> Vec<Card> {
    let mut cards = DeckSpec::default().try_parse_cards(tokens).unwrap();
    cards.sort();
    cards
}

fn request<'a>(
    hand: &'a [Card],
    top: Option<&'a Play>,
    rules: &'a RuleSet,
) -> PlayRequest<'a> {
    PlayRequest {
        seat: 0,
        hand,
        pile_top: top,
        required_count: top.map(|p| p.cards.len()),
        order: ValueOrder::new(13),
        rules,
        round_no: 1,
        attempt: 0,
        rejection: None,
    }
}

fn ai() -> HeuristicAi {
    HeuristicAi::new(AiConfig::default())
}

#[test]
fn weak_full_set_starts_a_revolution() {
    let rules = RuleSet::default();
    let cards = hand(&["3,spades", "3,hearts", "3,diamonds", "3,clubs"]);
    let mv = ai().decide(&request(&cards, None, &rules));
    assert_eq!(mv, Move::Play(cards.clone()));
}

#[test]
fn strong_pair_is_kept_and_the_weak_single_led() {
    let rules = RuleSet::default();
    let cards = hand(&["K,spades", "K,hearts", "5,spades"]);
    let mv = ai().decide(&request(&cards, None, &rules));
    assert_eq!(mv, Move::Play(hand(&["5,spades"])));
}

#[test]
fn weak_pair_is_led_whole() {
    let rules = RuleSet::default();
    let cards = hand(&["4,spades", "4,hearts", "J,clubs", "Q,clubs", "A,clubs"]);
    let mv = ai().decide(&request(&cards, None, &rules));
    assert_eq!(mv, Move::Play(hand(&["4,spades", "4,hearts"])));
}

#[test]
fn follows_with_the_weakest_exact_group() {
    let rules = RuleSet::default();
    let top = Play {
        seat: 1,
        cards: hand(&["6,spades", "6,hearts"]),
    };
    let cards = hand(&[
        "4,spades", "4,hearts", "8,spades", "8,hearts", "9,clubs", "9,diamonds", "9,hearts",
        "A,spades",
    ]);
    let mv = ai().decide(&request(&cards, Some(&top), &rules));
    assert_eq!(mv, Move::Play(hand(&["8,spades", "8,hearts"])));
}

#[test]
fn splits_a_larger_group_only_when_allowed() {
    let rules = RuleSet::default();
    let top = Play {
        seat: 1,
        cards: hand(&["6,spades", "6,hearts"]),
    };
    let cards = hand(&["9,clubs", "9,diamonds", "9,hearts", "3,spades"]);
    let mv = ai().decide(&request(&cards, Some(&top), &rules));
    assert_eq!(mv, Move::Play(hand(&["9,hearts", "9,diamonds"])));

    let strict = HeuristicAi::new(AiConfig {
        allow_split: Some(false),
        ..AiConfig::default()
    });
    assert_eq!(strict.decide(&request(&cards, Some(&top), &rules)), Move::Fold);
}

#[test]
fn folds_while_holding_the_pile_top_rank() {
    let rules = RuleSet::default();
    let top = Play {
        seat: 1,
        cards: hand(&["6,spades"]),
    };
    let matching = hand(&["6,hearts", "9,clubs", "A,clubs"]);
    assert_eq!(ai().decide(&request(&matching, Some(&top), &rules)), Move::Fold);

    let other = hand(&["9,clubs", "A,clubs"]);
    assert_eq!(
        ai().decide(&request(&other, Some(&top), &rules)),
        Move::Play(hand(&["9,clubs"]))
    );
}

#[test]
fn leads_part_of_a_best_rank_pair_instead_of_folding() {
    let rules = RuleSet {
        best_card_loses: true,
        loser_can_continue: true,
        ..RuleSet::default()
    };
    let cards = hand(&["2,spades", "2,hearts"]);
    let req = request(&cards, None, &rules);
    let legal = req.legal_combinations();
    assert_eq!(legal.len(), 1);

    let mv = ai().decide(&req);
    assert_eq!(mv, Move::Play(legal[0].clone()));
}

#[test]
fn avoids_finishing_on_the_best_card_when_it_loses() {
    let top = Play {
        seat: 1,
        cards: hand(&["10,spades"]),
    };
    let cards = hand(&["2,spades"]);

    let losing = RuleSet {
        best_card_loses: true,
        ..RuleSet::default()
    };
    assert_eq!(ai().decide(&request(&cards, Some(&top), &losing)), Move::Fold);

    let plain = RuleSet::default();
    assert_eq!(
        ai().decide(&request(&cards, Some(&top), &plain)),
        Move::Play(cards.clone())
    );
}

#[test]
fn folds_when_nothing_covers() {
    let rules = RuleSet::default();
    let top = Play {
        seat: 2,
        cards: hand(&["A,spades"]),
    };
    let cards = hand(&["4,clubs", "K,clubs"]);
    assert_eq!(ai().decide(&request(&cards, Some(&top), &rules)), Move::Fold);
}

#[test]
fn gives_back_the_weakest_cards() {
    let rules = RuleSet::default();
    let cards = hand(&["2,spades", "5,hearts", "3,clubs", "K,diamonds"]);
    let req = GiftRequest {
        seat: 0,
        receiver: 3,
        hand: &cards,
        count: 2,
        order: ValueOrder::new(13),
        rules: &rules,
        attempt: 0,
        rejection: None,
    };
    let gift = ai().choose_gift(&req).unwrap();
    assert_eq!(gift, hand(&["3,clubs", "5,hearts"]));
}

#[test]
fn legal_combinations_respect_count_and_strength() {
    let rules = RuleSet::default();
    let top = Play {
        seat: 1,
        cards: hand(&["8,spades", "8,hearts"]),
    };
    let cards = hand(&["4,spades", "4,hearts", "9,clubs", "9,diamonds", "J,clubs"]);
    let req = request(&cards, Some(&top), &rules);
    assert_eq!(
        req.legal_combinations(),
        vec![hand(&["9,diamonds", "9,clubs"])]
    );
}
