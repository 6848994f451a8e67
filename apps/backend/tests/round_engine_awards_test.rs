mod support;

use bingo_backend::domain::PrizeKind;
use bingo_backend::realtime::EngineEvent;
use bingo_backend::repos::{cards, prizes};
use bingo_backend::services::KitService;
use bingo_backend::{AwardOutcome, ErrorCode};
use support::{drain_events, ladder_card, named_kit, seed_drawn, started_round, test_state};

#[tokio::test]
async fn award_is_stored_flagged_and_broadcast() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let card = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();
    let mut events = state.hub().subscribe();

    let outcome = state
        .engine()
        .try_award(round.id, &kit.id, card.id, PrizeKind::Quina)
        .await
        .unwrap();
    let AwardOutcome::Awarded(prize) = outcome else {
        panic!("expected an award, got {outcome:?}");
    };
    assert_eq!(prize.points, 30);
    assert_eq!(prize.card_id, Some(card.id));
    assert!(!prize.claimed);

    assert!(cards::require_card(state.db(), card.id).await.unwrap().quina_awarded);
    assert_eq!(
        drain_events(&mut events),
        vec![EngineEvent::PrizeWon {
            kind: PrizeKind::Quina,
            kit_id: kit.id.clone(),
            card_id: card.id,
        }]
    );
}

#[tokio::test]
async fn second_award_for_same_kit_is_a_no_op() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let first = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();
    let second = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(3))
        .await
        .unwrap();

    let engine = state.engine();
    engine
        .try_award(round.id, &kit.id, first.id, PrizeKind::Full)
        .await
        .unwrap();
    let mut events = state.hub().subscribe();

    let again = engine
        .try_award(round.id, &kit.id, second.id, PrizeKind::Full)
        .await
        .unwrap();
    assert_eq!(again, AwardOutcome::AlreadyAwarded);
    assert!(drain_events(&mut events).is_empty());
    assert!(!cards::require_card(state.db(), second.id).await.unwrap().full_awarded);
    assert_eq!(
        prizes::count_by_round_and_kind(state.db(), round.id, PrizeKind::Full)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn racing_awards_store_a_single_prize() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let a = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();
    let b = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(7))
        .await
        .unwrap();

    let engine = state.engine();
    let (x, y) = tokio::join!(
        engine.try_award(round.id, &kit.id, a.id, PrizeKind::Quina),
        engine.try_award(round.id, &kit.id, b.id, PrizeKind::Quina),
    );
    let outcomes = [x.unwrap(), y.unwrap()];
    let awarded = outcomes
        .iter()
        .filter(|o| matches!(o, AwardOutcome::Awarded(_)))
        .count();
    assert_eq!(awarded, 1);
    assert!(outcomes.contains(&AwardOutcome::AlreadyAwarded));
    assert_eq!(
        prizes::count_by_round_and_kind(state.db(), round.id, PrizeKind::Quina)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn ledger_kinds_are_not_awardable() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let card = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();

    let err = state
        .engine()
        .try_award(round.id, &kit.id, card.id, PrizeKind::PointGrant)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPrizeKind);
}

#[tokio::test]
async fn ended_round_accepts_no_awards() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let card = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();
    state.engine().end_round(round.id).await.unwrap();

    let err = state
        .engine()
        .try_award(round.id, &kit.id, card.id, PrizeKind::Quina)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundEnded);
}

#[tokio::test]
async fn card_of_another_kit_is_rejected() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kits = KitService::new();
    let owner = kits.create_kit(state.db(), None).await.unwrap();
    let other = kits.create_kit(state.db(), None).await.unwrap();
    let card = cards::create_card(state.db(), &owner.id, round.id, &ladder_card(0))
        .await
        .unwrap();

    let err = state
        .engine()
        .try_award(round.id, &other.id, card.id, PrizeKind::Quina)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[tokio::test]
async fn evaluate_card_reflects_drawn_numbers() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let card = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();

    let before = state.engine().evaluate_card(card.id).await.unwrap();
    assert!(!before.quina && !before.full);

    // Column B top to bottom.
    seed_drawn(&state, round.id, &[1, 2, 3, 4, 5]).await;
    let after = state.engine().evaluate_card(card.id).await.unwrap();
    assert!(after.quina);
    assert!(!after.full);
}
