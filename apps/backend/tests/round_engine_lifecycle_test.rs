mod support;

use std::sync::Arc;
use std::time::Duration;

use bingo_backend::domain::round_names::DEFAULT_ROUND_NAMES;
use bingo_backend::domain::PrizeKind;
use bingo_backend::entities::rounds::DrawMode;
use bingo_backend::realtime::{EngineCommand, EngineEvent, EventHub};
use bingo_backend::repos::{cards, drawn_numbers, prizes, rounds};
use bingo_backend::{EndOutcome, ErrorCode, RoundEngine, RoundPhase};
use support::test_state::{test_engine_config, TEST_AUTO_DRAW_INTERVAL};
use support::{drain_events, ladder_card, named_kit, seed_drawn, started_round, test_state};

#[tokio::test]
async fn create_round_uses_default_name_when_blank() {
    let state = test_state().await;
    let round = state
        .engine()
        .create_round(Some("   "), DrawMode::Manual, None)
        .await
        .unwrap();

    assert!(DEFAULT_ROUND_NAMES.contains(&round.name.as_str()));
    assert!(!round.is_started());
    let snapshot = state.engine().snapshot().unwrap();
    assert_eq!(snapshot.round_id, round.id);
    assert_eq!(snapshot.phase, RoundPhase::Created);
}

#[tokio::test]
async fn only_one_round_may_be_open() {
    let state = test_state().await;
    started_round(&state).await;

    let err = state
        .engine()
        .create_round(Some("Second"), DrawMode::Manual, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundInProgress);
}

#[tokio::test]
async fn new_round_can_open_after_the_last_one_ends() {
    let state = test_state().await;
    let first = started_round(&state).await;
    state.engine().end_round(first.id).await.unwrap();

    let second = state
        .engine()
        .create_round(Some("Next"), DrawMode::Manual, None)
        .await
        .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(state.engine().current_round_id(), Some(second.id));
}

#[tokio::test]
async fn start_is_idempotent_and_ended_rounds_stay_ended() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let started_at = round.started_at;

    let again = state.engine().start_round(round.id).await.unwrap();
    assert_eq!(again.started_at, started_at);

    state.engine().end_round(round.id).await.unwrap();
    let err = state.engine().start_round(round.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundEnded);
}

#[tokio::test]
async fn start_unknown_round_is_not_found() {
    let state = test_state().await;
    let err = state.engine().start_round(999).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundNotFound);
}

#[tokio::test]
async fn end_round_emits_once() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let mut events = state.hub().subscribe();

    assert_eq!(state.engine().end_round(round.id).await.unwrap(), EndOutcome::Ended);
    assert_eq!(
        state.engine().end_round(round.id).await.unwrap(),
        EndOutcome::AlreadyEnded
    );

    assert_eq!(
        drain_events(&mut events),
        vec![EngineEvent::RoundEnded { round_id: round.id }]
    );
    assert!(state.engine().snapshot().is_none());
}

#[tokio::test]
async fn created_round_can_be_ended() {
    let state = test_state().await;
    let round = state
        .engine()
        .create_round(None, DrawMode::Automatic, None)
        .await
        .unwrap();

    assert_eq!(state.engine().end_round(round.id).await.unwrap(), EndOutcome::Ended);
    assert!(rounds::require_round(state.db(), round.id).await.unwrap().is_ended());
}

#[tokio::test]
async fn reset_clears_round_data_but_keeps_the_round() {
    let state = test_state().await;
    let round = started_round(&state).await;
    let kit = named_kit(&state).await;
    let card = cards::create_card(state.db(), &kit.id, round.id, &ladder_card(0))
        .await
        .unwrap();
    seed_drawn(&state, round.id, &[1, 16, 31, 46, 61]).await;
    state
        .engine()
        .try_award(round.id, &kit.id, card.id, PrizeKind::Quina)
        .await
        .unwrap();

    let report = state.engine().reset_round(round.id).await.unwrap();
    assert_eq!(report.drawn_numbers, 5);
    assert_eq!(report.cards, 1);
    assert_eq!(report.prizes, 1);

    assert_eq!(drawn_numbers::count_by_round(state.db(), round.id).await.unwrap(), 0);
    assert_eq!(cards::count_by_round(state.db(), round.id).await.unwrap(), 0);
    assert!(prizes::list_by_round(state.db(), round.id).await.unwrap().is_empty());
    assert!(rounds::require_round(state.db(), round.id).await.unwrap().is_started());
}

#[tokio::test]
async fn automatic_round_draws_until_stopped() {
    let state = test_state().await;
    let round = state
        .engine()
        .create_round(None, DrawMode::Automatic, None)
        .await
        .unwrap();
    state.engine().start_round(round.id).await.unwrap();
    assert!(state.engine().snapshot().unwrap().auto_draw);

    tokio::time::sleep(TEST_AUTO_DRAW_INTERVAL * 6).await;
    assert!(drawn_numbers::count_by_round(state.db(), round.id).await.unwrap() > 0);

    state
        .engine()
        .handle_command(EngineCommand::AutoDraw { active: false })
        .await
        .unwrap();
    assert!(!state.engine().snapshot().unwrap().auto_draw);

    tokio::time::sleep(TEST_AUTO_DRAW_INTERVAL * 2).await;
    let settled = drawn_numbers::count_by_round(state.db(), round.id).await.unwrap();
    tokio::time::sleep(TEST_AUTO_DRAW_INTERVAL * 4).await;
    assert_eq!(
        drawn_numbers::count_by_round(state.db(), round.id).await.unwrap(),
        settled
    );
}

#[tokio::test]
async fn manual_round_accepts_auto_draw_toggle() {
    let state = test_state().await;
    let round = started_round(&state).await;

    assert!(state.engine().set_auto_draw(true).unwrap());
    // A second start request leaves the single trigger running.
    assert!(state.engine().set_auto_draw(true).unwrap());
    tokio::time::sleep(TEST_AUTO_DRAW_INTERVAL * 4).await;
    assert!(!state.engine().set_auto_draw(false).unwrap());

    assert!(drawn_numbers::count_by_round(state.db(), round.id).await.unwrap() > 0);
}

#[tokio::test]
async fn auto_draw_without_open_round_fails() {
    let state = test_state().await;
    let err = state.engine().set_auto_draw(true).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RoundNotActive);
}

#[tokio::test]
async fn draw_command_targets_the_open_round() {
    let state = test_state().await;
    let round = started_round(&state).await;

    state
        .engine()
        .handle_command(EngineCommand::DrawNumber)
        .await
        .unwrap();
    assert_eq!(drawn_numbers::count_by_round(state.db(), round.id).await.unwrap(), 1);
}

#[tokio::test]
async fn restore_picks_up_the_open_round() {
    let state = test_state().await;
    let round = started_round(&state).await;

    let engine = RoundEngine::new(
        state.db().clone(),
        test_engine_config().with_auto_draw_interval(Duration::from_secs(60)),
        Arc::new(EventHub::new()),
    );
    assert_eq!(engine.restore().await.unwrap(), Some(round.id));

    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.round_id, round.id);
    assert_eq!(snapshot.phase, RoundPhase::Active);
    assert!(engine.draw(round.id).await.unwrap().number().is_some());
}
