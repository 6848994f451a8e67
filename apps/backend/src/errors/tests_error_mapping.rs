// Unit tests for DomainError -> AppError mapping; no database involved.
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_engine_validation_kinds() {
    let cases = [
        (ValidationKind::InvalidCardLayout, ErrorCode::InvalidCardLayout),
        (ValidationKind::RoundNotActive, ErrorCode::RoundNotActive),
        (ValidationKind::RoundEnded, ErrorCode::RoundEnded),
        (ValidationKind::RoundExhausted, ErrorCode::RoundExhausted),
        (ValidationKind::InvalidKitCode, ErrorCode::InvalidKitCode),
        (ValidationKind::InvalidPoints, ErrorCode::InvalidPoints),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "x").into();
        assert_eq!(app.code(), code);
        assert!(matches!(app, AppError::Validation { .. }));
    }
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::DuplicatePrize, "dup").into();
    assert_eq!(app.code().as_str(), "DUPLICATE_PRIZE");

    let app: AppError = DomainError::conflict(ConflictKind::DuplicateDraw, "dup").into();
    assert_eq!(app.code().as_str(), "DUPLICATE_DRAW");

    let app: AppError = DomainError::conflict(ConflictKind::RoundInProgress, "open").into();
    assert_eq!(app.code().as_str(), "ROUND_IN_PROGRESS");

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict").into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.detail(), "generic conflict");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Round, "no round").into();
    assert_eq!(app.code().as_str(), "ROUND_NOT_FOUND");

    let app: AppError = DomainError::not_found(NotFoundKind::Kit, "no kit").into();
    assert_eq!(app.code().as_str(), "KIT_NOT_FOUND");
}

#[test]
fn maps_infra_to_storage_failures() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code(), ErrorCode::DbTimeout);
    assert!(app.is_storage_failure());

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert!(app.is_storage_failure());

    let app: AppError = DomainError::infra(InfraErrorKind::Transport, "redis").into();
    assert_eq!(app.code(), ErrorCode::TransportError);
    assert!(!app.is_storage_failure());
}

#[test]
fn db_err_goes_through_domain_mapping() {
    let app: AppError = sea_orm::DbErr::Custom(
        "UNIQUE constraint failed: drawn_numbers.round_id, drawn_numbers.number".into(),
    )
    .into();
    assert_eq!(app.code(), ErrorCode::DuplicateDraw);
}
