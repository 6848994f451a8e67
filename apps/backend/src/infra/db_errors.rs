//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Table name from SQLite "UNIQUE constraint failed: table.col[, table.col]" messages.
fn extract_sqlite_unique_table(error_msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    let rest = &error_msg[start..];
    rest.split('.').next().map(str::trim)
}

fn map_table_to_conflict(table: &str) -> Option<(ConflictKind, &'static str)> {
    match table {
        "drawn_numbers" => Some((
            ConflictKind::DuplicateDraw,
            "Number already drawn in this round",
        )),
        "prizes" => Some((
            ConflictKind::DuplicatePrize,
            "Prize already awarded to this kit in this round",
        )),
        "kits" => Some((ConflictKind::KitCodeConflict, "Kit code already exists")),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_drawn_numbers_round_number") {
        return map_table_to_conflict("drawn_numbers");
    }
    if error_msg.contains("ux_prizes_round_kit_kind") {
        return map_table_to_conflict("prizes");
    }
    if error_msg.contains("kits_pkey") {
        return map_table_to_conflict("kits");
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                format!("Record not found: {what}"),
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) => {
            error!(raw_error = %error_msg, "Stored data failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        if let Some((kind, detail)) = extract_sqlite_unique_table(&error_msg)
            .and_then(map_table_to_conflict)
            .or_else(|| map_postgres_constraint_to_conflict(&error_msg))
        {
            // expected under racing triggers; callers decide how loud to be
            tracing::debug!(?kind, raw_error = %error_msg, "Unique constraint violation");
            return DomainError::conflict(kind, detail);
        }

        warn!(raw_error = %error_msg, "Unmapped unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_composite_unique_maps_to_duplicate_draw() {
        let err = sea_orm::DbErr::Custom(
            "error returned from database: (code: 2067) UNIQUE constraint failed: drawn_numbers.round_id, drawn_numbers.number".into(),
        );
        assert!(map_db_err(err).is_duplicate_draw());
    }

    #[test]
    fn sqlite_partial_index_maps_to_duplicate_prize() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: prizes.round_id, prizes.kit_id, prizes.kind".into(),
        );
        assert!(map_db_err(err).is_duplicate_prize());
    }

    #[test]
    fn postgres_constraint_name_maps_to_duplicate_prize() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_prizes_round_kit_kind\"".into(),
        );
        assert!(map_db_err(err).is_duplicate_prize());
    }

    #[test]
    fn unknown_unique_violation_is_generic_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: other.col".into());
        assert_eq!(
            map_db_err(err),
            DomainError::conflict(
                ConflictKind::Other("Unique".into()),
                "Unique constraint violation"
            )
        );
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("round 7".into());
        assert!(matches!(map_db_err(err), DomainError::NotFound(_, _)));
    }

    #[test]
    fn unclassified_error_is_infra_other() {
        let err = sea_orm::DbErr::Custom("something odd".into());
        assert!(matches!(
            map_db_err(err),
            DomainError::Infra(InfraErrorKind::Other(_), _)
        ));
    }
}
