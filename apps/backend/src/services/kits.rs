//! Kits: creation with a random access code, code login and balances.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;
use crate::repos::kits::{self, Kit};
use crate::repos::prizes;
use crate::utils::kit_code::{generate_kit_code, is_valid_kit_code};

/// Attempts before giving up on finding an unused code.
const CODE_ATTEMPTS: usize = 5;

pub struct KitService;

impl KitService {
    pub fn new() -> Self {
        Self
    }

    /// Create a kit under a fresh access code. A blank name is stored as none.
    pub async fn create_kit<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: Option<&str>,
    ) -> Result<Kit, AppError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned);

        for attempt in 1..=CODE_ATTEMPTS {
            let code = generate_kit_code();
            match kits::create_kit(conn, code.clone(), name.clone()).await {
                Ok(kit) => {
                    info!(kit_id = %kit.id, "Kit created");
                    return Ok(kit);
                }
                Err(err) => {
                    let err = AppError::from(err);
                    if err.code() != ErrorCode::KitCodeConflict {
                        return Err(err);
                    }
                    warn!(attempt, "Generated kit code already taken, retrying");
                }
            }
        }

        Err(AppError::conflict(
            ErrorCode::KitCodeConflict,
            "Could not allocate an unused kit code",
        ))
    }

    /// Validate an access code and return its kit.
    pub async fn login<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        code: &str,
    ) -> Result<Kit, AppError> {
        let code = code.trim().to_ascii_lowercase();
        if !is_valid_kit_code(&code) {
            return Err(DomainError::validation(
                ValidationKind::InvalidKitCode,
                "Kit code must look like xxxx-xxxx-xxxx",
            )
            .into());
        }
        let kit = kits::require_kit(conn, &code).await?;
        debug!(kit_id = %kit.id, "Kit login");
        Ok(kit)
    }

    pub async fn list_kits<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Kit>, AppError> {
        Ok(kits::list_all(conn).await?)
    }

    /// Sum of every prize and ledger entry for the kit.
    pub async fn balance<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        kit_id: &str,
    ) -> Result<i64, AppError> {
        kits::require_kit(conn, kit_id).await?;
        Ok(prizes::sum_points_for_kit(conn, kit_id).await?)
    }
}

impl Default for KitService {
    fn default() -> Self {
        Self::new()
    }
}
