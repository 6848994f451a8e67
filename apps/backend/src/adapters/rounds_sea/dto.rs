//! DTOs for rounds_sea adapter.

use time::OffsetDateTime;

use crate::entities::rounds::DrawMode;

/// DTO for creating a new round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub name: String,
    pub draw_mode: DrawMode,
    pub scheduled_start: Option<OffsetDateTime>,
}

impl RoundCreate {
    pub fn new(name: impl Into<String>, draw_mode: DrawMode) -> Self {
        Self {
            name: name.into(),
            draw_mode,
            scheduled_start: None,
        }
    }

    pub fn scheduled_at(mut self, at: Option<OffsetDateTime>) -> Self {
        self.scheduled_start = at;
        self
    }
}
