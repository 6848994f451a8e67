use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    Name,
    DrawMode,
    ScheduledStart,
    CreatedAt,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum Kits {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Cards {
    Table,
    Id,
    KitId,
    RoundId,
    Grid,
    QuinaAwarded,
    FullAwarded,
    CreatedAt,
}

#[derive(Iden)]
enum DrawnNumbers {
    Table,
    Id,
    RoundId,
    Number,
    DrawnAt,
}

#[derive(Iden)]
enum Prizes {
    Table,
    Id,
    KitId,
    CardId,
    RoundId,
    Kind,
    Points,
    Claimed,
    CreatedAt,
}

// Gameplay prize kinds are unique per (round, kit); ledger kinds are not.
const PRIZES_GAMEPLAY_UNIQUE: &str = "CREATE UNIQUE INDEX IF NOT EXISTS ux_prizes_round_kit_kind \
     ON prizes (round_id, kit_id, kind) WHERE kind IN ('quina', 'full')";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rounds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Rounds::DrawMode)
                            .string()
                            .not_null()
                            .default("manual"),
                    )
                    .col(
                        ColumnDef::new(Rounds::ScheduledStart)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_created_at")
                    .table(Rounds::Table)
                    .col(Rounds::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // kits
        manager
            .create_table(
                Table::create()
                    .table(Kits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Kits::Id)
                            .string_len(14)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Kits::Name).string().null())
                    .col(
                        ColumnDef::new(Kits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // cards
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cards::KitId).string_len(14).not_null())
                    .col(ColumnDef::new(Cards::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Cards::Grid).text().not_null())
                    .col(
                        ColumnDef::new(Cards::QuinaAwarded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Cards::FullAwarded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_kit_id")
                            .from(Cards::Table, Cards::KitId)
                            .to(Kits::Table, Kits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cards_round_id")
                            .from(Cards::Table, Cards::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cards_round_id")
                    .table(Cards::Table)
                    .col(Cards::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_cards_kit_round")
                    .table(Cards::Table)
                    .col(Cards::KitId)
                    .col(Cards::RoundId)
                    .to_owned(),
            )
            .await?;

        // drawn_numbers
        manager
            .create_table(
                Table::create()
                    .table(DrawnNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawnNumbers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(DrawnNumbers::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawnNumbers::Number)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(DrawnNumbers::Number)
                                    .gte(1)
                                    .and(Expr::col(DrawnNumbers::Number).lte(75)),
                            ),
                    )
                    .col(
                        ColumnDef::new(DrawnNumbers::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drawn_numbers_round_id")
                            .from(DrawnNumbers::Table, DrawnNumbers::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one row per (round, number): backstop for racing draw triggers
        manager
            .create_index(
                Index::create()
                    .name("ux_drawn_numbers_round_number")
                    .table(DrawnNumbers::Table)
                    .col(DrawnNumbers::RoundId)
                    .col(DrawnNumbers::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // prizes
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Prizes::KitId).string_len(14).not_null())
                    .col(ColumnDef::new(Prizes::CardId).big_integer().null())
                    .col(ColumnDef::new(Prizes::RoundId).big_integer().null())
                    .col(ColumnDef::new(Prizes::Kind).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Prizes::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Prizes::Claimed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_kit_id")
                            .from(Prizes::Table, Prizes::KitId)
                            .to(Kits::Table, Kits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_card_id")
                            .from(Prizes::Table, Prizes::CardId)
                            .to(Cards::Table, Cards::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_round_id")
                            .from(Prizes::Table, Prizes::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_prizes_kit_id")
                    .table(Prizes::Table)
                    .col(Prizes::KitId)
                    .to_owned(),
            )
            .await?;

        // Partial unique index: sea-query has no portable builder for the WHERE clause,
        // and both Postgres and SQLite accept the same statement.
        manager
            .get_connection()
            .execute_unprepared(PRIZES_GAMEPLAY_UNIQUE)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_prizes_round_kit_kind")
                    .table(Prizes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_prizes_kit_id")
                    .table(Prizes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_drawn_numbers_round_number")
                    .table(DrawnNumbers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DrawnNumbers::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_cards_kit_round")
                    .table(Cards::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_cards_round_id")
                    .table(Cards::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Kits::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_rounds_created_at")
                    .table(Rounds::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        Ok(())
    }
}
