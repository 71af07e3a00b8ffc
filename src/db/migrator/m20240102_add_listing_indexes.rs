use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const BEAT_INDEXES: [(&str, Beats); 4] = [
    ("idx_beats_creator_id", Beats::CreatorId),
    ("idx_beats_genre", Beats::Genre),
    ("idx_beats_key", Beats::Key),
    ("idx_beats_bpm", Beats::Bpm),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in BEAT_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Beats::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_likes_beat_id")
                    .table(Likes::Table)
                    .col(Likes::BeatId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_likes_beat_id")
                    .table(Likes::Table)
                    .to_owned(),
            )
            .await?;

        for (name, _) in BEAT_INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .name(name)
                        .table(Beats::Table)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Beats {
    Table,
    CreatorId,
    Genre,
    Key,
    Bpm,
}

#[derive(DeriveIden)]
enum Likes {
    Table,
    BeatId,
}
