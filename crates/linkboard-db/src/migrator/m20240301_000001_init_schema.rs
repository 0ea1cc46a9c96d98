//! Initial schema: entity tables, join tables and unique indexes

use sea_orm_migration::sea_orm::DbBackend;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users.main_board_id and boards.created_by_user_id reference each other.
        // SQLite resolves foreign key targets lazily and cannot add constraints
        // later, so it gets the constraint inline; other backends add it once
        // `boards` exists.
        let inline_main_board_fk = manager.get_database_backend() == DbBackend::Sqlite;

        // ============================================================
        // 1. teams
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(pk_auto(Team::Id))
                    .col(string_len(Team::Name, 255).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 2. users
        // ============================================================
        let mut users = Table::create();
        users
            .table(User::Table)
            .if_not_exists()
            .col(pk_auto(User::Id))
            .col(string_len(User::Name, 255).not_null())
            .col(string_len(User::Email, 255).not_null().unique_key())
            .col(string_len(User::PasswordHash, 255).not_null())
            .col(boolean(User::IsActive).not_null().default(true))
            .col(integer_null(User::TeamId))
            .col(integer_null(User::MainBoardId))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_users_team_id")
                    .from(User::Table, User::TeamId)
                    .to(Team::Table, Team::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::Cascade),
            );
        if inline_main_board_fk {
            users.foreign_key(&mut main_board_fk());
        }
        manager.create_table(users.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_team_id")
                    .table(User::Table)
                    .col(User::TeamId)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 3. boards
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Board::Table)
                    .if_not_exists()
                    .col(pk_auto(Board::Id))
                    .col(string_len(Board::Name, 255).not_null().unique_key())
                    .col(text(Board::Description).not_null().default(""))
                    .col(
                        timestamp_with_time_zone(Board::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Board::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Board::CreatedByUserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_boards_created_by_user_id")
                            .from(Board::Table, Board::CreatedByUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        if !inline_main_board_fk {
            manager.create_foreign_key(main_board_fk()).await?;
        }

        // ============================================================
        // 4. links
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Link::Table)
                    .if_not_exists()
                    .col(pk_auto(Link::Id))
                    .col(text(Link::IconUrl).not_null())
                    .col(text(Link::Url).not_null())
                    .col(
                        timestamp_with_time_zone(Link::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Link::CreatedByUserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_links_created_by_user_id")
                            .from(Link::Table, Link::CreatedByUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 5. labels
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Label::Table)
                    .if_not_exists()
                    .col(pk_auto(Label::Id))
                    .col(string_len(Label::Name, 255).not_null().unique_key())
                    .col(
                        timestamp_with_time_zone(Label::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Label::CreatedByUserId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_labels_created_by_user_id")
                            .from(Label::Table, Label::CreatedByUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // 6. join tables
        // ============================================================
        manager
            .create_table(join_table(
                LinkLabel::Table,
                (LinkLabel::LinkId, Link::Table, Link::Id),
                (LinkLabel::LabelId, Label::Table, Label::Id),
            ))
            .await?;

        manager
            .create_table(join_table(
                UserFavoriteBoard::Table,
                (UserFavoriteBoard::UserId, User::Table, User::Id),
                (UserFavoriteBoard::BoardId, Board::Table, Board::Id),
            ))
            .await?;

        manager
            .create_table(join_table(
                BoardLabelFilter::Table,
                (BoardLabelFilter::BoardId, Board::Table, Board::Id),
                (BoardLabelFilter::LabelId, Label::Table, Label::Id),
            ))
            .await?;

        // Reverse lookups (label -> links, board -> favorited by, label -> boards)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_links_labels_label_id")
                    .table(LinkLabel::Table)
                    .col(LinkLabel::LabelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_favorite_boards_board_id")
                    .table(UserFavoriteBoard::Table)
                    .col(UserFavoriteBoard::BoardId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_boards_labels_filters_label_id")
                    .table(BoardLabelFilter::Table)
                    .col(BoardLabelFilter::LabelId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BoardLabelFilter::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserFavoriteBoard::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LinkLabel::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Label::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Link::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() != DbBackend::Sqlite {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name("fk_users_main_board_id")
                        .table(User::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Board::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

fn main_board_fk() -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name("fk_users_main_board_id")
        .from(User::Table, User::MainBoardId)
        .to(Board::Table, Board::Id)
        .on_delete(ForeignKeyAction::SetNull)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Pure association table keyed by the composite of its two foreign keys.
fn join_table<T, L, R>(
    table: T,
    (left, left_table, left_id): (L, impl IntoIden + 'static, impl IntoIden + 'static),
    (right, right_table, right_id): (R, impl IntoIden + 'static, impl IntoIden + 'static),
) -> TableCreateStatement
where
    T: IntoIden + Clone + 'static,
    L: IntoIden + Clone + 'static,
    R: IntoIden + Clone + 'static,
{
    Table::create()
        .table(table.clone())
        .if_not_exists()
        .col(integer(left.clone()).not_null())
        .col(integer(right.clone()).not_null())
        .primary_key(Index::create().col(left.clone()).col(right.clone()))
        .foreign_key(
            ForeignKey::create()
                .from(table.clone(), left)
                .to(left_table, left_id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(table, right)
                .to(right_table, right_id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden, Clone, Copy)]
enum Team {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden, Clone, Copy)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    IsActive,
    TeamId,
    MainBoardId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Board {
    #[sea_orm(iden = "boards")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
    CreatedByUserId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Link {
    #[sea_orm(iden = "links")]
    Table,
    Id,
    IconUrl,
    Url,
    CreatedAt,
    CreatedByUserId,
}

#[derive(DeriveIden, Clone, Copy)]
enum Label {
    #[sea_orm(iden = "labels")]
    Table,
    Id,
    Name,
    CreatedAt,
    CreatedByUserId,
}

#[derive(DeriveIden, Clone, Copy)]
enum LinkLabel {
    #[sea_orm(iden = "links_labels_association")]
    Table,
    LinkId,
    LabelId,
}

#[derive(DeriveIden, Clone, Copy)]
enum UserFavoriteBoard {
    #[sea_orm(iden = "users_favorite_boards_association")]
    Table,
    UserId,
    BoardId,
}

#[derive(DeriveIden, Clone, Copy)]
enum BoardLabelFilter {
    #[sea_orm(iden = "boards_labels_filters_association")]
    Table,
    BoardId,
    LabelId,
}
