//! User entity
//!
//! A user optionally belongs to a team, may designate one main board and keeps
//! a set of favorite boards through `users_favorite_boards_association`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name
    pub name: String,

    /// User email (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id credential hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account is active
    pub is_active: bool,

    /// Team membership
    pub team_id: Option<i32>,

    /// The user's designated main board
    pub main_board_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Team,

    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::MainBoardId",
        to = "super::board::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    MainBoard,

    /// Links created by the user
    #[sea_orm(has_many = "super::link::Entity")]
    CreatedLinks,

    /// Labels created by the user
    #[sea_orm(has_many = "super::label::Entity")]
    CreatedLabels,

    /// Favorite-board association rows
    #[sea_orm(has_many = "super::user_favorite_board::Entity")]
    FavoriteBoards,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedLinks.def()
    }
}

impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedLabels.def()
    }
}

impl Related<super::user_favorite_board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteBoards.def()
    }
}

/// Boards a user marked as favorite.
///
/// `users` reaches `boards` along three different paths (main board, created
/// boards, favorites), so the many-to-many hop is a named [`Linked`] instead of
/// a `Related` impl.
#[derive(Debug)]
pub struct FavoriteBoards;

impl Linked for FavoriteBoards {
    type FromEntity = Entity;
    type ToEntity = super::board::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::user_favorite_board::Relation::User.def().rev(),
            super::user_favorite_board::Relation::Board.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}
