//! Board entity

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Board name (unique)
    #[sea_orm(unique)]
    pub name: String,

    pub description: String,

    pub created_at: ChronoDateTimeUtc,

    /// Refreshed on every update of the row
    pub updated_at: ChronoDateTimeUtc,

    /// Creator (not nullable)
    pub created_by_user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CreatedBy,

    #[sea_orm(has_many = "super::user_favorite_board::Entity")]
    FavoritedBy,

    #[sea_orm(has_many = "super::board_label_filter::Entity")]
    LabelFilters,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::user_favorite_board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoritedBy.def()
    }
}

impl Related<super::board_label_filter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabelFilters.def()
    }
}

// Many-to-many via boards_labels_filters_association
impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        super::board_label_filter::Relation::Label.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::board_label_filter::Relation::Board.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
