//! Label entity
//!
//! Labels tag links and act as filters on boards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Label name (unique)
    #[sea_orm(unique)]
    pub name: String,

    pub created_at: ChronoDateTimeUtc,

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

    #[sea_orm(has_many = "super::link_label::Entity")]
    LinkLabels,

    #[sea_orm(has_many = "super::board_label_filter::Entity")]
    BoardFilters,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::link_label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkLabels.def()
    }
}

impl Related<super::board_label_filter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BoardFilters.def()
    }
}

// Many-to-many via links_labels_association
impl Related<super::link::Entity> for Entity {
    fn to() -> RelationDef {
        super::link_label::Relation::Link.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::link_label::Relation::Label.def().rev())
    }
}

// Many-to-many via boards_labels_filters_association
impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        super::board_label_filter::Relation::Board.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::board_label_filter::Relation::Label.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
