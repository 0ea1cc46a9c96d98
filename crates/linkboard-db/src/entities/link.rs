//! Link entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Favicon shown next to the link
    pub icon_url: String,

    /// Target URL
    pub url: String,

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

// Many-to-many via links_labels_association
impl Related<super::label::Entity> for Entity {
    fn to() -> RelationDef {
        super::link_label::Relation::Label.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::link_label::Relation::Link.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
