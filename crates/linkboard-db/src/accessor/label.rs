//! Label accessor

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use super::{Accessor, Record};
use crate::entities::{board_label_filter, label, link_label};
use crate::error::StoreResult;
use crate::registry::EntityKind;

pub type LabelAccessor<'s> = Accessor<'s, label::Entity>;

impl Record for label::Entity {
    const KIND: EntityKind = EntityKind::Label;

    fn id_column() -> label::Column {
        label::Column::Id
    }
}

/// Fields for a new label; `created_at` defaults to now
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLabel {
    pub name: String,
    pub created_by_user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoActiveModel<label::ActiveModel> for NewLabel {
    fn into_active_model(self) -> label::ActiveModel {
        label::ActiveModel {
            name: Set(self.name),
            created_by_user_id: Set(self.created_by_user_id),
            created_at: Set(self.created_at.unwrap_or_else(Utc::now)),
            ..Default::default()
        }
    }
}

impl<'s> LabelAccessor<'s> {
    /// Ids of the links tagged with the label.
    pub async fn link_ids(&self, label_id: i32) -> StoreResult<Vec<i32>> {
        Ok(link_label::Entity::find()
            .select_only()
            .column(link_label::Column::LinkId)
            .filter(link_label::Column::LabelId.eq(label_id))
            .order_by_asc(link_label::Column::LinkId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }

    /// Ids of the boards using the label as a filter.
    pub async fn board_ids(&self, label_id: i32) -> StoreResult<Vec<i32>> {
        Ok(board_label_filter::Entity::find()
            .select_only()
            .column(board_label_filter::Column::BoardId)
            .filter(board_label_filter::Column::LabelId.eq(label_id))
            .order_by_asc(board_label_filter::Column::BoardId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }
}
