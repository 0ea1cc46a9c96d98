//! Board accessor

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{distinct_ids, replace_association, Accessor, Record};
use crate::entities::{board, board_label_filter, label, user_favorite_board};
use crate::error::StoreResult;
use crate::registry::EntityKind;

pub type BoardAccessor<'s> = Accessor<'s, board::Entity>;

impl Record for board::Entity {
    const KIND: EntityKind = EntityKind::Board;

    fn id_column() -> board::Column {
        board::Column::Id
    }
}

/// Fields for a new board; missing timestamps default to now
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBoard {
    pub name: String,
    pub description: String,
    pub created_by_user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl IntoActiveModel<board::ActiveModel> for NewBoard {
    fn into_active_model(self) -> board::ActiveModel {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        board::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            created_by_user_id: Set(self.created_by_user_id),
            created_at: Set(created_at),
            updated_at: Set(self.updated_at.unwrap_or(created_at)),
            ..Default::default()
        }
    }
}

impl<'s> BoardAccessor<'s> {
    /// Replace the board's label filters with exactly `labels`.
    ///
    /// Also bumps `updated_at`. Returns `None` without touching anything when
    /// the board does not exist.
    pub async fn set_labels_filters(
        &self,
        board_id: i32,
        labels: &[label::Model],
    ) -> StoreResult<Option<board::Model>> {
        let Some(board) = self.get_by_id(board_id).await? else {
            return Ok(None);
        };

        let rows = distinct_ids(labels.iter().map(|l| l.id))
            .into_iter()
            .map(|label_id| board_label_filter::ActiveModel {
                board_id: Set(board_id),
                label_id: Set(label_id),
            })
            .collect();

        let txn = self.session().savepoint().await?;
        replace_association::<board_label_filter::Entity, _>(
            &txn,
            board_label_filter::Column::BoardId,
            board_id,
            rows,
        )
        .await?;
        // updated_at is refreshed by the entity's before_save hook
        let board = board.into_active_model().update(&txn).await?;
        txn.commit().await?;

        debug!("Board {} label filters replaced", board_id);
        Ok(Some(board))
    }

    pub async fn label_filter_ids(&self, board_id: i32) -> StoreResult<Vec<i32>> {
        Ok(board_label_filter::Entity::find()
            .select_only()
            .column(board_label_filter::Column::LabelId)
            .filter(board_label_filter::Column::BoardId.eq(board_id))
            .order_by_asc(board_label_filter::Column::LabelId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }

    /// Ids of the users who marked the board as favorite.
    pub async fn favorited_by_ids(&self, board_id: i32) -> StoreResult<Vec<i32>> {
        Ok(user_favorite_board::Entity::find()
            .select_only()
            .column(user_favorite_board::Column::UserId)
            .filter(user_favorite_board::Column::BoardId.eq(board_id))
            .order_by_asc(user_favorite_board::Column::UserId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }
}
