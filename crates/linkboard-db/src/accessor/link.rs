//! Link accessor

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{distinct_ids, replace_association, Accessor, Record};
use crate::entities::{label, link, link_label};
use crate::error::StoreResult;
use crate::registry::EntityKind;

pub type LinkAccessor<'s> = Accessor<'s, link::Entity>;

impl Record for link::Entity {
    const KIND: EntityKind = EntityKind::Link;

    fn id_column() -> link::Column {
        link::Column::Id
    }
}

/// Fields for a new link; `created_at` defaults to now
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLink {
    pub icon_url: String,
    pub url: String,
    pub created_by_user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoActiveModel<link::ActiveModel> for NewLink {
    fn into_active_model(self) -> link::ActiveModel {
        link::ActiveModel {
            icon_url: Set(self.icon_url),
            url: Set(self.url),
            created_by_user_id: Set(self.created_by_user_id),
            created_at: Set(self.created_at.unwrap_or_else(Utc::now)),
            ..Default::default()
        }
    }
}

impl<'s> LinkAccessor<'s> {
    /// Replace the labels attached to the link with exactly `labels`.
    ///
    /// Returns `None` without touching anything when the link does not exist.
    pub async fn set_labels(
        &self,
        link_id: i32,
        labels: &[label::Model],
    ) -> StoreResult<Option<link::Model>> {
        let Some(link) = self.get_by_id(link_id).await? else {
            return Ok(None);
        };

        let rows = distinct_ids(labels.iter().map(|l| l.id))
            .into_iter()
            .map(|label_id| link_label::ActiveModel {
                link_id: Set(link_id),
                label_id: Set(label_id),
            })
            .collect();

        let txn = self.session().savepoint().await?;
        replace_association::<link_label::Entity, _>(
            &txn,
            link_label::Column::LinkId,
            link_id,
            rows,
        )
        .await?;
        txn.commit().await?;

        debug!("Link {} labels replaced", link_id);
        Ok(Some(link))
    }

    pub async fn label_ids(&self, link_id: i32) -> StoreResult<Vec<i32>> {
        Ok(link_label::Entity::find()
            .select_only()
            .column(link_label::Column::LabelId)
            .filter(link_label::Column::LinkId.eq(link_id))
            .order_by_asc(link_label::Column::LabelId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }

    pub async fn labels(&self, link: &link::Model) -> StoreResult<Vec<label::Model>> {
        Ok(link
            .find_related(label::Entity)
            .order_by_asc(label::Column::Id)
            .all(self.session().conn())
            .await?)
    }
}
