//! Team accessor

use sea_orm::{
    ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use super::{Accessor, Record};
use crate::entities::{team, user};
use crate::error::StoreResult;
use crate::registry::EntityKind;

pub type TeamAccessor<'s> = Accessor<'s, team::Entity>;

impl Record for team::Entity {
    const KIND: EntityKind = EntityKind::Team;

    fn id_column() -> team::Column {
        team::Column::Id
    }
}

/// Fields for a new team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
}

impl IntoActiveModel<team::ActiveModel> for NewTeam {
    fn into_active_model(self) -> team::ActiveModel {
        team::ActiveModel {
            name: Set(self.name),
            ..Default::default()
        }
    }
}

impl<'s> TeamAccessor<'s> {
    /// Ids of the users belonging to the team.
    pub async fn member_ids(&self, team_id: i32) -> StoreResult<Vec<i32>> {
        Ok(user::Entity::find()
            .select_only()
            .column(user::Column::Id)
            .filter(user::Column::TeamId.eq(team_id))
            .order_by_asc(user::Column::Id)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }
}
