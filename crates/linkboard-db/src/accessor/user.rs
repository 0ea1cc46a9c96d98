//! User accessor: credentials, main board and favorite boards

use linkboard_auth::verify_password;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{distinct_ids, replace_association, Accessor, Record};
use crate::entities::{board, user, user_favorite_board};
use crate::error::StoreResult;
use crate::registry::EntityKind;

pub type UserAccessor<'s> = Accessor<'s, user::Entity>;

impl Record for user::Entity {
    const KIND: EntityKind = EntityKind::User;

    fn id_column() -> user::Column {
        user::Column::Id
    }
}

/// Fields for a new user
///
/// `password_hash` must already be an Argon2id PHC string
/// (see [`linkboard_auth::hash_password`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub team_id: Option<i32>,
}

impl IntoActiveModel<user::ActiveModel> for NewUser {
    fn into_active_model(self) -> user::ActiveModel {
        user::ActiveModel {
            name: Set(self.name),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            is_active: Set(self.is_active),
            team_id: Set(self.team_id),
            main_board_id: Set(None),
            ..Default::default()
        }
    }
}

impl<'s> UserAccessor<'s> {
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.session().conn())
            .await?)
    }

    /// Look up a user by email and check the password against the stored hash.
    ///
    /// An unknown email and a wrong password both yield `None`.
    pub async fn authenticate(&self, email: &str, password: &str) -> StoreResult<Option<user::Model>> {
        let Some(user) = self.find_by_email(email).await? else {
            debug!("Authentication failed: unknown email");
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                debug!("Authentication failed for user {}", user.id);
                Ok(None)
            }
            Err(e) => {
                warn!("Stored credential for user {} is unusable: {}", user.id, e);
                Ok(None)
            }
        }
    }

    /// Point the user's main board at `board_id`.
    ///
    /// Returns `None` without touching anything when the user does not exist.
    pub async fn set_main_board(&self, user_id: i32, board_id: i32) -> StoreResult<Option<user::Model>> {
        let Some(user) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let txn = self.session().savepoint().await?;
        let mut active = user.into_active_model();
        active.main_board_id = Set(Some(board_id));
        let user = active.update(&txn).await?;
        txn.commit().await?;

        debug!("User {} main board set to {}", user_id, board_id);
        Ok(Some(user))
    }

    /// Replace the user's favorite boards with exactly `boards`.
    pub async fn set_favorite_boards(
        &self,
        user_id: i32,
        boards: &[board::Model],
    ) -> StoreResult<Option<user::Model>> {
        let Some(user) = self.get_by_id(user_id).await? else {
            return Ok(None);
        };

        let rows = distinct_ids(boards.iter().map(|b| b.id))
            .into_iter()
            .map(|board_id| user_favorite_board::ActiveModel {
                user_id: Set(user_id),
                board_id: Set(board_id),
            })
            .collect();

        let txn = self.session().savepoint().await?;
        replace_association::<user_favorite_board::Entity, _>(
            &txn,
            user_favorite_board::Column::UserId,
            user_id,
            rows,
        )
        .await?;
        txn.commit().await?;

        debug!("User {} favorite boards replaced", user_id);
        Ok(Some(user))
    }

    pub async fn favorite_board_ids(&self, user_id: i32) -> StoreResult<Vec<i32>> {
        Ok(user_favorite_board::Entity::find()
            .select_only()
            .column(user_favorite_board::Column::BoardId)
            .filter(user_favorite_board::Column::UserId.eq(user_id))
            .order_by_asc(user_favorite_board::Column::BoardId)
            .into_tuple::<i32>()
            .all(self.session().conn())
            .await?)
    }

    pub async fn favorite_boards(&self, user: &user::Model) -> StoreResult<Vec<board::Model>> {
        Ok(user
            .find_linked(user::FavoriteBoards)
            .order_by_asc(board::Column::Id)
            .all(self.session().conn())
            .await?)
    }
}
