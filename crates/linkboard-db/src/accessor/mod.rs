//! Entity accessors
//!
//! [`Accessor`] is the uniform operation surface for one entity type, bound to
//! a [`Session`]. The generic operations live here; entity-specific
//! relationship operations are inherent impls in the per-entity modules.
//!
//! Relationship collections are never handed out for mutation. Every
//! `set_*` operation resolves, clears and repopulates the association inside
//! a single savepoint (replace, never merge).

use std::collections::BTreeSet;
use std::marker::PhantomData;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::error::StoreResult;
use crate::registry::EntityKind;
use crate::resolver;
use crate::session::Session;

pub mod board;
pub mod label;
pub mod link;
pub mod team;
pub mod user;

pub use board::{BoardAccessor, NewBoard};
pub use label::{LabelAccessor, NewLabel};
pub use link::{LinkAccessor, NewLink};
pub use team::{NewTeam, TeamAccessor};
pub use user::{NewUser, UserAccessor};

/// An entity with an integer surrogate key managed by an [`Accessor`].
pub trait Record: EntityTrait {
    const KIND: EntityKind;

    fn id_column() -> Self::Column;
}

pub struct Accessor<'s, E> {
    session: &'s Session,
    entity: PhantomData<fn() -> E>,
}

impl<'s, E: Record> Accessor<'s, E> {
    pub(crate) fn new(session: &'s Session) -> Self {
        Self {
            session,
            entity: PhantomData,
        }
    }

    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    /// All rows, ordered by id.
    pub async fn list_all(&self) -> StoreResult<Vec<E::Model>> {
        Ok(E::find()
            .order_by_asc(E::id_column())
            .all(self.session.conn())
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> StoreResult<Option<E::Model>> {
        Ok(E::find()
            .filter(E::id_column().eq(id))
            .one(self.session.conn())
            .await?)
    }

    /// Rows whose id is in `ids`; unknown ids are dropped.
    pub async fn filter_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<E::Model>> {
        resolver::resolve::<E, _>(self.session.conn(), ids).await
    }

    pub async fn count(&self) -> StoreResult<u64>
    where
        E::Model: Sync,
    {
        Ok(E::find().count(self.session.conn()).await?)
    }

    /// Insert a new row and return it with its assigned id and defaults.
    pub async fn create<F>(&self, fields: F) -> StoreResult<E::Model>
    where
        F: IntoActiveModel<E::ActiveModel>,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        let txn = self.session.savepoint().await?;
        let model = fields.into_active_model().insert(&txn).await?;
        txn.commit().await?;

        debug!("Created {} row", E::KIND);
        Ok(model)
    }

    pub(crate) fn session(&self) -> &'s Session {
        self.session
    }
}

/// Distinct ids in ascending order.
pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Clear every association row owned by `owner_id`, then insert `rows`.
pub(crate) async fn replace_association<J, C>(
    conn: &C,
    owner: J::Column,
    owner_id: i32,
    rows: Vec<J::ActiveModel>,
) -> StoreResult<()>
where
    J: EntityTrait,
    J::Model: IntoActiveModel<J::ActiveModel>,
    C: ConnectionTrait,
{
    J::delete_many()
        .filter(owner.eq(owner_id))
        .exec(conn)
        .await?;

    if !rows.is_empty() {
        J::insert_many(rows).exec_without_returning(conn).await?;
    }

    Ok(())
}
