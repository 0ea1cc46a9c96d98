//! Request-scoped unit of work
//!
//! A [`Session`] owns one database transaction for the lifetime of an inbound
//! request. Every accessor handed out by [`Session::accessors`] runs against
//! that transaction, so a cross-entity operation (resolve labels, then attach
//! them to a board) is one unit of work.
//!
//! Mutating accessor operations open a nested transaction (a savepoint) and
//! commit it before returning: their effect is all-or-nothing and visible to
//! the rest of the request, while the outer [`Session::commit`] makes it
//! durable. A session dropped without `commit` is rolled back.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;

use crate::error::StoreResult;
use crate::registry::Accessors;

pub struct Session {
    txn: DatabaseTransaction,
}

impl Session {
    /// Open a new unit of work on the connection pool.
    pub async fn begin(db: &DatabaseConnection) -> StoreResult<Self> {
        let txn = db.begin().await?;
        debug!("Session opened");
        Ok(Self { txn })
    }

    /// Make every change since [`Session::begin`] durable and close the session.
    pub async fn commit(self) -> StoreResult<()> {
        self.txn.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    /// Discard every change since [`Session::begin`] and close the session.
    pub async fn rollback(self) -> StoreResult<()> {
        self.txn.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }

    /// Accessor registry bound to this session.
    pub fn accessors(&self) -> Accessors<'_> {
        Accessors::new(self)
    }

    pub(crate) fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Nested transaction for one mutating operation.
    pub(crate) async fn savepoint(&self) -> StoreResult<DatabaseTransaction> {
        Ok(self.txn.begin().await?)
    }
}
