//! Relationship resolution
//!
//! Turns a list of identifiers into the matching rows of one entity type.
//! Identifiers with no row are silently dropped and duplicates collapse to a
//! single row, so callers replacing an association may end up with fewer
//! members than they asked for.

use sea_orm::{ColumnTrait, ConnectionTrait, QueryFilter, QueryOrder};
use tracing::debug;

use crate::accessor::{distinct_ids, Record};
use crate::error::StoreResult;

pub(crate) async fn resolve<E, C>(conn: &C, ids: &[i32]) -> StoreResult<Vec<E::Model>>
where
    E: Record,
    C: ConnectionTrait,
{
    let wanted = distinct_ids(ids.iter().copied());
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let found = E::find()
        .filter(E::id_column().is_in(wanted.iter().copied()))
        .order_by_asc(E::id_column())
        .all(conn)
        .await?;

    if found.len() < wanted.len() {
        debug!(
            "Resolved {} of {} requested {} ids",
            found.len(),
            wanted.len(),
            E::KIND
        );
    }

    Ok(found)
}
