//! Accessor registry
//!
//! Binds one [`Session`] to an accessor per entity type. The set of entity
//! types is closed, so lookup by kind is a plain `match` over [`EntityKind`]
//! rather than a name-based search.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::accessor::{BoardAccessor, LabelAccessor, LinkAccessor, TeamAccessor, UserAccessor};
use crate::error::StoreResult;
use crate::session::Session;

/// Every entity type with an accessor, tagged by its table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Team,
    User,
    Link,
    Label,
    Board,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Team,
        EntityKind::User,
        EntityKind::Link,
        EntityKind::Label,
        EntityKind::Board,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Team => "teams",
            EntityKind::User => "users",
            EntityKind::Link => "links",
            EntityKind::Label => "labels",
            EntityKind::Board => "boards",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown entity table: {0}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.table_name() == s)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

/// Accessors for every entity type, all sharing one session.
#[derive(Clone, Copy)]
pub struct Accessors<'s> {
    session: &'s Session,
}

impl<'s> Accessors<'s> {
    pub(crate) fn new(session: &'s Session) -> Self {
        Self { session }
    }

    pub fn teams(&self) -> TeamAccessor<'s> {
        TeamAccessor::new(self.session)
    }

    pub fn users(&self) -> UserAccessor<'s> {
        UserAccessor::new(self.session)
    }

    pub fn links(&self) -> LinkAccessor<'s> {
        LinkAccessor::new(self.session)
    }

    pub fn labels(&self) -> LabelAccessor<'s> {
        LabelAccessor::new(self.session)
    }

    pub fn boards(&self) -> BoardAccessor<'s> {
        BoardAccessor::new(self.session)
    }

    pub fn get(&self, kind: EntityKind) -> AnyAccessor<'s> {
        match kind {
            EntityKind::Team => AnyAccessor::Team(self.teams()),
            EntityKind::User => AnyAccessor::User(self.users()),
            EntityKind::Link => AnyAccessor::Link(self.links()),
            EntityKind::Label => AnyAccessor::Label(self.labels()),
            EntityKind::Board => AnyAccessor::Board(self.boards()),
        }
    }

    /// One accessor per requested kind, in request order.
    pub fn for_kinds(&self, kinds: &[EntityKind]) -> Vec<AnyAccessor<'s>> {
        kinds.iter().map(|kind| self.get(*kind)).collect()
    }
}

/// An accessor selected at runtime by [`EntityKind`].
pub enum AnyAccessor<'s> {
    Team(TeamAccessor<'s>),
    User(UserAccessor<'s>),
    Link(LinkAccessor<'s>),
    Label(LabelAccessor<'s>),
    Board(BoardAccessor<'s>),
}

impl AnyAccessor<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyAccessor::Team(a) => a.kind(),
            AnyAccessor::User(a) => a.kind(),
            AnyAccessor::Link(a) => a.kind(),
            AnyAccessor::Label(a) => a.kind(),
            AnyAccessor::Board(a) => a.kind(),
        }
    }

    pub async fn count(&self) -> StoreResult<u64> {
        match self {
            AnyAccessor::Team(a) => a.count().await,
            AnyAccessor::User(a) => a.count().await,
            AnyAccessor::Link(a) => a.count().await,
            AnyAccessor::Label(a) => a.count().await,
            AnyAccessor::Board(a) => a.count().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.table_name().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_table_name() {
        let err = "bookmarks".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, UnknownEntityKind("bookmarks".to_string()));
        assert_eq!(err.to_string(), "unknown entity table: bookmarks");

        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_display_uses_table_name() {
        assert_eq!(EntityKind::Board.to_string(), "boards");
        assert_eq!(EntityKind::Team.to_string(), "teams");
    }
}
