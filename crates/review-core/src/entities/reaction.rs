//! Reaction kinds and the per-comment reaction ledger

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// The closed set of reactions a comment accepts.
///
/// On the wire each kind is its emoji glyph; the plain word is accepted on
/// input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReactionKind {
    #[serde(rename = "👍", alias = "like")]
    Like,
    #[serde(rename = "❤️", alias = "love", alias = "❤")]
    Love,
    #[serde(rename = "😂", alias = "laugh")]
    Laugh,
}

impl ReactionKind {
    pub const ALL: [Self; 3] = [Self::Like, Self::Love, Self::Laugh];

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Laugh => "😂",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "👍" | "like" => Ok(Self::Like),
            "❤️" | "❤" | "love" => Ok(Self::Love),
            "😂" | "laugh" => Ok(Self::Laugh),
            other => Err(DomainError::InvalidReactionKind(other.to_string())),
        }
    }
}

/// Result of toggling a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionToggle {
    Added,
    Removed,
}

impl ReactionToggle {
    #[inline]
    pub fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Number of users holding each reaction kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionCounts {
    pub like: usize,
    pub love: usize,
    pub laugh: usize,
}

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> usize {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Laugh => self.laugh,
        }
    }

    pub fn total(&self) -> usize {
        self.like + self.love + self.laugh
    }
}

/// Who reacted with what on one comment.
///
/// A user sits in at most one kind's set at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionLedger {
    like: BTreeSet<Snowflake>,
    love: BTreeSet<Snowflake>,
    laugh: BTreeSet<Snowflake>,
}

impl ReactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored `(kind, user)` pairs.
    ///
    /// A user listed under several kinds keeps only the last one seen, so a
    /// ledger loaded from an inconsistent document is repaired rather than
    /// rejected.
    pub fn from_entries(entries: impl IntoIterator<Item = (ReactionKind, Snowflake)>) -> Self {
        let mut ledger = Self::default();
        for (kind, user) in entries {
            ledger.evict(user);
            ledger.users_mut(kind).insert(user);
        }
        ledger
    }

    /// Add `user` under `kind`, or remove it if it is already there.
    ///
    /// Adding evicts the user from every other kind first.
    pub fn toggle(&mut self, user: Snowflake, kind: ReactionKind) -> ReactionToggle {
        if self.users_mut(kind).remove(&user) {
            return ReactionToggle::Removed;
        }
        self.evict(user);
        self.users_mut(kind).insert(user);
        ReactionToggle::Added
    }

    pub fn count_for(&self, kind: ReactionKind) -> usize {
        self.users(kind).len()
    }

    pub fn has_reacted(&self, user: Snowflake, kind: ReactionKind) -> bool {
        self.users(kind).contains(&user)
    }

    /// The one kind `user` currently holds, if any.
    pub fn reaction_of(&self, user: Snowflake) -> Option<ReactionKind> {
        ReactionKind::ALL
            .into_iter()
            .find(|kind| self.has_reacted(user, *kind))
    }

    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            like: self.like.len(),
            love: self.love.len(),
            laugh: self.laugh.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }

    pub fn users(&self, kind: ReactionKind) -> &BTreeSet<Snowflake> {
        match kind {
            ReactionKind::Like => &self.like,
            ReactionKind::Love => &self.love,
            ReactionKind::Laugh => &self.laugh,
        }
    }

    fn users_mut(&mut self, kind: ReactionKind) -> &mut BTreeSet<Snowflake> {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Laugh => &mut self.laugh,
        }
    }

    fn evict(&mut self, user: Snowflake) {
        for kind in ReactionKind::ALL {
            self.users_mut(kind).remove(&user);
        }
    }
}
