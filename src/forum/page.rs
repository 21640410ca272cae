// SPDX-License-Identifier: MPL-2.0
//! Typed model of the forum page the client acts on.
//!
//! Handlers never touch this directly: they send [`PagePatch`]es through the
//! UI bridge and the application applies them on the UI thread.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Post,
    Comment,
    User,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Post, ItemKind::Comment, ItemKind::User];

    /// Value sent as the `type` form field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Post => "post",
            ItemKind::Comment => "comment",
            ItemKind::User => "user",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post, comment or user mounted on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: u64,
}

impl ItemRef {
    #[must_use]
    pub fn new(kind: ItemKind, id: u64) -> Self {
        Self { kind, id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Like,
    Dislike,
}

impl VoteKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VoteKind::Like => "like",
            VoteKind::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    Post,
    Comment,
}

impl VoteTarget {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VoteTarget::Post => "post",
            VoteTarget::Comment => "comment",
        }
    }

    #[must_use]
    pub fn item(self, id: u64) -> ItemRef {
        let kind = match self {
            VoteTarget::Post => ItemKind::Post,
            VoteTarget::Comment => ItemKind::Comment,
        };
        ItemRef::new(kind, id)
    }
}

/// One entry of the `/api/search` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: String,
}

/// Contents of the search-results region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No search has completed yet.
    #[default]
    Idle,
    /// The last search matched nothing.
    NoResults,
    Results(Vec<SearchResult>),
}

/// Page mutation requested by an action handler.
#[derive(Debug, Clone, PartialEq)]
pub enum PagePatch {
    /// Marks `vote` active on the target and its sibling inactive.
    SetVote {
        target: VoteTarget,
        id: u64,
        vote: VoteKind,
    },
    RemoveItem(ItemRef),
    /// Replaces the search region; an empty list shows the "no results" state.
    SearchResults(Vec<SearchResult>),
    LoggedIn(bool),
    /// Fetch the current view again.
    Reload,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    logged_in: bool,
    items: Vec<ItemRef>,
    votes: HashMap<(VoteTarget, u64), VoteKind>,
    search: SearchState,
    reloads: u64,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, patch: PagePatch) {
        match patch {
            PagePatch::SetVote { target, id, vote } => {
                self.mount(target.item(id));
                self.votes.insert((target, id), vote);
            }
            PagePatch::RemoveItem(item) => {
                self.items.retain(|mounted| *mounted != item);
                if let Some(target) = match item.kind {
                    ItemKind::Post => Some(VoteTarget::Post),
                    ItemKind::Comment => Some(VoteTarget::Comment),
                    ItemKind::User => None,
                } {
                    self.votes.remove(&(target, item.id));
                }
                if let SearchState::Results(results) = &mut self.search {
                    if item.kind == ItemKind::Post {
                        results.retain(|result| result.id != item.id);
                    }
                }
            }
            PagePatch::SearchResults(results) => {
                for result in &results {
                    self.mount(ItemRef::new(ItemKind::Post, result.id));
                }
                self.search = if results.is_empty() {
                    SearchState::NoResults
                } else {
                    SearchState::Results(results)
                };
            }
            PagePatch::LoggedIn(logged_in) => self.logged_in = logged_in,
            PagePatch::Reload => self.reloads += 1,
        }
    }

    /// Adds an item to the page if it is not already mounted.
    pub fn mount(&mut self, item: ItemRef) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    #[must_use]
    pub fn contains(&self, item: ItemRef) -> bool {
        self.items.contains(&item)
    }

    pub fn items(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub fn active_vote(&self, target: VoteTarget, id: u64) -> Option<VoteKind> {
        self.votes.get(&(target, id)).copied()
    }

    #[must_use]
    pub fn is_vote_active(&self, target: VoteTarget, id: u64, vote: VoteKind) -> bool {
        self.active_vote(target, id) == Some(vote)
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn reloads(&self) -> u64 {
        self.reloads
    }
}
