// SPDX-License-Identifier: MPL-2.0
//! Forum roles, mirroring the server's role ids.

use crate::i18n::Label;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Role {
    #[default]
    User,
    Professor,
    Moderator,
    Administrator,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::User,
        Role::Professor,
        Role::Moderator,
        Role::Administrator,
    ];

    /// Server-side role id.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Professor => 2,
            Role::Moderator => 3,
            Role::Administrator => 4,
        }
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    /// Stable lowercase name, used as a Fluent selector.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Professor => "professor",
            Role::Moderator => "moderator",
            Role::Administrator => "administrator",
        }
    }

    #[must_use]
    pub fn label(self) -> Label {
        Label::key(match self {
            Role::User => "role-user",
            Role::Professor => "role-professor",
            Role::Moderator => "role-moderator",
            Role::Administrator => "role-administrator",
        })
    }

    /// Roles a user holding `self` can be moved to.
    pub fn alternatives(self) -> impl Iterator<Item = Role> {
        Self::ALL.into_iter().filter(move |role| *role != self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts either a role id (`"3"`) or a role name (`"moderator"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id).ok_or_else(|| format!("unknown role id {id}"));
        }
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown role {s:?}"))
    }
}
