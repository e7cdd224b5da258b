//! Players, teams, and the Participant wrapper used by brackets.

use serde::{Deserialize, Serialize};

/// Identifier of a player or team (used in match slots and score maps).
pub type ParticipantId = String;

/// A student on the class roster (also a team member).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// An individual competitor.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl Player {
    /// Create a player with no avatar.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

/// A team scored as one unit. Members keep the order they were added in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: ParticipantId,
    pub name: String,
    pub members: Vec<Student>,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<Student>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members,
            color: String::new(),
            avatar: None,
        }
    }
}

/// Either an individual or a team; brackets only care about the id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Participant {
    Individual(Player),
    Team(Team),
}

impl Participant {
    pub fn id(&self) -> &str {
        match self {
            Participant::Individual(p) => &p.id,
            Participant::Team(t) => &t.id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Participant::Individual(p) => &p.name,
            Participant::Team(t) => &t.name,
        }
    }

    /// Teams without their own avatar show their first member's.
    pub fn display_avatar(&self) -> &str {
        match self {
            Participant::Individual(p) => &p.avatar,
            Participant::Team(t) => t
                .avatar
                .as_deref()
                .or_else(|| t.members.first().map(|m| m.avatar.as_str()))
                .unwrap_or(""),
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Participant::Team(_))
    }
}

impl From<Player> for Participant {
    fn from(p: Player) -> Self {
        Participant::Individual(p)
    }
}

impl From<Team> for Participant {
    fn from(t: Team) -> Self {
        Participant::Team(t)
    }
}
