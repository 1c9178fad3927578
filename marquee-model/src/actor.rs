use std::{fmt, str::FromStr};

use crate::error::ModelError;
use crate::ids::ActorId;

/// Role tag carried by a person record. Actors and directors share one
/// collection; the tag is informational and never hides a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ActorRole {
    #[default]
    Actor,
    Director,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Actor => "actor",
            ActorRole::Director => "director",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actor" => Ok(ActorRole::Actor),
            "director" => Ok(ActorRole::Director),
            other => Err(ModelError::UnknownActorRole(other.to_string())),
        }
    }
}

/// Full actor/director record as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub age: i16,
    pub role: ActorRole,
    pub description: String,
    pub image: String,
}

/// Compact listing shape: `{id, name, image}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSummary {
    pub id: ActorId,
    pub name: String,
    pub image: String,
}

impl From<&Actor> for ActorSummary {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name.clone(),
            image: actor.image.clone(),
        }
    }
}
