use async_trait::async_trait;
use marquee_model::{Actor, ActorId, ActorRole, ActorSummary};

use crate::error::Result;
use crate::query::{PageRequest, Paged};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub age: i16,
    pub role: ActorRole,
    pub description: String,
    pub image: String,
}

#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Summaries of every actor and director, ordered by id.
    async fn list(&self, page: PageRequest) -> Result<Paged<ActorSummary>>;

    async fn get(&self, id: ActorId) -> Result<Option<Actor>>;

    async fn create(&self, actor: NewActor) -> Result<Actor>;
}
