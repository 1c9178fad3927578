use async_trait::async_trait;
use marquee_model::{Actor, ActorId, ActorSummary};
use sqlx::{FromRow, PgPool};
use tracing::info;

use super::rows::ActorRow;
use crate::database::ports::actors::{ActorRepository, NewActor};
use crate::error::{CatalogError, Result};
use crate::query::{PageRequest, Paged};

#[derive(Debug, FromRow)]
struct ActorSummaryRow {
    id: i64,
    name: String,
    image: String,
}

/// PostgreSQL-backed implementation of the `ActorRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresActorRepository {
    pool: PgPool,
}

impl PostgresActorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ActorRepository for PostgresActorRepository {
    async fn list(&self, page: PageRequest) -> Result<Paged<ActorSummary>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actors")
            .fetch_one(self.pool())
            .await?;

        let rows = sqlx::query_as::<_, ActorSummaryRow>(
            r#"
            SELECT id, name, image
            FROM actors
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;

        let items = rows
            .into_iter()
            .map(|row| ActorSummary {
                id: ActorId(row.id),
                name: row.name,
                image: row.image,
            })
            .collect();
        Ok(Paged::new(items, total.max(0) as u64))
    }

    async fn get(&self, id: ActorId) -> Result<Option<Actor>> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, role, description, image
            FROM actors
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool())
        .await?;

        row.map(Actor::try_from).transpose()
    }

    async fn create(&self, actor: NewActor) -> Result<Actor> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            INSERT INTO actors (name, age, role, description, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, age, role, description, image
            "#,
        )
        .bind(&actor.name)
        .bind(actor.age)
        .bind(actor.role.as_str())
        .bind(&actor.description)
        .bind(&actor.image)
        .fetch_one(self.pool())
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to create actor: {}", e)))?;

        let created = Actor::try_from(row)?;
        info!("Created {} {} ({})", created.role, created.name, created.id);
        Ok(created)
    }
}
