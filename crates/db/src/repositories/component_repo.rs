//! Repository for the `components` table.

use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::component::{Component, ComponentInput};

/// Column list for `components` queries.
const COLUMNS: &str = "id, content_id, position, component_type, props, created_at";

/// Provides persistence for the ordered blocks of a content row.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert components for a content row. Position is the list index.
    pub async fn insert_all(
        conn: &mut PgConnection,
        content_id: DbId,
        inputs: &[ComponentInput],
    ) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!(
            "INSERT INTO components (content_id, position, component_type, props) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let mut components = Vec::with_capacity(inputs.len());
        for (position, input) in inputs.iter().enumerate() {
            let component = sqlx::query_as::<_, Component>(&query)
                .bind(content_id)
                .bind(position as i32)
                .bind(&input.component_type)
                .bind(&input.props)
                .fetch_one(&mut *conn)
                .await?;
            components.push(component);
        }
        Ok(components)
    }

    /// Replace every component of a content row.
    pub async fn replace_all(
        conn: &mut PgConnection,
        content_id: DbId,
        inputs: &[ComponentInput],
    ) -> Result<Vec<Component>, sqlx::Error> {
        sqlx::query("DELETE FROM components WHERE content_id = $1")
            .bind(content_id)
            .execute(&mut *conn)
            .await?;
        Self::insert_all(conn, content_id, inputs).await
    }

    /// Components of a content row in display order.
    pub async fn list_for_content<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
    ) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM components WHERE content_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(content_id)
            .fetch_all(executor)
            .await
    }
}
