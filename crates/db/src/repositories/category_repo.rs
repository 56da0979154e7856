//! Repository for the `category_types`, `categories`, and
//! `content_categories` tables.
//!
//! Category resolution is an explicit, idempotent lookup-or-create: the type
//! is found (or created) by code, then the category by its key within that
//! type. Existing rows are never rewritten, so resolving the same reference
//! from many unrelated content rows always yields the same shared rows.

use folio_core::error::CoreError;
use folio_core::naming::{category_language_key, normalize_category_code, normalize_category_name};
use folio_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};
use validator::Validate;

use crate::error::ContentResult;
use crate::models::category::{Category, CategoryInfo, CategoryRef, CategoryType, CreateCategoryType};

/// Column list for `category_types` queries.
const TYPE_COLUMNS: &str = "id, code, name, is_localized, created_at, updated_at";

/// Column list for `categories` queries.
const CATEGORY_COLUMNS: &str = "id, category_type_id, name, language, created_at, updated_at";

/// Column list for categories joined with their type and link position.
const INFO_COLUMNS: &str = "c.id, c.name, c.language, t.code AS type_code, \
    t.name AS type_name, t.is_localized, cc.position";

/// Provides taxonomy management and content-category associations.
pub struct CategoryRepo;

impl CategoryRepo {
    // -----------------------------------------------------------------------
    // Category types
    // -----------------------------------------------------------------------

    /// Create a category type. Fails with a conflict if the code is taken.
    pub async fn create_type(
        pool: &PgPool,
        input: &CreateCategoryType,
    ) -> ContentResult<CategoryType> {
        input.validate()?;
        let code = normalize_category_code(&input.code)?;

        let query = format!(
            "INSERT INTO category_types (code, name, is_localized) \
             VALUES ($1, $2, COALESCE($3, false)) \
             ON CONFLICT (code) DO NOTHING \
             RETURNING {TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, CategoryType>(&query)
            .bind(&code)
            .bind(input.name.trim())
            .bind(input.is_localized)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!("Category type '{code}' already exists")).into()
            })
    }

    /// List all category types ordered by code.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<CategoryType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM category_types ORDER BY code");
        sqlx::query_as::<_, CategoryType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a category type by its (normalized) code.
    pub async fn find_type_by_code<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<CategoryType>, sqlx::Error> {
        let query = format!("SELECT {TYPE_COLUMNS} FROM category_types WHERE code = $1");
        sqlx::query_as::<_, CategoryType>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    /// Delete a category type and its categories.
    ///
    /// Fails with [`CoreError::InUse`] while any content row is linked to one
    /// of the type's categories. Returns `false` if no such type exists.
    pub async fn delete_type(pool: &PgPool, code: &str) -> ContentResult<bool> {
        let code = normalize_category_code(code)?;
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {TYPE_COLUMNS} FROM category_types WHERE code = $1 FOR UPDATE");
        let Some(category_type) = sqlx::query_as::<_, CategoryType>(&query)
            .bind(&code)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(false);
        };

        let in_use: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) \
             FROM content_categories cc \
             JOIN categories c ON c.id = cc.category_id \
             WHERE c.category_type_id = $1",
        )
        .bind(category_type.id)
        .fetch_one(&mut *tx)
        .await?;

        if in_use.0 > 0 {
            return Err(CoreError::InUse(format!(
                "Category type '{code}' is attached to {} content row(s)",
                in_use.0
            ))
            .into());
        }

        sqlx::query("DELETE FROM categories WHERE category_type_id = $1")
            .bind(category_type.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM category_types WHERE id = $1")
            .bind(category_type.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(code = %code, "Category type deleted");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    /// List the categories of a type, optionally restricted to one language.
    pub async fn list_categories(
        pool: &PgPool,
        type_code: &str,
        language: Option<&str>,
    ) -> ContentResult<Vec<Category>> {
        let code = normalize_category_code(type_code)?;
        let query = format!(
            "SELECT {} FROM categories c \
             JOIN category_types t ON t.id = c.category_type_id \
             WHERE t.code = $1 AND ($2::text IS NULL OR c.language = $2) \
             ORDER BY c.name, c.language",
            prefixed(CATEGORY_COLUMNS, "c")
        );
        let categories = sqlx::query_as::<_, Category>(&query)
            .bind(&code)
            .bind(language)
            .fetch_all(pool)
            .await?;
        Ok(categories)
    }

    /// Look up or create the category a reference points to.
    ///
    /// Idempotent: resolving the same reference any number of times returns
    /// the same row and never creates a second type or category.
    pub async fn resolve(
        pool: &PgPool,
        reference: &CategoryRef,
        language: &str,
    ) -> ContentResult<Category> {
        reference.validate()?;
        let normalized = CategoryRef {
            type_code: normalize_category_code(&reference.type_code)?,
            name: normalize_category_name(&reference.name)?,
            type_name: reference.type_name.clone(),
            is_localized: reference.is_localized,
        };

        let mut tx = pool.begin().await?;
        let category = Self::resolve_in(&mut tx, &normalized, language).await?;
        tx.commit().await?;
        Ok(category)
    }

    /// Resolve an already-normalized reference on an open connection.
    pub(crate) async fn resolve_in(
        conn: &mut PgConnection,
        reference: &CategoryRef,
        language: &str,
    ) -> Result<Category, sqlx::Error> {
        let category_type = Self::resolve_type(conn, reference).await?;
        let language_key = category_language_key(category_type.is_localized, language);

        let select = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE category_type_id = $1 AND name = $2 AND language = $3"
        );
        if let Some(existing) = sqlx::query_as::<_, Category>(&select)
            .bind(category_type.id)
            .bind(&reference.name)
            .bind(&language_key)
            .fetch_optional(&mut *conn)
            .await?
        {
            return Ok(existing);
        }

        let insert = format!(
            "INSERT INTO categories (category_type_id, name, language) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (category_type_id, name, language) DO NOTHING \
             RETURNING {CATEGORY_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Category>(&insert)
            .bind(category_type.id)
            .bind(&reference.name)
            .bind(&language_key)
            .fetch_optional(&mut *conn)
            .await?;

        match inserted {
            Some(category) => Ok(category),
            // A concurrent writer created it between our select and insert.
            None => {
                sqlx::query_as::<_, Category>(&select)
                    .bind(category_type.id)
                    .bind(&reference.name)
                    .bind(&language_key)
                    .fetch_one(&mut *conn)
                    .await
            }
        }
    }

    async fn resolve_type(
        conn: &mut PgConnection,
        reference: &CategoryRef,
    ) -> Result<CategoryType, sqlx::Error> {
        if let Some(existing) = Self::find_type_by_code(&mut *conn, &reference.type_code).await? {
            return Ok(existing);
        }

        let insert = format!(
            "INSERT INTO category_types (code, name, is_localized) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (code) DO NOTHING \
             RETURNING {TYPE_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, CategoryType>(&insert)
            .bind(&reference.type_code)
            .bind(
                reference
                    .type_name
                    .as_deref()
                    .unwrap_or(&reference.type_code),
            )
            .bind(reference.is_localized.unwrap_or(false))
            .fetch_optional(&mut *conn)
            .await?;

        match inserted {
            Some(category_type) => Ok(category_type),
            None => Self::find_type_by_code(&mut *conn, &reference.type_code)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    // -----------------------------------------------------------------------
    // Content associations
    // -----------------------------------------------------------------------

    /// Resolve every reference and link it to the content row, preserving
    /// list order.
    pub(crate) async fn attach_all(
        conn: &mut PgConnection,
        content_id: DbId,
        references: &[CategoryRef],
        language: &str,
    ) -> Result<(), sqlx::Error> {
        for (position, reference) in references.iter().enumerate() {
            let category = Self::resolve_in(conn, reference, language).await?;
            sqlx::query(
                "INSERT INTO content_categories (content_id, category_id, position) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (content_id, category_id) DO NOTHING",
            )
            .bind(content_id)
            .bind(category.id)
            .bind(position as i32)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Remove every category link of a content row. Categories themselves
    /// are shared and survive.
    pub(crate) async fn detach_all<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_categories WHERE content_id = $1")
            .bind(content_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Categories linked to a content row, optionally filtered by type code.
    pub async fn list_for_content<'e>(
        executor: impl PgExecutor<'e>,
        content_id: DbId,
        type_code: Option<&str>,
    ) -> Result<Vec<CategoryInfo>, sqlx::Error> {
        let query = format!(
            "SELECT {INFO_COLUMNS} \
             FROM content_categories cc \
             JOIN categories c ON c.id = cc.category_id \
             JOIN category_types t ON t.id = c.category_type_id \
             WHERE cc.content_id = $1 AND ($2::text IS NULL OR t.code = $2) \
             ORDER BY cc.position, c.name"
        );
        sqlx::query_as::<_, CategoryInfo>(&query)
            .bind(content_id)
            .bind(type_code)
            .fetch_all(executor)
            .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Qualify every column in a comma-separated list with a table alias.
fn prefixed(columns: &str, alias: &str) -> String {
    columns
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
