use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{AgencyListQuery, RegisterPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::user::{User, ROLE_AGENCY, ROLE_BRAND};
use crate::utils::crypto;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

pub struct AgencyList {
    pub items: Vec<User>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        if payload.role != ROLE_BRAND && payload.role != ROLE_AGENCY {
            return Err(Error::BadRequest(format!(
                "Unknown role \"{}\"",
                payload.role
            )));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, company_name)
            VALUES ($1, LOWER($2), $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.role)
        .bind(&payload.company_name)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or_else(|| Error::Conflict("An account with this email already exists".into()))
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = LOWER($1) AND is_active",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".into()))?;

        let ok = crypto::verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid email or password".into()));
        }
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                company_name = COALESCE($3, company_name),
                location = COALESCE($4, location),
                website = COALESCE($5, website),
                about = COALESCE($6, about),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.company_name)
        .bind(&payload.location)
        .bind(&payload.website)
        .bind(&payload.about)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| Error::NotFound("User not found".into()))
    }

    pub async fn set_logo_key(&self, id: Uuid, key: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET logo_key = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| Error::NotFound("User not found".into()))
    }

    pub async fn list_agencies(&self, query: AgencyListQuery) -> Result<AgencyList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        let search = query.search.map(|s| format!("%{}%", s));

        let items = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = $1 AND is_active
              AND ($2::text IS NULL OR name ILIKE $2 OR company_name ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(ROLE_AGENCY)
        .bind(&search)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE role = $1 AND is_active
              AND ($2::text IS NULL OR name ILIKE $2 OR company_name ILIKE $2)
            "#,
        )
        .bind(ROLE_AGENCY)
        .bind(&search)
        .fetch_one(&self.pool)
        .await?;

        Ok(AgencyList {
            items,
            total,
            page,
            per_page,
        })
    }
}
