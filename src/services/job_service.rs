use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::JobListQuery;
use crate::error::{Error, Result};
use crate::models::job::{Job, JOB_STATUS_CLOSED, JOB_STATUS_OPEN};

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

pub struct NewJob<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub categories: &'a [String],
    pub budget: Decimal,
    pub timeline: &'a str,
    pub requirement_doc_key: Option<&'a str>,
    pub company_id: Uuid,
    pub created_by: Uuid,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewJob<'_>) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, description, categories, budget, timeline, requirement_doc_key, company_id, created_by, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.categories)
        .bind(new.budget)
        .bind(new.timeline)
        .bind(new.requirement_doc_key)
        .bind(new.company_id)
        .bind(new.created_by)
        .bind(JOB_STATUS_OPEN)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            filters.push(format!("status = ${}", args.len() + 1));
            args.push(status);
        }
        if let Some(category) = query.category {
            filters.push(format!("${} = ANY(categories)", args.len() + 1));
            args.push(category);
        }
        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(title ILIKE ${} OR description ILIKE ${})",
                first, second
            ));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search));
        }

        let where_clause = if filters.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };

        let items_query = format!(
            "SELECT * FROM jobs {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub async fn close(&self, id: Uuid, caller: Uuid) -> Result<Job> {
        let job = self.get_by_id(id).await?;
        if job.company_id != caller && job.created_by != caller {
            return Err(Error::Forbidden("Only the job owner can close it".into()));
        }
        if job.status == JOB_STATUS_CLOSED {
            return Err(Error::Conflict("Job is already closed".into()));
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(JOB_STATUS_CLOSED)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }
}
