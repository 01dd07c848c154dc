use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    entities::project::{Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Storage contract for projects. Lookups report absence as `None` / `false`;
/// `Err` is reserved for backend failures.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects, optionally restricted to one category, ordered by `(orden, id)`.
    async fn get_all_projects(&self, categoria: Option<String>) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;
    async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: i64, update: UpdateProjectRequest) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn get_all_projects(&self, categoria: Option<String>) -> Result<Vec<Project>, AppError> {
        (**self).get_all_projects(categoria).await
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        (**self).get_project_by_id(id).await
    }

    async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Option<Project>, AppError> {
        (**self).get_project_by_category_and_slug(categoria, slug).await
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        (**self).create_project(project).await
    }

    async fn update_project(&self, id: i64, update: UpdateProjectRequest) -> Result<Option<Project>, AppError> {
        (**self).update_project(id, update).await
    }

    async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        (**self).delete_project(id).await
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn get_all_projects(&self, categoria: Option<String>) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE ($1::TEXT IS NULL OR categoria = $1)
            ORDER BY orden ASC, id ASC
            "#,
        )
        .bind(categoria)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(r#"SELECT * FROM projects WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE categoria = $1 AND slug = $2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(categoria)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        project.validate()?;

        // orden falls back to count + 1 when not supplied
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                titulo, descripcion, categoria, slug, tecnologias,
                github_url, demo_url, orden, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, (SELECT COUNT(*) + 1 FROM projects)), $9)
            RETURNING *
            "#,
        )
        .bind(&project.titulo)
        .bind(&project.descripcion)
        .bind(&project.categoria)
        .bind(&project.slug)
        .bind(&project.tecnologias)
        .bind(&project.github_url)
        .bind(&project.demo_url)
        .bind(project.orden)
        .bind(&project.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_project(&self, id: i64, update: UpdateProjectRequest) -> Result<Option<Project>, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Project>(r#"SELECT * FROM projects WHERE id = $1 FOR UPDATE"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut project) = current else {
            return Ok(None);
        };

        project.apply_update(update);

        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                titulo = $1,
                descripcion = $2,
                categoria = $3,
                slug = $4,
                tecnologias = $5,
                github_url = $6,
                demo_url = $7,
                orden = $8,
                images = $9
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&project.titulo)
        .bind(&project.descripcion)
        .bind(&project.categoria)
        .bind(&project.slug)
        .bind(&project.tecnologias)
        .bind(&project.github_url)
        .bind(&project.demo_url)
        .bind(project.orden)
        .bind(&project.images)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM projects WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
