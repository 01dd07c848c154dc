use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::contact::{Contact, ContactInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Stores a message and returns the backend-assigned id.
    async fn create_contact(&self, contact: &ContactInsert) -> Result<i64, AppError>;
    /// Newest first.
    async fn get_all_contacts(&self) -> Result<Vec<Contact>, AppError>;
    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>, AppError>;
    async fn delete_contact(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
impl<T> ContactRepository for Arc<T>
where
    T: ContactRepository + ?Sized,
{
    async fn create_contact(&self, contact: &ContactInsert) -> Result<i64, AppError> {
        (**self).create_contact(contact).await
    }

    async fn get_all_contacts(&self) -> Result<Vec<Contact>, AppError> {
        (**self).get_all_contacts().await
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>, AppError> {
        (**self).get_contact_by_id(id).await
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, AppError> {
        (**self).delete_contact(id).await
    }
}

impl SqlxContactRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO contactos (nombre, email, mensaje)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&contact.nombre)
        .bind(&contact.email)
        .bind(&contact.mensaje)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_all_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"SELECT * FROM contactos ORDER BY fecha_creacion DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>, AppError> {
        let contact = sqlx::query_as::<_, Contact>(r#"SELECT * FROM contactos WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM contactos WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
