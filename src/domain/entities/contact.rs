use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::email::validate_email_format;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewContactRequest {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub mensaje: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct ContactInsert {
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,

    #[validate(custom(function = "validate_email_format"))]
    pub email: String,

    #[validate(length(min = 1, message = "mensaje is required"))]
    pub mensaje: String,
}

/// A stored contact message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub mensaje: String,
    pub fecha_creacion: DateTime<Utc>,
}

impl Contact {
    pub fn from_insert(id: i64, fecha_creacion: DateTime<Utc>, insert: &ContactInsert) -> Self {
        Contact {
            id,
            nombre: insert.nombre.clone(),
            email: insert.email.clone(),
            mensaje: insert.mensaje.clone(),
            fecha_creacion,
        }
    }
}
