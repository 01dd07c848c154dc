use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::option_fields::{OptionField, PatchString, PatchVec};

// ───── Category ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Frontend,
    Uxui,
    Framework,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Frontend, Category::Uxui, Category::Framework];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Uxui => "uxui",
            Category::Framework => "framework",
        }
    }

    /// Message returned to clients when `categoria` is outside the allowed set.
    pub fn invalid_message() -> String {
        let allowed = Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Invalid categoria. Must be one of: {}", allowed)
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend" => Ok(Category::Frontend),
            "uxui" => Ok(Category::Uxui),
            "framework" => Ok(Category::Framework),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ───── Stored model ─────────────────────────────────────────────────

/// Canonical project record, shared by the SQL table and the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub titulo: String,
    pub descripcion: String,
    pub categoria: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tecnologias: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    pub orden: i64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Project {
    /// Builds the stored record for a freshly assigned id and display order.
    pub fn from_insert(id: i64, orden: i64, insert: &ProjectInsert) -> Self {
        Project {
            id,
            titulo: insert.titulo.clone(),
            descripcion: insert.descripcion.clone(),
            categoria: insert.categoria.clone(),
            slug: insert.slug.clone(),
            tecnologias: insert.tecnologias.clone(),
            github_url: insert.github_url.clone(),
            demo_url: insert.demo_url.clone(),
            orden,
            images: insert.images.clone(),
        }
    }

    /// Merges a partial update: provided fields replace, absent fields keep
    /// their prior values. `id` is never touched.
    pub fn apply_update(&mut self, update: UpdateProjectRequest) {
        update.titulo.apply_to(&mut self.titulo);
        update.descripcion.apply_to(&mut self.descripcion);
        update.categoria.apply_to(&mut self.categoria);
        update.slug.apply_to(&mut self.slug);
        update.tecnologias.apply_to(&mut self.tecnologias);
        update.github_url.apply_to_nullable(&mut self.github_url);
        update.demo_url.apply_to_nullable(&mut self.demo_url);
        update.orden.apply_to(&mut self.orden);
        update.images.apply_to(&mut self.images);
    }
}

// ───── Requests ─────────────────────────────────────────────────────

/// Body of `POST /api/projects`. Required fields are optional here so that
/// their absence can be reported with a single readable message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewProjectRequest {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub categoria: Option<String>,
    pub slug: Option<String>,
    pub tecnologias: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub orden: Option<i64>,
    pub images: Option<Vec<String>>,
}

/// Body of `PUT /api/projects/{id}`. Any subset of fields may be sent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "validate_patch_not_blank", message = "titulo cannot be empty"))]
    pub titulo: PatchString,

    #[validate(custom(function = "validate_patch_not_blank", message = "descripcion cannot be empty"))]
    pub descripcion: PatchString,

    pub categoria: PatchString,

    #[validate(custom(function = "validate_patch_slug"))]
    pub slug: PatchString,

    pub tecnologias: PatchVec<String>,
    pub github_url: PatchString,
    pub demo_url: PatchString,
    pub orden: OptionField<i64>,
    pub images: PatchVec<String>,
}

impl UpdateProjectRequest {
    /// Names of non-nullable fields that were explicitly sent as `null`.
    pub fn null_required_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("titulo", self.titulo.is_set_to_null()),
            ("descripcion", self.descripcion.is_set_to_null()),
            ("categoria", self.categoria.is_set_to_null()),
            ("slug", self.slug.is_set_to_null()),
            ("tecnologias", self.tecnologias.is_set_to_null()),
            ("orden", self.orden.is_set_to_null()),
            ("images", self.images.is_set_to_null()),
        ];

        checks
            .into_iter()
            .filter_map(|(name, is_null)| is_null.then_some(name))
            .collect()
    }
}

// ───── Insert model ─────────────────────────────────────────────────

/// Validated, defaulted payload handed to a `ProjectRepository`.
/// `orden` stays optional because only the store knows the current count.
#[derive(Debug, Clone, Validate)]
pub struct ProjectInsert {
    #[validate(custom(function = "validate_not_blank", message = "titulo is required"))]
    pub titulo: String,

    #[validate(custom(function = "validate_not_blank", message = "descripcion is required"))]
    pub descripcion: String,

    #[validate(length(min = 1, message = "categoria is required"))]
    pub categoria: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    pub tecnologias: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub orden: Option<i64>,
    pub images: Vec<String>,
}

impl ProjectInsert {
    /// Applies creation defaults: blank slug → slugified title, empty URLs →
    /// absent, `orden` of 0 → assigned by the store. Provided values are kept verbatim.
    pub fn from_request(
        request: NewProjectRequest,
        titulo: String,
        descripcion: String,
        categoria: String,
    ) -> Self {
        let slug = request
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slug::slugify(&titulo));

        ProjectInsert {
            titulo,
            descripcion,
            categoria,
            slug,
            tecnologias: request.tecnologias.unwrap_or_default(),
            github_url: request.github_url.filter(|u| !u.is_empty()),
            demo_url: request.demo_url.filter(|u| !u.is_empty()),
            orden: request.orden.filter(|o| *o != 0),
            images: request.images.unwrap_or_default(),
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.trim().is_empty() || slug.contains('/') {
        let mut err = ValidationError::new("invalid_slug");
        err.message = Some(Cow::Borrowed("slug must be non-empty and cannot contain '/'"));
        return Err(err);
    }
    Ok(())
}

// Patch variants: only a provided value is checked.

fn validate_patch_not_blank(value: &PatchString) -> Result<(), ValidationError> {
    value.value_ref().map_or(Ok(()), |v| validate_not_blank(v))
}

fn validate_patch_slug(slug: &PatchString) -> Result<(), ValidationError> {
    slug.value_ref().map_or(Ok(()), |s| validate_slug(s))
}
