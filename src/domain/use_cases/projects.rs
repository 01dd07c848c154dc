use tracing::{error, warn};
use validator::Validate;

use crate::{
    entities::project::{Category, NewProjectRequest, Project, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::parse_id::parse_id,
};

const PROJECT_NOT_FOUND: &str = "Project not found";

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Lists projects, optionally filtered by category. A blank filter means no filter.
    pub async fn list_projects(&self, categoria: Option<&str>) -> Result<Vec<Project>, AppError> {
        let categoria = categoria
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        self.project_repo
            .get_all_projects(categoria.clone())
            .await
            .inspect_err(|e| error!(operation = "list_projects", ?categoria, error = %e, "Failed to list projects"))
    }

    /// Retrieves a project by its id. Unparseable ids are treated as unknown.
    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let Some(valid_id) = parse_id(id) else {
            warn!(operation = "get_project_by_id", id, "Non-numeric project id");
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        };

        self.project_repo
            .get_project_by_id(valid_id)
            .await
            .inspect_err(|e| error!(operation = "get_project_by_id", id = valid_id, error = %e, "Failed to fetch project"))?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    pub async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_category_and_slug(categoria, slug)
            .await
            .inspect_err(|e| error!(operation = "get_project_by_category_and_slug", categoria, slug, error = %e, "Failed to fetch project"))?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    /// Validates required fields and the category, applies defaults and stores the project.
    /// Provided values are stored exactly as sent; blank ones count as missing.
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let (Some(titulo), Some(descripcion), Some(categoria)) = (
            present(request.titulo.clone()),
            present(request.descripcion.clone()),
            present(request.categoria.clone()),
        ) else {
            return Err(AppError::ValidationError(
                "Missing required fields: titulo, descripcion, categoria".to_string(),
            ));
        };

        if categoria.parse::<Category>().is_err() {
            return Err(AppError::ValidationError(Category::invalid_message()));
        }

        let insert = ProjectInsert::from_request(request, titulo, descripcion, categoria);
        insert.validate()?;

        self.project_repo
            .create_project(&insert)
            .await
            .inspect_err(|e| error!(operation = "create_project", titulo = %insert.titulo, error = %e, "Failed to create project"))
    }

    /// Applies a partial update. Only fields present in the payload change.
    pub async fn update_project(&self, id: &str, update: UpdateProjectRequest) -> Result<Project, AppError> {
        let nulls = update.null_required_fields();
        if !nulls.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Fields cannot be null: {}",
                nulls.join(", ")
            )));
        }

        if let Some(categoria) = update.categoria.value_ref() {
            if categoria.parse::<Category>().is_err() {
                return Err(AppError::ValidationError(Category::invalid_message()));
            }
        }

        update.validate()?;

        let Some(valid_id) = parse_id(id) else {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        };

        self.project_repo
            .update_project(valid_id, update)
            .await
            .inspect_err(|e| error!(operation = "update_project", id = valid_id, error = %e, "Failed to update project"))?
            .ok_or_else(|| AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let Some(valid_id) = parse_id(id) else {
            return Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()));
        };

        let deleted = self.project_repo
            .delete_project(valid_id)
            .await
            .inspect_err(|e| error!(operation = "delete_project", id = valid_id, error = %e, "Failed to delete project"))?;

        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound(PROJECT_NOT_FOUND.to_string()))
        }
    }
}
