use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{
        contact::{Contact, ContactInsert},
        project::{Project, ProjectInsert, UpdateProjectRequest},
    },
    errors::{AppError, StorageError},
    repositories::{contact::ContactRepository, project::ProjectRepository},
    storage::json_file::JsonDocument,
};

pub const PROJECTS_FILE: &str = "projects.json";
pub const CONTACTS_FILE: &str = "contacts.json";

fn first_id() -> i64 {
    1
}

/// On-disk layout of `projects.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(rename = "nextId", default = "first_id")]
    pub next_id: i64,
}

impl Default for ProjectsDocument {
    fn default() -> Self {
        ProjectsDocument { projects: Vec::new(), next_id: first_id() }
    }
}

/// On-disk layout of `contacts.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactsDocument {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(rename = "nextId", default = "first_id")]
    pub next_id: i64,
}

impl Default for ContactsDocument {
    fn default() -> Self {
        ContactsDocument { contacts: Vec::new(), next_id: first_id() }
    }
}

/// Next id that is both past the counter and past every stored id, so a
/// hand-edited document can never cause an id to be reused. Returns the id
/// together with the counter value that follows it.
fn next_free_id(path: &Path, next_id: i64, ids: impl Iterator<Item = i64>) -> Result<(i64, i64), StorageError> {
    let exhausted = || {
        StorageError::Malformed(path.display().to_string(), "id counter is exhausted".to_string())
    };

    let max_id = ids.max().unwrap_or(0);
    let id = next_id.max(max_id.checked_add(1).ok_or_else(exhausted)?);
    let following = id.checked_add(1).ok_or_else(exhausted)?;
    Ok((id, following))
}

pub struct JsonProjectRepo {
    doc: JsonDocument<ProjectsDocument>,
}

impl JsonProjectRepo {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        JsonProjectRepo {
            doc: JsonDocument::new(data_dir.as_ref().join(PROJECTS_FILE)),
        }
    }
}

#[async_trait]
impl ProjectRepository for JsonProjectRepo {
    async fn get_all_projects(&self, categoria: Option<String>) -> Result<Vec<Project>, AppError> {
        let mut projects = self.doc.load().await?.projects;

        if let Some(categoria) = categoria {
            projects.retain(|p| p.categoria == categoria);
        }
        projects.sort_by_key(|p| (p.orden, p.id));

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        let doc = self.doc.load().await?;
        Ok(doc.projects.into_iter().find(|p| p.id == id))
    }

    async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Option<Project>, AppError> {
        let doc = self.doc.load().await?;
        Ok(doc
            .projects
            .into_iter()
            .find(|p| p.categoria == categoria && p.slug == slug))
    }

    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        project.validate()?;

        let path = self.doc.path();
        let created = self
            .doc
            .modify(|doc| {
                let (id, next_id) = next_free_id(path, doc.next_id, doc.projects.iter().map(|p| p.id))?;
                let orden = project.orden.unwrap_or(doc.projects.len() as i64 + 1);
                let new_project = Project::from_insert(id, orden, project);

                doc.projects.push(new_project.clone());
                doc.next_id = next_id;
                Ok(Some(new_project))
            })
            .await?;

        created.ok_or_else(|| AppError::InternalError("Project was not stored".into()))
    }

    async fn update_project(&self, id: i64, update: UpdateProjectRequest) -> Result<Option<Project>, AppError> {
        let updated = self
            .doc
            .modify(|doc| {
                let Some(project) = doc.projects.iter_mut().find(|p| p.id == id) else {
                    return Ok(None);
                };
                project.apply_update(update);
                Ok(Some(project.clone()))
            })
            .await?;

        Ok(updated)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        let removed = self
            .doc
            .modify(|doc| {
                let before = doc.projects.len();
                doc.projects.retain(|p| p.id != id);
                Ok((doc.projects.len() < before).then_some(()))
            })
            .await?;

        Ok(removed.is_some())
    }
}

pub struct JsonContactRepo {
    doc: JsonDocument<ContactsDocument>,
}

impl JsonContactRepo {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        JsonContactRepo {
            doc: JsonDocument::new(data_dir.as_ref().join(CONTACTS_FILE)),
        }
    }
}

#[async_trait]
impl ContactRepository for JsonContactRepo {
    async fn create_contact(&self, contact: &ContactInsert) -> Result<i64, AppError> {
        contact.validate()?;

        let path = self.doc.path();
        let id = self
            .doc
            .modify(|doc| {
                let (id, next_id) = next_free_id(path, doc.next_id, doc.contacts.iter().map(|c| c.id))?;
                doc.contacts.push(Contact::from_insert(id, Utc::now(), contact));
                doc.next_id = next_id;
                Ok(Some(id))
            })
            .await?;

        id.ok_or_else(|| AppError::InternalError("Contact was not stored".into()))
    }

    async fn get_all_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let mut contacts = self.doc.load().await?.contacts;
        contacts.sort_by(|a, b| {
            b.fecha_creacion
                .cmp(&a.fecha_creacion)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(contacts)
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>, AppError> {
        let doc = self.doc.load().await?;
        Ok(doc.contacts.into_iter().find(|c| c.id == id))
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, AppError> {
        let removed = self
            .doc
            .modify(|doc| {
                let before = doc.contacts.len();
                doc.contacts.retain(|c| c.id != id);
                Ok((doc.contacts.len() < before).then_some(()))
            })
            .await?;

        Ok(removed.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(next_id: i64, ids: &[i64]) -> Result<(i64, i64), StorageError> {
        next_free_id(Path::new("projects.json"), next_id, ids.iter().copied())
    }

    #[test]
    fn next_id_skips_past_stored_ids() {
        assert_eq!(next(1, &[]).unwrap(), (1, 2));
        assert_eq!(next(4, &[1, 2, 3]).unwrap(), (4, 5));
        assert_eq!(next(2, &[1, 7]).unwrap(), (8, 9));
        assert_eq!(next(10, &[3]).unwrap(), (10, 11));
    }

    #[test]
    fn exhausted_counter_is_malformed() {
        assert!(matches!(next(1, &[i64::MAX]), Err(StorageError::Malformed(_, _))));
        assert!(matches!(next(i64::MAX, &[]), Err(StorageError::Malformed(_, _))));
        assert!(matches!(next(1, &[i64::MAX - 1]), Err(StorageError::Malformed(_, _))));
        assert_eq!(next(1, &[i64::MAX - 2]).unwrap(), (i64::MAX - 1, i64::MAX));
    }
}
