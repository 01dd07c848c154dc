mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, storage, utils, web};

use shared_repos::{DynContactRepo, DynProjectRepo, SharedRepositories};
use use_cases::{contact::ContactHandler, projects::ProjectHandler};

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub contact_handler: AppContactHandler,
}

pub type AppProjectHandler = ProjectHandler<DynProjectRepo>;
pub type AppContactHandler = ContactHandler<DynContactRepo>;

impl AppState {
    pub fn new(repos: SharedRepositories) -> Self {
        AppState {
            project_handler: ProjectHandler::new(repos.project_repo),
            contact_handler: ContactHandler::new(repos.contact_repo),
        }
    }
}
