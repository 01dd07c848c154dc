pub mod contact;
pub mod json_repo;
pub mod project;
pub mod sqlx_repo;
