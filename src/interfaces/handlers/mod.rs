pub mod contacts;
pub mod home;
pub mod projects;
