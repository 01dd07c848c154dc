pub mod contact;
pub mod option_fields;
pub mod project;
pub mod response;
