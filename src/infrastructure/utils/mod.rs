pub mod email;
pub mod parse_id;
