pub mod authz;
pub mod errors;

pub use authz::{is_user_in_creator_group, require_staff};
