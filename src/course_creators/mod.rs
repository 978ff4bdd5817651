pub mod error;
pub mod views;

pub use error::CourseCreatorError;
pub use views::{
    add_user_with_status_granted, add_user_with_status_unrequested, get_course_creator_status,
    load_course_creator,
};
