mod course_store;
mod course_view;
mod identity;

pub use course_store::CourseStore;
pub use course_view::visible_courses;
pub use identity::{IdentityProvider, MIN_PASSWORD_LEN};
