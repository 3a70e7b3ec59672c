mod category;
mod course;
mod session;

pub use category::{check_category, first_selectable_index, CategoryFilter, CategoryOption, CATALOG};
pub use course::{normalize_url, Course, NewCourse};
pub use session::{Principal, Session};
