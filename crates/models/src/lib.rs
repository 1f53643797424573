pub mod course_key;
pub mod plan;
pub mod prerequisite;
pub mod term;
