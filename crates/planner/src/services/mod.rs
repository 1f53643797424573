pub mod catalog;
pub mod edit_plan;
pub mod import;
pub mod recompute;
pub mod relationships;
