pub mod health;
pub mod plan;
pub mod prerequisite;
pub mod root;
