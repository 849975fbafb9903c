pub mod prelude;

pub mod category;
pub mod project;
pub mod project_history;
pub mod project_student;
pub mod requirement;
pub mod season;
pub mod stage;
pub mod student;
pub mod type_project;
pub mod user;
