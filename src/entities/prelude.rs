pub use super::category::Entity as Category;
pub use super::project::Entity as Project;
pub use super::project_history::Entity as ProjectHistory;
pub use super::project_student::Entity as ProjectStudent;
pub use super::requirement::Entity as Requirement;
pub use super::season::Entity as Season;
pub use super::stage::Entity as Stage;
pub use super::student::Entity as Student;
pub use super::type_project::Entity as TypeProject;
pub use super::user::Entity as User;
