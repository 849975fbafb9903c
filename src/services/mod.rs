pub mod pagination;
pub mod project;
pub mod response;
pub mod season;

pub use pagination::*;
pub use project::*;
pub use response::*;
pub use season::*;
