pub mod feedback;
pub mod handle;
pub mod project;
pub mod session;
