pub mod route;
pub mod session;
pub mod sync;
