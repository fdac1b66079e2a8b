pub mod file;
pub mod group;
pub mod session;
pub mod user;
