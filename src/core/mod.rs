pub mod access;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod homework;
pub mod log;
pub mod range;
pub mod students;
