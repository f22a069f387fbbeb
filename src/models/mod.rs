pub mod attendance;
pub mod homework;
pub mod role;
pub mod status;
pub mod student;
