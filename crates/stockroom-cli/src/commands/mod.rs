pub mod init;
pub mod items;
pub mod maintenance;
pub mod misc;
