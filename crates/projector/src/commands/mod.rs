pub mod host;
pub mod init;
pub mod monitors;
pub mod serve;
pub mod show;
