pub mod init;
pub mod sources;
pub mod sync;
pub mod news;
pub mod push;
