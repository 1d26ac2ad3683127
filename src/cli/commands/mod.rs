pub mod cleanup;
pub mod commit;
pub mod delete;
pub mod diff;
pub mod init;
pub mod log;
pub mod record;
pub mod show;
pub mod snapshot;
pub mod workspace;
