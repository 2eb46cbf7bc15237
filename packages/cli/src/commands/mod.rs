pub mod import;
pub mod init;

pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};
