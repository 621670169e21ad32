pub mod compile;
pub mod export;
pub mod init;

pub use compile::{compile, CompileArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
