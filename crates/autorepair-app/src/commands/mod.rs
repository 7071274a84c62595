//! CLI Commands

pub mod check;
pub mod init;
pub mod repair;
pub mod run;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use repair::RepairCommand;
pub use run::RunCommand;
