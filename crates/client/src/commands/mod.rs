//! Subcommands of the `encounter` binary.

mod inspect;
mod run;
mod verify;

pub use inspect::Inspect;
pub use run::Run;
pub use verify::{Verify, VerifyReport, verify};
