//! Action provider implementations.

pub mod scripted;
pub mod tactical;

pub use scripted::ScriptedProvider;
pub use tactical::{TacticalPolicy, TacticalProvider};
