//! Application orchestration: the boot pipeline and appearance switching.

pub mod appearance;
pub mod orchestrator;

pub use appearance::Appearance;
pub use orchestrator::{Application, BootPhase, ShellOptions};
