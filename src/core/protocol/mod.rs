pub mod listener;

pub use listener::{Action, DefaultRegistry, LauncherRegistry, Listener};
