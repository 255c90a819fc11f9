// ─── OneSix Launch Helper Core ───
// Reads a launch script from the parent launcher and starts the game inside
// a Java runtime.
//
// Architecture:
//   core/
//     error/     — Shared error type and exit codes
//     params/    — Multi-valued parameter store
//     protocol/  — Line-based control protocol listener
//     launch/    — OneSix coordinator, launch strategies, environment
//     mods/      — Jar manifest scanning for tweakers and core plugins
//     natives/   — Architecture-aware native library extraction
//     jvm/       — Class-file reader, java process runtime, applet host
//     settings/  — JSON settings and java binary lookup

pub mod error;
pub mod jvm;
pub mod launch;
pub mod mods;
pub mod natives;
pub mod params;
pub mod protocol;
pub mod settings;
