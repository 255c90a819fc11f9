pub mod manifest;
pub mod scanner;

pub use scanner::{scan_mods, ModDescriptor, ModScan};
