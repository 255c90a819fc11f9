pub mod stager;

pub use stager::{resolve_template, stage_natives, unzip, ArchClass};
