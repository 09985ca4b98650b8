//! Turns `git describe --tags --dirty --always` output into a semantic
//! version, e.g. `v1.2.0-12-g296cf8b-dirty` into `1.2.0+12.296cf8b.dirty`.

pub mod cli;
pub mod describe;
pub mod environ;
pub mod logging;
pub mod render;
pub mod version;

pub use describe::{parse, ParseError, TagDefect};
pub use render::DEFAULT_DIRTY_SUFFIX;
pub use version::{Commit, Version};
