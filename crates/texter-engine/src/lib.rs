pub mod editing;
pub mod host;
pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{EditError, apply_tag, document::*, extract, render};
pub use host::{PositionMapper, SelectionPort, TreeMapper, TreePosition, TreeRange};
pub use io::*;
pub use models::{interval::*, node::*, selection::*};
pub use parsing::{ParseError, parse};
