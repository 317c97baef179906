pub mod interval;
pub mod node;
pub mod selection;

pub use interval::{FormattingInterval, FormattingMap};
pub use node::{AttrMap, Element, Node, text_len_of, text_of};
pub use selection::SelectionRange;
