pub mod builder;
pub mod canonical;
pub mod frequency;
pub mod tree;

pub use builder::{build_tree, compute_code_lengths};
pub use canonical::{CanonicalCode, CanonicalTree, Code};
pub use frequency::FrequencyTable;
pub use tree::{CodeLengths, TreeNode, END_OF_STREAM, SYMBOL_LIMIT};
