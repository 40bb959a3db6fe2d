pub mod error;
pub mod loader;
pub mod mix;
pub mod naming;
pub mod normalize;
pub mod types;

// Re-export commonly used types
pub use error::NormalizeError;
pub use loader::{load_from_json, style_node_from_value, InvalidValueMode};
pub use mix::{mix, mix_nodes, MixSource};
pub use naming::to_kebab_case;
pub use normalize::{normalize, normalize_value, NormalizeOptions, Normalizer};
pub use types::{
    Declarations, FlatEntry, FlatStyleSheet, KeyKind, Scalar, StyleNode, StyleValue, ValueKind,
};
