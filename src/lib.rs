//! Public library API for decoding type-tree described binary data.

/// Template construction, byte sources, and schema-driven value decoding.
pub mod tree;
