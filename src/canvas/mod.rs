//! Canvas block schema and renderers.

pub mod blocks;
pub mod builder;

pub use blocks::Block;
