pub mod collections;
pub mod compile;
pub mod name_normalizer;
pub mod path_uniquifier;
pub mod registry_to_ir;

pub use compile::{Compilation, CompileOptions, CompileStats, SourceDocument, compile};
