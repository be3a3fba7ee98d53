//! Capabilities the core consumes from external collaborators.

pub mod classifier;
pub mod generator;
pub mod search;

pub use classifier::IPiiClassifier;
pub use generator::ITextGenerator;
pub use search::ISearchProvider;
