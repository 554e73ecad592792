pub mod enrichment;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod vectorizer;

pub use recommendations::Recommender;
