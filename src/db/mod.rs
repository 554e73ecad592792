pub mod dataset;
pub mod store;

pub use store::MovieStore;
