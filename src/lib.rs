//! Content-based movie recommender.
//!
//! Movies are enriched with OMDb metadata, their genres turned into token
//! count vectors, and every pair scored by cosine similarity. Queries rank the
//! precomputed row of the requested movie.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
