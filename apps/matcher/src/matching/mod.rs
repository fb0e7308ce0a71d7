// Resume-to-job matching: keyword extraction, scoring, ranking and the HTTP handlers.
// Embedding and tagging are reached only through the traits in `embedding` and `nlp`.

pub mod handlers;
pub mod keywords;
pub mod listing;
pub mod models;
pub mod ranking;
pub mod scoring;
