// Job Posting Store: create and list postings.

pub mod handlers;
pub mod service;
