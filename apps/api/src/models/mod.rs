pub mod cv;
pub mod job_post;
pub mod user;
