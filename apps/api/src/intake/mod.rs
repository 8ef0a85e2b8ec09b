// CV intake: multipart upload -> durable file -> best-effort text -> uploaded_cvs row.

pub mod handlers;
pub mod pdf;
pub mod pipeline;
