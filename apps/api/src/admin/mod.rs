// Admin Query Service and user moderation, plus the admin page that drives them.

pub mod handlers;
pub mod page;
pub mod queries;
pub mod users;
