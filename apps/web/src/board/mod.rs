pub mod handlers;
pub mod tenant;
