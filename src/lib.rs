pub mod auth;
pub mod cache;
pub mod categories;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod report;
pub mod sheets;
pub mod source;
pub mod table;
