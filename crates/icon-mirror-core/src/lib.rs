pub mod config;
pub mod logging;

pub mod feed;
pub mod http;
pub mod identity;
pub mod job;
pub mod mirror;
pub mod store;
pub mod url_model;
pub mod writer;
