//! # Gigbook Common Library
//!
//! Data-access and aggregation core of the gigbook booking directory:
//! - Database pool and schema
//! - Venue, Artist and Show models
//! - Entity store (CRUD)
//! - Upcoming/past show resolution
//! - Area aggregation and name search
//! - Configuration loading

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod resolver;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use store::Store;
pub use time::{Clock, FixedClock, SystemClock};
