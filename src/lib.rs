//! Trivia question service: categories, paginated question listings, search,
//! question creation and deletion, and a quiz endpoint handing out unseen questions.

pub mod config;
pub mod db;
pub mod error;
pub mod pagination;
pub mod quiz;
pub mod server;
pub mod service;
pub mod telemetry;
pub mod transfer;
