//! Vitrine
//!
//! Vitrine is a pricing analytics library for fashion catalogs: it filters a product catalog by
//! free-text search and category, and summarises it into headline figures.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod fixtures;
pub mod insights;
pub mod movement;
pub mod prelude;
pub mod products;
pub mod recommendations;
pub mod report;
pub mod session;
pub mod summary;
