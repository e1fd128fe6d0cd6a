//! Data-quality assessment for pet food product records.
//!
//! The [`quality`] module holds the pure scorer. [`service`] runs it over
//! records fetched from a [`db::FoodItemRepository`], and [`server`] exposes
//! the results over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod monitoring;
pub mod quality;
pub mod server;
pub mod service;
