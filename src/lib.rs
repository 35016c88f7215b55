//! Zorpido café website.
//!
//! Layers follow the usual split: `domain` holds records and rules,
//! `application` the services and repository traits, `infra` the Postgres,
//! HTTP and telemetry adapters, and `presentation` the askama views.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
