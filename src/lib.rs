//! Rate Engine for resource supply projects
//!
//! This crate holds the rate card of priced roles, resolves the rate a
//! resource inherits from its role, work arrangement and resource type, and
//! computes basic rates, earnings and profit. It also carries the project,
//! resource and attendance records those figures are attached to.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
