//! # classgate core
//!
//! Domain types and pure logic shared by the admission gate, the reminder
//! scheduler and the HTTP API. Nothing in this crate performs I/O; storage
//! and outbound providers are reached through the traits in [`repository`]
//! and [`notification`].

pub mod errors;
pub mod link;
pub mod models;
pub mod notification;
pub mod repository;
pub mod room;
pub mod subjects;
pub mod timing;
