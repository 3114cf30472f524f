//! Menfess - backend for an anonymous confession board.
//!
//! Users register (anonymously or with email and password), follow menfess
//! broadcast accounts, write threaded posts under their own or a menfess
//! identity, like posts, and receive push notifications for likes, replies
//! and new posts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
