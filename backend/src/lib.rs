//! Conduit users backend.
//!
//! Hexagonal layout: [`domain`] holds the user model, ports and services;
//! [`inbound`] adapts HTTP requests onto domain ports; [`outbound`] provides
//! repository adapters for PostgreSQL and in-process storage.

pub mod domain;
pub mod inbound;
pub mod outbound;
