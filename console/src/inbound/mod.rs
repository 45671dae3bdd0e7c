//! Inbound adapters that translate browser requests into domain workflow
//! calls while keeping framework details at the edge.
//!
//! The admin console is served entirely over [`http`].

pub mod http;
