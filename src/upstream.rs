//! Question-bank wire model, query filters, and endpoint configuration.
//!
//! The relay treats the question bank as an external collaborator with three calls: fetch a
//! question batch, request a session token, and reset a session token. Everything here is
//! plain data; the transport lives in [`crate::http`].

pub mod descriptor;
pub mod model;
pub mod query;

pub use descriptor::*;
pub use model::*;
pub use query::*;
