//! Tool catalog integration tests over the in-memory backend.

mod support;

mod claims;
mod dispatch;
mod inspections;
mod updates;
