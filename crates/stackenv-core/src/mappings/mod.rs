//! Builtin per-service mapping tables.
//!
//! Each module owns one service's kinds and registers them into a
//! [`MappingRegistry`](crate::MappingRegistry).

pub(crate) mod lambda;
pub(crate) mod rds;
