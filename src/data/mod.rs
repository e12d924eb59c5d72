//! Data loading and dataset implementations
//!
//! This module provides the delimited text reader that turns records into
//! [`Instance`](crate::core::Instance)s.

pub mod delimited;

pub use self::delimited::*;
