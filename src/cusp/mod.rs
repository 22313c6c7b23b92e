//! # CUSP Report Module
//!
//! State-of-health reports written by CUSP seismic recorders.
//!
//! This module handles:
//! - Decoding `<report>` XML documents
//! - Typed, parse-on-demand access to the raw report fields

pub mod loader;
pub mod record;

pub use record::CuspReport;
