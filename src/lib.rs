//! # CUSP Xymon Library
//!
//! Push CUSP seismic recorder state-of-health to a Xymon server.
//!
//! This library provides the core functionality for evaluating CUSP
//! `<report>` documents against configured bounds and sending one Xymon
//! `status` message per monitored aspect.

pub mod config;
pub mod error;
pub mod cusp;
pub mod evaluator;
pub mod xymon;
pub mod transport;
pub mod scan;
pub mod processor;
