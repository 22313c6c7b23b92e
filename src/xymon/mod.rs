//! # Xymon Protocol Module
//!
//! Implementation of the Xymon `status` message format.
//!
//! This module handles:
//! - Status colours and wire constants
//! - Rendering a status finding into the exact message text

pub mod encoder;
pub mod protocol;
