//! Integration testing module
//!
//! End-to-end tests for the converter:
//! - Realistic SRT and ASS/SSA documents
//! - WebVTT output validation
//! - Determinism and concurrent use

pub mod fixtures;
