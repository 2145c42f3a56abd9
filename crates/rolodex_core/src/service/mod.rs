//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep boundary layers decoupled from storage details.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Cross-record integrity (the group/contact cascade) lives here, not in
//!   storage.

pub mod contact_service;
pub mod group_service;
