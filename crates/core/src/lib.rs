//! Core business logic for the check-in service.
//!
//! This crate contains pure business logic with no web or database dependencies.
//! Eligibility rules, day arithmetic and reward bookkeeping live here; storage
//! is injected through traits implemented by `checkin-db`.
//!
//! # Modules
//!
//! - `checkin` - Eligibility, rewards, calendar and info views

pub mod checkin;
