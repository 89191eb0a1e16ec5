//! Performance-based-pay allocator.
//!
//! Splits a job's incentive pool across the technicians who worked it:
//! classify each technician from their title, resolve Lead/Assistant
//! roles from the team on the job, look up the split table, and emit
//! one payout row per job for the technician being paid.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod ledger;
pub mod name_generator;
pub mod payout;
pub mod rng;
pub mod roster;
pub mod sample;
pub mod sink;
pub mod split;
pub mod store;
pub mod team;
pub mod types;
