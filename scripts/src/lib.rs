//! Scripts for checking and correcting the wiring of the deployed platform contracts.
//!
//! The deployed system is a fixed set of externally-defined contracts (tokens, NFTs, a
//! treasury, a bond system) whose cross-contract address references and access-control
//! approvals must agree with the deployments file. The `check` command verifies the
//! wiring; the `reconcile` command additionally corrects any mismatch through the
//! contract's configured setter.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod catalog;
pub mod cli;
mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod report;
pub mod transport;
pub mod types;
