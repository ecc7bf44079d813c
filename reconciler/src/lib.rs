//! A declarative relationship reconciler for wired-together contract deployments.
//!
//! A deployment is modeled as a set of [`registry::Node`]s (remote contracts with a
//! resolved address and a typed interface) and a [`catalog::Catalog`] of assertions of
//! the form "node → operation → expected target node". The [`engine::Reconciler`] checks
//! each assertion against live remote state through a [`caller::RemoteCaller`], and can
//! optionally correct a mismatch by invoking the assertion's configured setter.
//!
//! The crate is transport-free: callers supply a [`caller::RemoteCaller`] implementation
//! backed by whatever RPC/signing layer they use.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod caller;
pub mod catalog;
pub mod engine;
pub mod errors;
pub mod outcome;
pub mod registry;
