//! Wire types of the Outrigger runtime API.
//!
//! This crate is a hand-maintained Rust mirror of `proto/runtime.proto`:
//! prost message types for every wire shape, plus the server-side service
//! trait which the dispatch core implements. Hosts that serve the API over a
//! tonic transport generate their transport bindings from the .proto contract
//! directly; the message layouts here are wire-compatible with that output.

pub mod runtime;
