// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for mapstudio crates.
//!
//! # Modules
//!
//! - [`config`] - In-memory config store for CLI config-loading tests
//! - [`records`] - Schema-complete record builders
//! - [`scenarios`] - Canned record sets exercising reference resolution
//! - [`shuffle`] - Seeded, reproducible permutations of record order
#![forbid(unsafe_code)]

pub mod config;
pub mod records;
pub mod scenarios;
pub mod shuffle;

pub use config::MemoryStore;
pub use records::{event, model, part, region, RecordBuilder};
pub use scenarios::{cycle_pair, gate_and_fog, spawner_scene, standard_registry};
pub use shuffle::{shuffled, XorShift64};
