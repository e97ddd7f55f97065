// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Configuration port and stores for mapstudio tools.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fs;
mod store;

pub use fs::FsConfigStore;
pub use store::{ConfigError, ConfigService, ConfigStore};

/// Key under which tools persist their transcoding settings.
pub const TRANSCODE_KEY: &str = "transcode";
