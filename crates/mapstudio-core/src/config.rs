// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-session transcoding configuration.

/// Which pose an export writes for each entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoseSpace {
    /// The node's own pose, relative to its parent.
    #[default]
    Local,
    /// The pose composed through every ancestor.
    World,
}

/// Session options. Chosen once per session, never per field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscodeConfig {
    /// Pose written on export.
    pub pose_space: PoseSpace,
    /// Give synthesized model placeholders stand-in geometry.
    pub model_stand_ins: bool,
    /// Worker threads for multi-scope imports (at least one is used).
    pub workers: usize,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            pose_space: PoseSpace::Local,
            model_stand_ins: true,
            workers: 1,
        }
    }
}
