//! Scripted key input for headless runs.
//!
//! A script is a comma-separated list of segments. Each segment names the keys
//! held (joined with `+`, or `none`) and optionally how many frames to hold
//! them for:
//!
//! ```text
//! forward*100, none, rotate-left*5, scale-up+right*3
//! ```

use crate::key::{HeldKeys, Key};
use std::str::FromStr;

/// Errors from parsing a key script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("segment {index} is empty")]
    EmptySegment { index: usize },
    #[error("unknown key `{name}` in segment {index}")]
    UnknownKey { index: usize, name: String },
    #[error("bad frame count `{count}` in segment {index}: must be a positive integer")]
    BadCount { index: usize, count: String },
}

/// Hold `keys` for `frames` consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSegment {
    pub keys: HeldKeys,
    pub frames: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScript {
    segments: Vec<ScriptSegment>,
}

impl KeyScript {
    pub fn new(segments: Vec<ScriptSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[ScriptSegment] {
        &self.segments
    }

    pub fn total_frames(&self) -> u64 {
        self.segments.iter().map(|s| s.frames as u64).sum()
    }

    /// The held-key set for every frame, in order.
    pub fn frames(&self) -> impl Iterator<Item = HeldKeys> + '_ {
        self.segments
            .iter()
            .flat_map(|s| std::iter::repeat_n(s.keys, s.frames as usize))
    }
}

impl FromStr for KeyScript {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut segments = Vec::new();
        for (index, raw) in s.split(',').enumerate() {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(ScriptError::EmptySegment { index });
            }

            let (keys_part, frames) = match raw.split_once('*') {
                Some((keys, count)) => {
                    let count = count.trim();
                    let frames = count
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ScriptError::BadCount {
                            index,
                            count: count.to_string(),
                        })?;
                    (keys.trim(), frames)
                }
                None => (raw, 1),
            };

            let mut keys = HeldKeys::new();
            if keys_part != "none" {
                for name in keys_part.split('+') {
                    let name = name.trim();
                    let key = Key::from_name(name).ok_or_else(|| ScriptError::UnknownKey {
                        index,
                        name: name.to_string(),
                    })?;
                    keys.press(key);
                }
            }
            segments.push(ScriptSegment { keys, frames });
        }

        tracing::debug!("parsed key script with {} segments", segments.len());
        Ok(Self { segments })
    }
}
