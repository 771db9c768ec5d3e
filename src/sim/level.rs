//! Level generation from block metadata
//!
//! Each block becomes one platform. Gas used picks the height, block size
//! picks the width, and platforms are laid left to right with a fixed gap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::BlockRecord;
use crate::tuning::Tuning;

/// Decorative glyphs shown on special platforms
pub const MARKERS: [&str; 8] = ["🚀", "💎", "🌙", "⚡", "🔥", "💪", "🎯", "⭐"];

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Carries a marker glyph; collides exactly like `Normal`
    Special,
}

/// A static platform (axis-aligned, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Position in the generated sequence
    pub index: usize,
    /// Top-left corner in world coordinates
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    pub kind: PlatformKind,
    /// Glyph drawn on special platforms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    /// Source block
    pub block: BlockRecord,
}

impl Platform {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// Vertical offset from the baseline for a block's gas usage
///
/// Remainder keeps the dividend's sign, so negative gas yields offsets below
/// `-gas_band / 2`. Unparseable gas sits on the baseline.
pub fn height_offset(gas_used: Option<i64>, tuning: &Tuning) -> f32 {
    let band = tuning.gas_band.max(1);
    match gas_used {
        Some(gas) => (gas % band - band / 2) as f32,
        None => 0.0,
    }
}

/// Platform width for a block's byte size, before clamping
///
/// Unparseable size yields zero, which clamps to the minimum width.
pub fn raw_width(size: Option<i64>, tuning: &Tuning) -> f32 {
    size.map_or(0.0, |s| s as f32 / tuning.size_per_width)
}

/// Build the level for a run
///
/// Input order is preserved left to right. The first platform is always on
/// the baseline so the spawn has a safe landing. Empty input gives an empty
/// level; callers decide what that means.
pub fn generate_platforms(blocks: &[BlockRecord], tuning: &Tuning) -> Vec<Platform> {
    let mut platforms = Vec::with_capacity(blocks.len());
    let mut cursor = tuning.first_platform_x;

    for (index, block) in blocks.iter().enumerate() {
        let y = if index == 0 {
            tuning.baseline_y
        } else {
            tuning.baseline_y + height_offset(block.gas_used_value(), tuning)
        };

        let width = tuning.clamp_width(raw_width(block.size_value(), tuning));

        let every = tuning.special_every.max(1);
        let (kind, marker) = if index > 0 && index % every == 0 {
            // Cycle by special ordinal so consecutive specials differ
            let glyph = MARKERS[(index / every) % MARKERS.len()];
            (PlatformKind::Special, Some(glyph.to_string()))
        } else {
            (PlatformKind::Normal, None)
        };

        let platform = Platform {
            index,
            pos: Vec2::new(cursor, y),
            size: Vec2::new(width, tuning.platform_height),
            kind,
            marker,
            block: block.clone(),
        };
        // Next platform starts exactly one gap past this one's right edge
        cursor = platform.right() + tuning.platform_gap;
        platforms.push(platform);
    }

    log::debug!(
        "Generated {} platforms, level length {}",
        platforms.len(),
        cursor - tuning.first_platform_x
    );

    platforms
}
