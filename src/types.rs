//! Mode descriptor types, bit-flag sets and timing limits.
//!
//! A [`ModeDescriptor`] is a plain immutable value describing one known video
//! timing standard: active/total geometry, blanking offsets, sync lengths, a
//! sampler phase tuning constant, a [`VideoType`] classification mask, a
//! [`VideoGroup`] family tag and a [`ModeFlags`] word. The bit assignments of
//! the two mask words are stable and must not be renumbered; persisted
//! configuration depends on them.

use std::fmt;

use crate::error::{CatalogError, CatalogResult};

// ---------------------------------------------------------------------------
// Timing limits
// ---------------------------------------------------------------------------

/// Minimum total samples per line
pub const H_TOTAL_MIN: u16 = 300;
/// Maximum total samples per line
pub const H_TOTAL_MAX: u16 = 2800;
/// Maximum fine-adjustment value (eighths of a sample)
pub const H_TOTAL_ADJ_MAX: u8 = 5;
/// Minimum horizontal sync length in samples
pub const H_SYNCLEN_MIN: u8 = 10;
/// Maximum horizontal sync length in samples
pub const H_SYNCLEN_MAX: u8 = 255;
/// Minimum horizontal backporch in samples
pub const H_BPORCH_MIN: u8 = 1;
/// Maximum horizontal backporch in samples
pub const H_BPORCH_MAX: u8 = 255;
/// Minimum active samples per line
pub const H_ACTIVE_MIN: u16 = 200;
/// Maximum active samples per line
pub const H_ACTIVE_MAX: u16 = 1920;
/// Minimum vertical sync length in lines
pub const V_SYNCLEN_MIN: u8 = 1;
/// Maximum vertical sync length in lines
pub const V_SYNCLEN_MAX: u8 = 7;
/// Minimum vertical backporch in lines
pub const V_BPORCH_MIN: u8 = 1;
/// Maximum vertical backporch in lines
pub const V_BPORCH_MAX: u8 = 63;
/// Minimum active lines
pub const V_ACTIVE_MIN: u16 = 160;
/// Maximum active lines
pub const V_ACTIVE_MAX: u16 = 1200;

/// Reference pixel clock used to derive nominal refresh rates (SDTV sampling
/// base). Only relative proximity between same-line-count candidates matters,
/// so a single fixed base suffices.
pub const REF_PIXEL_CLOCK_HZ: u32 = 13_500_000;

/// Default sampler phase applied to every built-in mode.
pub const DEFAULT_SAMPLER_PHASE: u8 = 0;

// ---------------------------------------------------------------------------
// Bit-flag sets
// ---------------------------------------------------------------------------

/// Video type classification mask.
///
/// A standard may legitimately belong to more than one category (e.g. 240p is
/// both SDTV and a valid PC capture source), so descriptors carry a mask and
/// callers filter with an intersection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoType(u8);

impl VideoType {
    /// Low-definition TV (non-standard low line counts)
    pub const LDTV: VideoType = VideoType(1 << 0);
    /// Standard-definition TV (240p/288p, 480i/576i)
    pub const SDTV: VideoType = VideoType(1 << 1);
    /// Enhanced-definition TV (480p/576p class)
    pub const EDTV: VideoType = VideoType(1 << 2);
    /// High-definition TV (720p, 1080i/p)
    pub const HDTV: VideoType = VideoType(1 << 3);
    /// PC graphics (VESA and workstation timings)
    pub const PC: VideoType = VideoType(1 << 4);

    /// Mask with no category set ("no restriction" as a hint).
    pub const fn empty() -> VideoType {
        VideoType(0)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any category is shared with `other`.
    pub const fn intersects(self, other: VideoType) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for VideoType {
    type Output = VideoType;
    fn bitor(self, rhs: VideoType) -> VideoType {
        VideoType(self.0 | rhs.0)
    }
}

/// Mode flags: scan structure, clock handling and the set of legal
/// line-multiplication strategies.
///
/// Every descriptor must set at least one strategy bit (anything in
/// [`ModeFlags::STRATEGY_MASK`]); this is checked once at catalog
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeFlags(u32);

impl ModeFlags {
    /// Signal is interlaced; `v_total` counts the field pair.
    pub const INTERLACED: ModeFlags = ModeFlags(1 << 0);
    /// Pixel clock must be halved for this mode.
    pub const PLLDIVBY2: ModeFlags = ModeFlags(1 << 1);

    // Strategy bits. At least one must be set per mode.
    /// Passthrough
    pub const PT: ModeFlags = ModeFlags(1 << 2);
    /// Generic line-double
    pub const L2: ModeFlags = ModeFlags(1 << 3);
    pub const L2_512_COL: ModeFlags = ModeFlags(1 << 4);
    pub const L2_320_COL: ModeFlags = ModeFlags(1 << 5);
    pub const L2_256_COL: ModeFlags = ModeFlags(1 << 6);
    pub const L2_240X360: ModeFlags = ModeFlags(1 << 7);
    pub const L3_GEN_16_9: ModeFlags = ModeFlags(1 << 8);
    pub const L3_GEN_4_3: ModeFlags = ModeFlags(1 << 9);
    pub const L3_512_COL: ModeFlags = ModeFlags(1 << 10);
    pub const L3_320_COL: ModeFlags = ModeFlags(1 << 11);
    pub const L3_256_COL: ModeFlags = ModeFlags(1 << 12);
    pub const L3_240X360: ModeFlags = ModeFlags(1 << 13);
    pub const L4_GEN_4_3: ModeFlags = ModeFlags(1 << 14);
    pub const L4_512_COL: ModeFlags = ModeFlags(1 << 15);
    pub const L4_320_COL: ModeFlags = ModeFlags(1 << 16);
    pub const L4_256_COL: ModeFlags = ModeFlags(1 << 17);
    pub const L5_GEN_4_3: ModeFlags = ModeFlags(1 << 18);
    pub const L5_512_COL: ModeFlags = ModeFlags(1 << 19);
    pub const L5_320_COL: ModeFlags = ModeFlags(1 << 20);
    pub const L5_256_COL: ModeFlags = ModeFlags(1 << 21);

    /// Every strategy bit (PT through L5_256_COL).
    pub const STRATEGY_MASK: ModeFlags = ModeFlags(0x003f_fffc);

    pub const fn empty() -> ModeFlags {
        ModeFlags(0)
    }

    /// Raw bit value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: ModeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: ModeFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// True for interlaced standards.
    pub const fn is_interlaced(self) -> bool {
        self.contains(ModeFlags::INTERLACED)
    }

    /// True when the pixel clock must be halved.
    pub const fn pll_div_by_2(self) -> bool {
        self.contains(ModeFlags::PLLDIVBY2)
    }

    /// True when at least one line-multiplication strategy is legal.
    pub const fn has_multiplier_strategy(self) -> bool {
        self.intersects(ModeFlags::STRATEGY_MASK)
    }
}

impl std::ops::BitOr for ModeFlags {
    type Output = ModeFlags;
    fn bitor(self, rhs: ModeFlags) -> ModeFlags {
        ModeFlags(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Groups and identifiers
// ---------------------------------------------------------------------------

/// Coarse family tag grouping visually-related resolutions.
///
/// Groups exist for UI and processing-profile purposes only; they never
/// participate in classification tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoGroup {
    None,
    Group240p,
    Group384p,
    Group480i,
    Group480p,
    Group1080i,
}

impl fmt::Display for VideoGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VideoGroup::None => "none",
            VideoGroup::Group240p => "240p",
            VideoGroup::Group384p => "384p",
            VideoGroup::Group480i => "480i",
            VideoGroup::Group480p => "480p",
            VideoGroup::Group1080i => "1080i",
        };
        write!(f, "{}", name)
    }
}

/// Stable identifier of one catalog entry.
///
/// Valid only against the catalog that produced it. The downstream hardware
/// configuration path uses it to re-fetch the full descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeId(pub(crate) usize);

impl ModeId {
    /// Position of the entry in catalog order.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// One known video timing standard.
///
/// `h_total` and `h_total_adj` together encode the total line length as
/// `h_total + h_total_adj/8` samples; the fractional part corrects rounding
/// when the reference clock is divided down for this geometry. For interlaced
/// standards `v_total` counts the full field pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModeDescriptor {
    /// Short unique display name, e.g. "480i".
    pub name: &'static str,
    pub h_active: u16,
    pub v_active: u16,
    pub h_total: u16,
    pub h_total_adj: u8,
    pub v_total: u16,
    pub h_backporch: u8,
    pub v_backporch: u8,
    pub h_synclen: u8,
    pub v_synclen: u8,
    /// Sampling-clock phase offset, opaque hardware tuning constant.
    pub sampler_phase: u8,
    pub typ: VideoType,
    pub group: VideoGroup,
    pub flags: ModeFlags,
}

impl ModeDescriptor {
    /// Total line length in eighths of a sample.
    pub const fn h_total_eighths(&self) -> u64 {
        self.h_total as u64 * 8 + self.h_total_adj as u64
    }

    /// Nominal vertical refresh in millihertz, derived from the mode geometry
    /// and a reference pixel clock. Interlaced modes report field rate.
    ///
    /// Used only to rank same-line-count candidates by proximity to the
    /// measured refresh; it is not a primary match key.
    pub fn nominal_refresh_millihz(&self, ref_clk_hz: u32) -> u64 {
        let cycles = self.h_total_eighths() * self.v_total as u64;
        if cycles == 0 {
            return 0;
        }
        let frame_millihz = ref_clk_hz as u64 * 8_000 / cycles;
        if self.flags.is_interlaced() {
            frame_millihz * 2
        } else {
            frame_millihz
        }
    }

    /// Validate every field against its declared bound and require at least
    /// one line-multiplication strategy flag. Called once per descriptor at
    /// catalog construction, never on the classification path.
    pub fn validate(&self) -> CatalogResult<()> {
        // Upper bounds of u8-typed fields at 255 are enforced by the type.
        self.check_range("h_total", self.h_total as u32, H_TOTAL_MIN as u32, H_TOTAL_MAX as u32)?;
        self.check_range("h_total_adj", self.h_total_adj as u32, 0, H_TOTAL_ADJ_MAX as u32)?;
        self.check_range("h_active", self.h_active as u32, H_ACTIVE_MIN as u32, H_ACTIVE_MAX as u32)?;
        self.check_range("v_active", self.v_active as u32, V_ACTIVE_MIN as u32, V_ACTIVE_MAX as u32)?;
        self.check_range("h_synclen", self.h_synclen as u32, H_SYNCLEN_MIN as u32, H_SYNCLEN_MAX as u32)?;
        self.check_range("h_backporch", self.h_backporch as u32, H_BPORCH_MIN as u32, H_BPORCH_MAX as u32)?;
        self.check_range("v_synclen", self.v_synclen as u32, V_SYNCLEN_MIN as u32, V_SYNCLEN_MAX as u32)?;
        self.check_range("v_backporch", self.v_backporch as u32, V_BPORCH_MIN as u32, V_BPORCH_MAX as u32)?;

        if !self.flags.has_multiplier_strategy() {
            return Err(CatalogError::NoMultiplierStrategy(self.name));
        }
        Ok(())
    }

    fn check_range(
        &self,
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    ) -> CatalogResult<()> {
        if value < min || value > max {
            return Err(CatalogError::FieldOutOfRange {
                mode: self.name,
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
