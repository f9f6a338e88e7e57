//! The mode catalog: the authoritative, ordered list of supported standards.
//!
//! Built exactly once at controller startup and immutable afterwards; every
//! descriptor is validated against the timing limits at construction so the
//! classification path never re-checks them. Catalog order is meaningful: the
//! classifier breaks residual refresh-proximity ties by first-listed-wins, so
//! entries must not be reordered casually.
//!
//! Which families are compiled in is selected by the `sdtv`, `edtv`, `hdtv`
//! and `pc` cargo features (all enabled by default). The classifier is
//! correct over any non-empty subset.

use crate::error::{CatalogError, CatalogResult};
use crate::types::{
    ModeDescriptor, ModeFlags, ModeId, VideoGroup, VideoType, DEFAULT_SAMPLER_PHASE,
};

/// Immutable, validated list of mode descriptors.
#[derive(Debug, Clone)]
pub struct ModeCatalog {
    modes: Vec<ModeDescriptor>,
}

impl ModeCatalog {
    /// Build a catalog from an explicit descriptor list, validating every
    /// entry. Fails if the list is empty or any descriptor violates a timing
    /// bound or lacks a line-multiplication strategy flag.
    pub fn new(modes: Vec<ModeDescriptor>) -> CatalogResult<ModeCatalog> {
        if modes.is_empty() {
            return Err(CatalogError::Empty);
        }
        for mode in &modes {
            mode.validate()?;
        }
        tracing::debug!("mode catalog validated: {} entries", modes.len());
        Ok(ModeCatalog { modes })
    }

    /// Build the compiled-in catalog for the enabled feature set.
    pub fn builtin() -> CatalogResult<ModeCatalog> {
        ModeCatalog::new(builtin_modes())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Fetch a descriptor by identifier.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this catalog. An out-of-range id is
    /// a programmer error; returning a substitute descriptor would silently
    /// program wrong hardware timings.
    pub fn get(&self, id: ModeId) -> &ModeDescriptor {
        &self.modes[id.0]
    }

    /// Iterate descriptors in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ModeDescriptor> {
        self.modes.iter()
    }

    /// Identifier of the entry at `index`, if in range.
    pub fn id_at(&self, index: usize) -> Option<ModeId> {
        if index < self.modes.len() {
            Some(ModeId(index))
        } else {
            None
        }
    }
}

/// One table row. Field order follows the wire order of the persisted table:
/// name, actives, totals (+adjust), backporches, synclens, type, group, flags.
#[allow(clippy::too_many_arguments)]
fn row(
    name: &'static str,
    h_active: u16,
    v_active: u16,
    h_total: u16,
    h_total_adj: u8,
    v_total: u16,
    h_backporch: u8,
    v_backporch: u8,
    h_synclen: u8,
    v_synclen: u8,
    typ: VideoType,
    group: VideoGroup,
    flags: ModeFlags,
) -> ModeDescriptor {
    ModeDescriptor {
        name,
        h_active,
        v_active,
        h_total,
        h_total_adj,
        v_total,
        h_backporch,
        v_backporch,
        h_synclen,
        v_synclen,
        sampler_phase: DEFAULT_SAMPLER_PHASE,
        typ,
        group,
        flags,
    }
}

#[rustfmt::skip]
fn builtin_modes() -> Vec<ModeDescriptor> {
    use VideoGroup::{Group1080i, Group240p, Group384p, Group480i, Group480p};

    let sdtv_pc = VideoType::SDTV | VideoType::PC;
    let edtv_pc = VideoType::EDTV | VideoType::PC;
    let hdtv_pc = VideoType::HDTV | VideoType::PC;
    let edtv = VideoType::EDTV;
    let pc = VideoType::PC;

    let mut modes = Vec::new();

    if cfg!(any(feature = "sdtv", feature = "pc")) {
        // 240p modes
        modes.push(row("1600x240", 1600,  240, 2046, 0,  262, 202, 15, 150, 3, sdtv_pc, Group240p, ModeFlags::L5_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("1280x240", 1280,  240, 1560, 0,  262, 170, 15,  72, 3, sdtv_pc, Group240p, ModeFlags::L3_GEN_16_9 | ModeFlags::L4_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("960x240",   960,  240, 1170, 0,  262, 128, 15,  54, 3, sdtv_pc, Group240p, ModeFlags::L3_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("512x240",   512,  240,  682, 0,  262,  77, 14,  50, 3, sdtv_pc, Group240p, ModeFlags::L2_512_COL | ModeFlags::L3_512_COL | ModeFlags::L4_512_COL | ModeFlags::L5_512_COL));
        modes.push(row("320x240",   320,  240,  426, 0,  262,  49, 14,  31, 3, sdtv_pc, Group240p, ModeFlags::L2_320_COL | ModeFlags::L3_320_COL | ModeFlags::L4_320_COL | ModeFlags::L5_320_COL));
        modes.push(row("256x240",   256,  240,  341, 0,  262,  39, 14,  25, 3, sdtv_pc, Group240p, ModeFlags::L2_256_COL | ModeFlags::L3_256_COL | ModeFlags::L4_256_COL | ModeFlags::L5_256_COL));
        modes.push(row("240p",      720,  240,  858, 0,  262,  57, 15,  62, 3, sdtv_pc, Group240p, ModeFlags::PT | ModeFlags::L2 | ModeFlags::PLLDIVBY2));
        // 288p modes
        modes.push(row("1600x240L", 1600, 240, 2046, 0,  312, 202, 41, 150, 3, sdtv_pc, Group240p, ModeFlags::L5_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("1280x288", 1280,  288, 1560, 0,  312, 170, 15,  72, 3, sdtv_pc, Group240p, ModeFlags::L3_GEN_16_9 | ModeFlags::L4_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("960x288",   960,  288, 1170, 0,  312, 128, 15,  54, 3, sdtv_pc, Group240p, ModeFlags::L3_GEN_4_3 | ModeFlags::PLLDIVBY2));
        modes.push(row("512x240LB", 512,  240,  682, 0,  312,  77, 41,  50, 3, sdtv_pc, Group240p, ModeFlags::L2_512_COL | ModeFlags::L3_512_COL | ModeFlags::L4_512_COL | ModeFlags::L5_512_COL));
        modes.push(row("320x240LB", 320,  240,  426, 0,  312,  49, 41,  31, 3, sdtv_pc, Group240p, ModeFlags::L2_320_COL | ModeFlags::L3_320_COL | ModeFlags::L4_320_COL | ModeFlags::L5_320_COL));
        modes.push(row("256x240LB", 256,  240,  341, 0,  312,  39, 41,  25, 3, sdtv_pc, Group240p, ModeFlags::L2_256_COL | ModeFlags::L3_256_COL | ModeFlags::L4_256_COL | ModeFlags::L5_256_COL));
        modes.push(row("288p",      720,  288,  864, 0,  312,  69, 19,  63, 3, sdtv_pc, Group240p, ModeFlags::PT | ModeFlags::L2 | ModeFlags::PLLDIVBY2));
    }
    if cfg!(feature = "edtv") {
        // 360p: GBI
        modes.push(row("480x360",   480,  360,  600, 0,  375,  63, 10,  38, 3, edtv,    Group384p, ModeFlags::PT | ModeFlags::L2 | ModeFlags::PLLDIVBY2));
        modes.push(row("240x360",   256,  360,  300, 0,  375,  24, 10,  18, 3, edtv,    Group384p, ModeFlags::L2_240X360 | ModeFlags::L3_240X360));
        // 384p: Sega Model 2
        modes.push(row("384p",      496,  384,  640, 0,  423,  50, 29,  62, 3, edtv,    Group384p, ModeFlags::PT | ModeFlags::L2 | ModeFlags::PLLDIVBY2));
    }
    if cfg!(feature = "pc") {
        // 640x400, VGA Mode 13h
        modes.push(row("640x400",   640,  400,  800, 0,  449,  48, 36,  96, 2, pc,      Group384p, ModeFlags::PT | ModeFlags::L2));
        // 384p: X68k @ 24kHz
        modes.push(row("640x384",   640,  384,  800, 0,  492,  48, 63,  96, 2, pc,      Group384p, ModeFlags::PT | ModeFlags::L2 | ModeFlags::PLLDIVBY2));
    }
    if cfg!(any(feature = "sdtv", feature = "pc")) {
        // ~525-line modes
        modes.push(row("480i",      720,  240,  858, 0,  525,  57, 15,  62, 3, sdtv_pc, Group480i, ModeFlags::PT | ModeFlags::L2 | ModeFlags::L3_GEN_16_9 | ModeFlags::L4_GEN_4_3 | ModeFlags::PLLDIVBY2 | ModeFlags::INTERLACED));
    }
    if cfg!(any(feature = "edtv", feature = "pc")) {
        modes.push(row("480p",      720,  480,  858, 0,  525,  60, 30,  62, 6, edtv_pc, Group480p, ModeFlags::PT | ModeFlags::L2));
        modes.push(row("640x480",   640,  480,  800, 0,  525,  48, 33,  96, 2, edtv_pc, Group480p, ModeFlags::PT | ModeFlags::L2));
        // X68k @ 31kHz
        modes.push(row("640x512",   640,  512,  800, 0,  568,  48, 28,  96, 2, edtv_pc, Group480p, ModeFlags::PT | ModeFlags::L2));
    }
    if cfg!(any(feature = "sdtv", feature = "pc")) {
        // ~625-line modes
        modes.push(row("576i",      720,  288,  864, 0,  625,  69, 19,  63, 3, sdtv_pc, Group480i, ModeFlags::PT | ModeFlags::L2 | ModeFlags::L3_GEN_16_9 | ModeFlags::L4_GEN_4_3 | ModeFlags::PLLDIVBY2 | ModeFlags::INTERLACED));
    }
    if cfg!(feature = "edtv") {
        modes.push(row("576p",      720,  576,  864, 0,  625,  68, 39,  64, 5, edtv,    Group480p, ModeFlags::PT | ModeFlags::L2));
    }
    if cfg!(feature = "pc") {
        modes.push(row("800x600",   800,  600, 1056, 0,  628,  88, 23, 128, 4, pc,      VideoGroup::None, ModeFlags::PT));
    }
    if cfg!(any(feature = "hdtv", feature = "pc")) {
        // 720p modes
        modes.push(row("720p",     1280,  720, 1650, 0,  750, 220, 20,  40, 5, hdtv_pc, VideoGroup::None, ModeFlags::PT));
    }
    if cfg!(feature = "pc") {
        // VESA XGA and SXGA modes
        modes.push(row("1024x768", 1024,  768, 1344, 0,  806, 160, 29, 136, 6, pc,      VideoGroup::None, ModeFlags::PT));
        modes.push(row("1280x1024", 1280, 1024, 1688, 0, 1066, 248, 38, 112, 3, pc,     VideoGroup::None, ModeFlags::PT));
    }
    if cfg!(any(feature = "edtv", feature = "pc")) {
        // PS2 GSM 960i mode
        modes.push(row("640x960i",  640,  480,  800, 0, 1050,  48, 33,  96, 2, edtv_pc, Group1080i, ModeFlags::PT | ModeFlags::L2 | ModeFlags::INTERLACED));
    }
    if cfg!(any(feature = "hdtv", feature = "pc")) {
        // 1080i/p modes
        modes.push(row("1080i",    1920,  540, 2200, 0, 1125, 148, 16,  44, 5, hdtv_pc, Group1080i, ModeFlags::PT | ModeFlags::L2 | ModeFlags::INTERLACED));
        modes.push(row("1080p",    1920, 1080, 2200, 0, 1125, 148, 36,  44, 5, hdtv_pc, VideoGroup::None, ModeFlags::PT));
    }
    if cfg!(feature = "pc") {
        // VESA UXGA with 49 H.backporch cycles exchanged for H.synclen
        modes.push(row("1600x1200", 1600, 1200, 2160, 0, 1250, 255, 46, 241, 3, pc,     VideoGroup::None, ModeFlags::PT));
    }

    modes
}
