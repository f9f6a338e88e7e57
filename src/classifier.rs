//! Sync-measurement to catalog-entry classification.
//!
//! The classifier maps one debounced measurement tuple (total scanlines,
//! progressive flag, integer refresh rate, video-type hint) to the single
//! best-matching catalog entry, or to `None` when the signal is not
//! recognized. `None` is a routine outcome for the caller to handle (hold the
//! last-known-good mode, show a no-signal state); it is never an error.
//!
//! Matching is deterministic and conservative: total line count must match
//! exactly, the interlace gate is never relaxed, and when the remaining
//! evidence cannot separate candidates the classifier refuses to guess, since
//! a wrong pick silently drives the digitizer and scaler with wrong geometry.
//!
//! # Example
//!
//! ```
//! use scanmode::{ModeCatalog, ModeClassifier, VideoType};
//!
//! let catalog = ModeCatalog::builtin().unwrap();
//! let classifier = ModeClassifier::new(&catalog);
//!
//! // NTSC-class 262-line progressive source at 60 Hz
//! let id = classifier.classify(262, true, 60, VideoType::empty()).unwrap();
//! assert_eq!(catalog.get(id).name, "240p");
//!
//! // 525 progressive lines never match the interlaced 480i entry
//! assert!(classifier
//!     .classify(525, true, 60, VideoType::SDTV)
//!     .is_none());
//! ```

use crate::catalog::ModeCatalog;
use crate::types::{ModeDescriptor, ModeId, VideoType, REF_PIXEL_CLOCK_HZ};

/// Stateless classifier over a read-only catalog.
///
/// Each call is a pure, allocation-free, bounded scan of the catalog; the
/// classifier may be shared freely across threads once the catalog is built.
#[derive(Debug, Clone, Copy)]
pub struct ModeClassifier<'a> {
    catalog: &'a ModeCatalog,
}

impl<'a> ModeClassifier<'a> {
    pub fn new(catalog: &'a ModeCatalog) -> ModeClassifier<'a> {
        ModeClassifier { catalog }
    }

    /// Resolve a measurement tuple to a catalog entry.
    ///
    /// Selection proceeds in order:
    ///
    /// 1. Interlace gate: the descriptor's scan structure must equal the
    ///    signal's. Hard filter, never bypassed by line count.
    /// 2. Type filter: the descriptor's type mask must intersect `type_hint`
    ///    (an empty hint means no restriction).
    /// 3. Exact `v_total == total_lines` equality.
    /// 4. Among multiple survivors, the one whose nominal refresh rate is
    ///    closest to `refresh_hz` wins; residual ties go to the first-listed
    ///    entry. When every survivor sits at the same distance the evidence
    ///    is insufficient and the result is `None`.
    pub fn classify(
        &self,
        total_lines: u32,
        is_progressive: bool,
        refresh_hz: u32,
        type_hint: VideoType,
    ) -> Option<ModeId> {
        if total_lines == 0 {
            return None;
        }

        let mut count = 0usize;
        let mut found = None;
        for (idx, mode) in self.catalog.iter().enumerate() {
            if candidate(mode, total_lines, is_progressive, type_hint) {
                count += 1;
                if found.is_none() {
                    found = Some(idx);
                }
            }
        }

        match count {
            0 => {
                tracing::debug!(
                    "no catalog match for {} lines, {}, hint {:#04x}",
                    total_lines,
                    if is_progressive { "progressive" } else { "interlaced" },
                    type_hint.bits()
                );
                None
            }
            1 => found.map(ModeId),
            _ => self.disambiguate(total_lines, is_progressive, refresh_hz, type_hint, count),
        }
    }

    /// Rank same-line-count candidates by refresh proximity.
    fn disambiguate(
        &self,
        total_lines: u32,
        is_progressive: bool,
        refresh_hz: u32,
        type_hint: VideoType,
        count: usize,
    ) -> Option<ModeId> {
        let target_millihz = refresh_hz as u64 * 1_000;
        let mut best: Option<(u64, usize)> = None;
        let mut min_dist = u64::MAX;
        let mut max_dist = 0u64;

        for (idx, mode) in self.catalog.iter().enumerate() {
            if !candidate(mode, total_lines, is_progressive, type_hint) {
                continue;
            }
            let nominal = mode.nominal_refresh_millihz(REF_PIXEL_CLOCK_HZ);
            let dist = nominal.abs_diff(target_millihz);
            min_dist = min_dist.min(dist);
            max_dist = max_dist.max(dist);
            // Strict comparison keeps the first-listed entry on ties.
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, idx));
            }
        }

        if min_dist == max_dist {
            // Refresh proximity separated nothing; refusing beats guessing.
            tracing::warn!(
                "{} candidates for {} lines equidistant from {} Hz, rejecting",
                count,
                total_lines,
                refresh_hz
            );
            return None;
        }

        best.map(|(_, idx)| ModeId(idx))
    }
}

fn candidate(
    mode: &ModeDescriptor,
    total_lines: u32,
    is_progressive: bool,
    type_hint: VideoType,
) -> bool {
    mode.flags.is_interlaced() != is_progressive
        && (type_hint.is_empty() || mode.typ.intersects(type_hint))
        && u32::from(mode.v_total) == total_lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModeFlags, VideoGroup, DEFAULT_SAMPLER_PHASE};

    /// Minimal valid descriptor with the geometry under test.
    fn mode(
        name: &'static str,
        v_total: u16,
        h_total: u16,
        typ: VideoType,
        flags: ModeFlags,
    ) -> ModeDescriptor {
        ModeDescriptor {
            name,
            h_active: 720,
            v_active: 240,
            h_total,
            h_total_adj: 0,
            v_total,
            h_backporch: 57,
            v_backporch: 15,
            h_synclen: 62,
            v_synclen: 3,
            sampler_phase: DEFAULT_SAMPLER_PHASE,
            typ,
            group: VideoGroup::None,
            flags,
        }
    }

    fn name_of(catalog: &ModeCatalog, id: ModeId) -> &'static str {
        catalog.get(id).name
    }

    #[test]
    fn unique_match_ignores_refresh_and_nonrestrictive_hint() {
        let catalog = ModeCatalog::new(vec![mode(
            "240p",
            262,
            858,
            VideoType::SDTV | VideoType::PC,
            ModeFlags::PT | ModeFlags::L2,
        )])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        for hz in [0, 50, 60, 144] {
            let id = classifier.classify(262, true, hz, VideoType::empty()).unwrap();
            assert_eq!(name_of(&catalog, id), "240p");
        }
        let id = classifier
            .classify(262, true, 60, VideoType::SDTV | VideoType::HDTV)
            .unwrap();
        assert_eq!(name_of(&catalog, id), "240p");
    }

    #[test]
    fn interlace_gate_is_never_bypassed() {
        let catalog = ModeCatalog::new(vec![mode(
            "480i",
            525,
            858,
            VideoType::SDTV,
            ModeFlags::PT | ModeFlags::INTERLACED,
        )])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        // 525 progressive lines match the line count but not the scan family.
        assert!(classifier.classify(525, true, 60, VideoType::empty()).is_none());
        let id = classifier.classify(525, false, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "480i");
    }

    #[test]
    fn scan_families_with_shared_line_count_stay_separate() {
        let catalog = ModeCatalog::new(vec![
            mode("480i", 525, 858, VideoType::SDTV, ModeFlags::PT | ModeFlags::INTERLACED),
            mode("480p", 525, 858, VideoType::EDTV, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        let p = classifier.classify(525, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, p), "480p");
        let i = classifier.classify(525, false, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, i), "480i");
    }

    #[test]
    fn restrictive_hint_excludes_all_candidates() {
        let catalog = ModeCatalog::new(vec![mode(
            "720p",
            750,
            1650,
            VideoType::HDTV,
            ModeFlags::PT,
        )])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        assert!(classifier.classify(750, true, 60, VideoType::PC).is_none());
        assert!(classifier
            .classify(750, true, 60, VideoType::HDTV | VideoType::PC)
            .unwrap()
            .index()
            == 0);
    }

    #[test]
    fn refresh_proximity_picks_the_nearest_nominal_rate() {
        // h_total 450 at 500 lines is exactly 60.000 Hz against the reference
        // clock; 451 lands at 59.87 Hz. Listed slow-first to show the choice
        // is proximity, not order.
        let catalog = ModeCatalog::new(vec![
            mode("sync5994", 500, 451, VideoType::PC, ModeFlags::PT),
            mode("sync60", 500, 450, VideoType::PC, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        let id = classifier.classify(500, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "sync60");
    }

    #[test]
    fn residual_tie_goes_to_catalog_order() {
        // Two candidates at the same distance plus one farther away: the
        // first-listed of the tied pair wins.
        let catalog = ModeCatalog::new(vec![
            mode("first", 500, 450, VideoType::PC, ModeFlags::PT),
            mode("second", 500, 450, VideoType::SDTV, ModeFlags::PT),
            mode("far", 500, 500, VideoType::PC, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        let id = classifier.classify(500, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "first");
    }

    #[test]
    fn fully_equidistant_ambiguity_is_rejected() {
        let catalog = ModeCatalog::new(vec![
            mode("a", 500, 450, VideoType::PC, ModeFlags::PT),
            mode("b", 500, 450, VideoType::SDTV, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        assert!(classifier.classify(500, true, 60, VideoType::empty()).is_none());
    }

    #[test]
    fn hint_can_cut_an_ambiguous_set_down_to_one() {
        let catalog = ModeCatalog::new(vec![
            mode("a", 500, 450, VideoType::PC, ModeFlags::PT),
            mode("b", 500, 450, VideoType::SDTV, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        let id = classifier.classify(500, true, 60, VideoType::SDTV).unwrap();
        assert_eq!(name_of(&catalog, id), "b");
    }

    #[test]
    fn classification_is_deterministic() {
        let catalog = ModeCatalog::new(vec![
            mode("wide", 262, 1560, VideoType::SDTV, ModeFlags::PT),
            mode("narrow", 262, 858, VideoType::SDTV, ModeFlags::PT),
        ])
        .unwrap();
        let classifier = ModeClassifier::new(&catalog);

        let first = classifier.classify(262, true, 60, VideoType::empty());
        for _ in 0..100 {
            assert_eq!(classifier.classify(262, true, 60, VideoType::empty()), first);
        }
    }

    #[test]
    fn zero_lines_never_match() {
        let catalog = ModeCatalog::new(vec![mode("240p", 262, 858, VideoType::SDTV, ModeFlags::PT)])
            .unwrap();
        let classifier = ModeClassifier::new(&catalog);
        assert!(classifier.classify(0, true, 60, VideoType::empty()).is_none());
    }

    #[test]
    fn unknown_line_counts_report_no_match() {
        let catalog = ModeCatalog::builtin().unwrap();
        let classifier = ModeClassifier::new(&catalog);
        assert!(classifier.classify(263, true, 60, VideoType::empty()).is_none());
        assert!(classifier.classify(100_000, false, 60, VideoType::empty()).is_none());
    }

    #[cfg(all(feature = "sdtv", feature = "hdtv"))]
    #[test]
    fn builtin_catalog_resolves_common_sources() {
        let catalog = ModeCatalog::builtin().unwrap();
        let classifier = ModeClassifier::new(&catalog);

        // 262-line progressive at 60 Hz: the seven 240p-family widths are
        // separated by nominal refresh, landing on the 858-sample "240p".
        let id = classifier.classify(262, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "240p");

        let id = classifier.classify(525, false, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "480i");

        let id = classifier.classify(625, false, 50, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "576i");

        let id = classifier.classify(750, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "720p");

        let id = classifier.classify(1125, false, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "1080i");

        let id = classifier.classify(1125, true, 60, VideoType::empty()).unwrap();
        assert_eq!(name_of(&catalog, id), "1080p");
    }
}
