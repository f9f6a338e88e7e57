//! Video timing mode catalog and classifier for scan-converter controllers.
//!
//! An embedded controller sitting between a video digitizer and an FPGA
//! scaler needs to know which of a fixed set of timing standards ("240p",
//! "480i", "720p", ...) the incoming analog signal is, before it can program
//! pixel-clock, sampling and scaling registers. This crate holds the
//! authoritative catalog of supported standards and the classification logic
//! that resolves debounced sync measurements against it.
//!
//! The crate performs no signal acquisition and no register programming; it
//! is the pure decision core between the sync-measurement front end and the
//! hardware configuration path. Measurement debouncing is the caller's job.
//!
//! # Feature Flags
//!
//! The catalog families compiled into [`ModeCatalog::builtin`] are selected
//! at build time (all on by default):
//!
//! - `sdtv`: 240p/288p families, 480i/576i
//! - `edtv`: 360p/384p, 480p/576p class
//! - `hdtv`: 720p, 1080i/1080p
//! - `pc`: VGA, VESA and workstation timings
//! - `serde`: serialization derives on descriptor and mask types
//!
//! # Example
//!
//! ```
//! use scanmode::{ModeCatalog, ModeClassifier, VideoType};
//!
//! // Built once at controller startup, immutable afterwards.
//! let catalog = ModeCatalog::builtin().unwrap();
//! let classifier = ModeClassifier::new(&catalog);
//!
//! // Measurements from the sync front end: 525 total lines, interlaced,
//! // 60 Hz, source known to be a TV-class device.
//! match classifier.classify(525, false, 60, VideoType::SDTV) {
//!     Some(id) => {
//!         let mode = catalog.get(id);
//!         assert_eq!(mode.name, "480i");
//!         // mode.h_total, mode.sampler_phase, ... feed the register path
//!     }
//!     None => { /* unrecognized signal: hold last mode or show no-signal */ }
//! }
//! ```

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod types;

pub use catalog::ModeCatalog;
pub use classifier::ModeClassifier;
pub use error::{CatalogError, CatalogResult};
pub use types::{
    ModeDescriptor, ModeFlags, ModeId, VideoGroup, VideoType, DEFAULT_SAMPLER_PHASE,
    REF_PIXEL_CLOCK_HZ,
};
