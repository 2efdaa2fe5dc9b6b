//! `feapost` is a semi-modular toolkit for post-processing FEAP finite element
//! output
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use feapost_utils as utils;

#[cfg(feature = "series")]
#[cfg_attr(docsrs, doc(cfg(feature = "series")))]
#[doc(inline)]
pub use feapost_series as series;

#[cfg(feature = "vtu")]
#[cfg_attr(docsrs, doc(cfg(feature = "vtu")))]
#[doc(inline)]
pub use feapost_vtu as vtu;

#[cfg(feature = "refactor")]
#[cfg_attr(docsrs, doc(cfg(feature = "refactor")))]
#[doc(inline)]
pub use feapost_refactor as refactor;

#[cfg(feature = "volume")]
#[cfg_attr(docsrs, doc(cfg(feature = "volume")))]
#[doc(inline)]
pub use feapost_volume as volume;
