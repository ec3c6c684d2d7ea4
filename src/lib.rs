//! # clozegen — bulk cloze deletion card generator
//!
//! Joins two sentence corpora through a translation-pair table and, for each
//! translated sentence, hides the least frequent word to produce an
//! Anki-style cloze deletion card (`{{c1::word}}` markup).
//!
//! ## Architecture
//!
//! - **[`config`]** — Run configuration: the four input tables and the output path
//! - **[`index`]** — Delimited-table loaders (sentence, link, and frequency indexes)
//! - **[`cloze`]** — Cloze word selection (`find_cloze`) and its randomness seam
//! - **[`pipeline`]** — Join/dedup/format orchestrator that writes the card table

pub mod cloze;
pub mod config;
pub mod index;
pub mod pipeline;
