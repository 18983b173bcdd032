//! Rule-based accomplishment extraction and recency-aware content rotation.
//!
//! Stride turns a free-form check-in message into structured records and picks
//! motivational content that has not been shown for a while. Both halves are
//! deterministic pure functions over injected data (keyword tables, a content
//! pool, a caller-supplied clock), with randomness confined to the rotation draw.
//!
//! # Extraction
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | **Segment** | whole message | candidate item strings |
//! | **Classify** | one candidate | category, impact, confidence |
//! | **Intent** | whole message | conversation route + confidence |
//! | **Signals** | whole message | mood, energy, timeframe, metrics |
//!
//! # Rotation
//!
//! Items are banded by days since last use, ranked, and drawn with rank-derived
//! weights so the stalest content usually wins without ever becoming certain.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`extract`]: Segmenter, classifier, intent scorer and keyword tables
//! - [`rotation`]: Priority ranking, weighted selection and content stores

pub mod config;
pub mod extract;
pub mod rotation;
