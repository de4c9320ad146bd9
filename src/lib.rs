//! # oustdom - Cumulative Domain Blocklist Aggregator
//!
//! Aggregates domain blocklists from multiple public sources into
//! per-category, cumulative, deduplicated lists. Heterogeneous raw formats
//! (hosts-file syntax, AdGuard filter syntax, CSV exports, plain domains)
//! are normalized to one canonical domain per line and merged into an
//! append-only corpus: once a domain enters a list it is never removed.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        oustdom                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: build, categories, init, version           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Categories: gambling, suspicious, malicious, adult   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Raw source lines, per-source success/error status    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Normalizer (regex + url)                                   │
//! │    └── Raw line -> canonical domain, silent rejection       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Merger                                                     │
//! │    └── Append-only set union, alphabetical order            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Corpus + Stats + README (atomic writes, JSON, markdown)    │
//! │    └── The blocklist file IS the persisted corpus           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::collections::HashSet;
//! use oustdom::normalizer::process_lines;
//! use oustdom::merger::merge;
//!
//! let raw = ["# hosts list", "0.0.0.0 ads.example.com", "||tracker.example.net^"];
//! let (incoming, priority) = process_lines(raw, &[], None);
//!
//! let existing: HashSet<String> = HashSet::new();
//! let (domains, stats) = merge(&existing, &incoming, &priority);
//! assert_eq!(domains.len(), stats.total_count);
//! ```
//!
//! ## Invariants
//!
//! - **Append-only** - a merged list is always a superset of the previous one
//! - **Deduplicated** - a domain appears at most once per list
//! - **Canonical** - every entry satisfies the domain grammar; two spellings
//!   of the same domain cannot coexist
//! - **Partial-failure tolerant** - a malformed line or a dead source never
//!   aborts a batch or another category
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`corpus`] - Blocklist file persistence (load/save)
//! - [`error`] - Fatal CLI-layer error types
//! - [`fetcher`] - HTTP client for downloading raw sources
//! - [`fs_abstraction`] - Filesystem trait for testability
//! - [`merger`] - Append-only merging with merge statistics
//! - [`normalizer`] - Raw line to canonical domain normalization
//! - [`readme`] - README generation from statistics
//! - [`stats`] - Statistics JSON persistence
//! - [`utils`] - Common utility functions (formatting, truncation)

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetcher;
pub mod fs_abstraction;
pub mod merger;
pub mod normalizer;
pub mod readme;
pub mod stats;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
