//! # formbook
//!
//! Static HTML exporter and table pager for grant-application form
//! definitions. A form definition is a nested hierarchy — fund → round →
//! pages → sections → components — authored in an admin tool and persisted
//! flat; formbook consumes a read-only JSON snapshot of those records and
//! flattens each round into a static, numbered, human-readable "all
//! questions" document, one artifact per locale.
//!
//! # Architecture: Snapshot → Tree → Artifact
//!
//! ```text
//! 1. Load      snapshot.json  →  flat records      (serde, read-only)
//! 2. Assemble  flat records   →  forward tree      (arena + parent index)
//! 3. Flatten   tree           →  numbered HTML     (maud, per locale)
//! ```
//!
//! The stages are separate for the same reasons the tree is rebuilt rather
//! than walked via back-references: each step is a pure function of its
//! input, referential problems surface before any file is written, and unit
//! tests can exercise rendering without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Shared snapshot record types (`FundRecord`..`ComponentRecord`, `LocalisedText`, `ComponentType`) |
//! | [`snapshot`] | JSON snapshot loading and the [`snapshot::RoundStore`] retrieval boundary |
//! | [`tree`] | Forward-tree assembly from parent back-references, with referential checks |
//! | [`headings`] | Leading-number stripping and anchor slugs for heading titles |
//! | [`export`] | The flattener — renders and atomically writes per-locale HTML artifacts |
//! | [`pager`] | Pure table pagination and the `TablePage` view model for listing views |
//! | [`config`] | `formbook.toml` loading, validation, and the stock config |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system: malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship or get out of
//! sync with the code.
//!
//! ## Forward Tree From Back-References
//!
//! Components are persisted flat, each child holding its parent's id.
//! Rendering wants forward child lists, so [`tree`] rebuilds them once per
//! export and treats the result as read-only. The same walk proves every
//! record reachable — a dangling parent or a cycle aborts the export before
//! any output exists.
//!
//! ## Lenient Pagination
//!
//! Listing views are driven by a raw `?page=` query parameter. An
//! out-of-range page is not an error: [`pager::paginate`] returns an empty
//! row slice and keeps emitting previous/next links from the same
//! comparisons. Stale links degrade instead of failing.

pub mod config;
pub mod export;
pub mod headings;
pub mod pager;
pub mod snapshot;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
