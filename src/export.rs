//! The "all questions" export: one static HTML artifact per round per locale.
//!
//! Walks a round's page → section → component tree and flattens it into a
//! single numbered document: a table of contents, then per page a numbered
//! heading with an anchor, per section an unnumbered sub-heading, and per
//! component a question heading plus a body that depends on the component
//! type. The body is wrapped in a fixed prefix/suffix page shell and written
//! to
//!
//! ```text
//! <output_root>/<round_short_name>/html/
//!     <fund_short_name>_<round_short_name>_all_questions_<locale>.html
//! ```
//!
//! ## Failure semantics
//!
//! Any unresolvable reference aborts the whole export before anything
//! touches the filesystem: every locale's artifact is rendered to a string
//! first, then each file is written to a `.tmp` sibling and renamed into
//! place, and temp files are removed if a write fails. Rerunning the export
//! simply overwrites the previous artifacts.
//!
//! Concurrent exports of the same round serialize on a per-round lock;
//! exports of different rounds do not contend.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::ExportConfig;
use crate::headings::{slugify, strip_leading_numbers};
use crate::snapshot::RoundStore;
use crate::tree::{ComponentNode, PageNode, RoundTree, TreeError};
use crate::types::{FundRecord, Locale, RoundRecord};
use maud::{Markup, html};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use thiserror::Error;

/// Fixed page shell around the generated body, supplied by the frontend
/// templates. Embedded at compile time, the same way static assets are.
pub const HTML_PREFIX: &str = include_str!("../static/all_questions_prefix.html");
pub const HTML_SUFFIX: &str = include_str!("../static/all_questions_suffix.html");

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("round id is required")]
    MissingRoundId,
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export one round to static HTML, one artifact per configured locale.
///
/// Returns the paths written, in locale order. `round_id` of `None` or one
/// that resolves to no round is an immediate error; so is any broken
/// reference found while walking the tree — in both cases nothing is
/// written.
pub fn generate_all_round_html(
    store: &impl RoundStore,
    round_id: Option<&str>,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    let round_id = round_id.ok_or(ExportError::MissingRoundId)?;
    let tree = RoundTree::assemble(store, round_id)?;

    // Render everything up front so referential or rendering problems can
    // never leave a partial artifact behind.
    let mut artifacts: Vec<(PathBuf, String)> = Vec::new();
    for locale in &config.locales {
        let body = render_round_body(&tree, *locale, config.show_field_types);
        let content = format!("{HTML_PREFIX}{}{HTML_SUFFIX}", body.into_string());
        artifacts.push((artifact_path(config, tree.fund, tree.round, *locale), content));
    }

    let lock = round_lock(round_id);
    let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    write_atomically(&artifacts)?;

    Ok(artifacts.into_iter().map(|(path, _)| path).collect())
}

/// Output location for one round/locale artifact. Short names are
/// lower-cased in the filename.
pub fn artifact_path(
    config: &ExportConfig,
    fund: &FundRecord,
    round: &RoundRecord,
    locale: Locale,
) -> PathBuf {
    config
        .output_root
        .join(&round.short_name)
        .join("html")
        .join(format!(
            "{}_{}_all_questions_{}.html",
            fund.short_name.to_lowercase(),
            round.short_name.to_lowercase(),
            locale.tag()
        ))
}

/// Serialize concurrent exports of the same round. Locks are keyed by round
/// id and live for the process lifetime; the registry only ever holds one
/// entry per round exported so far.
fn round_lock(round_id: &str) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<String, Arc<Mutex<()>>>>> = OnceLock::new();
    let registry = LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.entry(round_id.to_string()).or_default().clone()
}

/// Write every artifact to a `.tmp` sibling, then rename all into place.
/// On failure, temp files written so far are removed.
fn write_atomically(artifacts: &[(PathBuf, String)]) -> std::io::Result<()> {
    let mut temps: Vec<PathBuf> = Vec::new();

    let result: std::io::Result<()> = (|| {
        for (path, content) in artifacts {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp = temp_path(path);
            fs::write(&tmp, content)?;
            temps.push(tmp);
        }
        for ((path, _), tmp) in artifacts.iter().zip(&temps) {
            fs::rename(tmp, path)?;
        }
        Ok(())
    })();

    if result.is_err() {
        for tmp in &temps {
            let _ = fs::remove_file(tmp);
        }
    }
    result
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Render the flattened body for one locale.
///
/// Hidden pages are dropped before numbering, so the heading sequence is
/// 1, 2, 3... with no gaps regardless of exclusions.
pub fn render_round_body(tree: &RoundTree, locale: Locale, show_field_types: bool) -> Markup {
    // (anchor, normalized title, page) per visible page; anchors double as
    // the TOC link targets.
    let entries: Vec<(String, String, &PageNode)> = tree
        .visible_pages()
        .into_iter()
        .map(|page| {
            let title = strip_leading_numbers(page.record.title.text(locale));
            (slugify(&title), title, page)
        })
        .collect();

    html! {
        div class="govuk-!-margin-bottom-8" {
            (render_toc(&entries))
            @for (idx, (anchor, title, page)) in entries.iter().enumerate() {
                hr class="govuk-section-break govuk-section-break--l govuk-section-break--visible";
                (render_page(page, idx + 1, anchor, title, locale, show_field_types))
            }
        }
    }
}

fn render_toc(entries: &[(String, String, &PageNode)]) -> Markup {
    html! {
        h2 class="govuk-heading-m" { "Table of contents" }
        ol class="govuk-list govuk-list--number" {
            @for (anchor, title, _) in entries {
                li {
                    a class="govuk-link" href={ "#" (anchor) } { (title) }
                }
            }
        }
    }
}

fn render_page(
    page: &PageNode,
    number: usize,
    anchor: &str,
    title: &str,
    locale: Locale,
    show_field_types: bool,
) -> Markup {
    html! {
        h2 class="govuk-heading-l" id=(anchor) { (number) ". " (title) }
        @for (idx, section) in page.sections.iter().enumerate() {
            @if idx > 0 {
                hr class="govuk-section-break govuk-section-break--m govuk-section-break--visible";
            }
            h3 class="govuk-heading-m" { (section.record.title.text(locale)) }
            @for component in &section.components {
                (render_component(component, 0, locale, show_field_types))
            }
        }
    }
}

/// Render a component and, one heading level deeper each, its children.
fn render_component(
    node: &ComponentNode,
    depth: usize,
    locale: Locale,
    show_field_types: bool,
) -> Markup {
    let record = node.record;
    let title = record.title.text(locale);

    html! {
        @if !record.hide_title {
            @if show_field_types {
                (component_heading(depth, &format!("{title} [{}]", record.component_type.tag())))
            } @else {
                (component_heading(depth, title))
            }
        }
        div class="govuk-body all-questions-component" {
            // Informational components keep their text in the body instead
            // of a heading.
            @if record.hide_title {
                p class="govuk-body" { (title) }
            }
            @if let Some(hint) = &record.hint {
                p class="govuk-body" { (hint.text(locale)) }
            }
            @if record.component_type.is_selection() {
                ul class="govuk-list govuk-list--bullet" {
                    @for option in &record.options {
                        li { (option.text(locale)) }
                    }
                }
            }
        }
        @for child in &node.children {
            (render_component(child, depth + 1, locale, show_field_types))
        }
    }
}

/// Top-level components get `<h4>`; each nesting level steps one deeper,
/// capped at `<h6>`.
fn component_heading(depth: usize, text: &str) -> Markup {
    match depth {
        0 => html! { h4 class="govuk-heading-s" { (text) } },
        1 => html! { h5 class="govuk-heading-s" { (text) } },
        _ => html! { h6 class="govuk-heading-s" { (text) } },
    }
}

// ============================================================================
// Tests
// ============================================================================
