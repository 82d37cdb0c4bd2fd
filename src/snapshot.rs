//! Snapshot loading and the read-only storage boundary.
//!
//! A snapshot is a single JSON document holding the flat record collections
//! for one or more funds: funds, rounds, pages, sections, and components.
//! It is produced elsewhere (exported from the authoring database) and is
//! read-only input here — loaded once per invocation, never written back.
//!
//! [`RoundStore`] is the retrieval interface the exporter and the listing
//! views consume: ordered pages-by-round, sections-by-page,
//! components-by-section, and children-by-parent-component. [`Snapshot`]
//! implements it with linear scans, which is plenty for form definitions
//! (tens of pages, hundreds of components).

use crate::types::{ComponentRecord, FundRecord, PageRecord, RoundRecord, SectionRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, read-only retrieval over a form-definition snapshot.
///
/// All `*_for_*` methods return records sorted by their `index` column;
/// `components_for_section` returns top-level components only (children are
/// reached through [`RoundStore::children_of`]).
pub trait RoundStore {
    fn fund(&self, fund_id: &str) -> Option<&FundRecord>;
    fn round(&self, round_id: &str) -> Option<&RoundRecord>;
    /// All rounds in snapshot order, for listing views.
    fn rounds(&self) -> Vec<&RoundRecord>;
    fn pages_for_round(&self, round_id: &str) -> Vec<&PageRecord>;
    fn sections_for_page(&self, page_id: &str) -> Vec<&SectionRecord>;
    /// Top-level components (no parent) of a section, in index order.
    fn components_for_section(&self, section_id: &str) -> Vec<&ComponentRecord>;
    /// Direct children of a component, in index order.
    fn children_of(&self, parent_id: &str) -> Vec<&ComponentRecord>;
    /// Total components belonging to a section, nested ones included.
    /// Compared against the walked count to detect dangling parents.
    fn section_component_count(&self, section_id: &str) -> usize;
}

/// In-memory snapshot deserialized from JSON.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub funds: Vec<FundRecord>,
    pub rounds: Vec<RoundRecord>,
    pub pages: Vec<PageRecord>,
    pub sections: Vec<SectionRecord>,
    pub components: Vec<ComponentRecord>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_str(&content)?)
    }

    /// Parse a snapshot from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Snapshot-wide referential checks, for the `check` command.
    ///
    /// Returns one human-readable message per problem: duplicate ids,
    /// rounds pointing at missing funds, orphaned pages/sections/components,
    /// and parent references that leave another section or do not resolve.
    /// The export path re-checks the single round it walks; this validates
    /// everything up front.
    pub fn integrity_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let fund_ids: HashSet<&str> = self.funds.iter().map(|f| f.id.as_str()).collect();
        let round_ids: HashSet<&str> = self.rounds.iter().map(|r| r.id.as_str()).collect();
        let page_ids: HashSet<&str> = self.pages.iter().map(|p| p.id.as_str()).collect();
        let section_ids: HashSet<&str> = self.sections.iter().map(|s| s.id.as_str()).collect();
        let component_ids: HashSet<&str> = self.components.iter().map(|c| c.id.as_str()).collect();

        if fund_ids.len() != self.funds.len() {
            errors.push("duplicate fund ids in snapshot".to_string());
        }
        if round_ids.len() != self.rounds.len() {
            errors.push("duplicate round ids in snapshot".to_string());
        }
        if page_ids.len() != self.pages.len() {
            errors.push("duplicate page ids in snapshot".to_string());
        }
        if section_ids.len() != self.sections.len() {
            errors.push("duplicate section ids in snapshot".to_string());
        }
        if component_ids.len() != self.components.len() {
            errors.push("duplicate component ids in snapshot".to_string());
        }

        for round in &self.rounds {
            if !fund_ids.contains(round.fund_id.as_str()) {
                errors.push(format!(
                    "round '{}' references missing fund '{}'",
                    round.id, round.fund_id
                ));
            }
        }
        for page in &self.pages {
            if !round_ids.contains(page.round_id.as_str()) {
                errors.push(format!(
                    "page '{}' references missing round '{}'",
                    page.id, page.round_id
                ));
            }
        }
        for section in &self.sections {
            if !page_ids.contains(section.page_id.as_str()) {
                errors.push(format!(
                    "section '{}' references missing page '{}'",
                    section.id, section.page_id
                ));
            }
        }
        for component in &self.components {
            if !section_ids.contains(component.section_id.as_str()) {
                errors.push(format!(
                    "component '{}' references missing section '{}'",
                    component.id, component.section_id
                ));
            }
            if let Some(parent_id) = &component.parent_id {
                match self.components.iter().find(|c| &c.id == parent_id) {
                    None => errors.push(format!(
                        "component '{}' references missing parent '{}'",
                        component.id, parent_id
                    )),
                    Some(parent) if parent.section_id != component.section_id => {
                        errors.push(format!(
                            "component '{}' has parent '{}' in a different section",
                            component.id, parent_id
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        errors
    }
}

impl RoundStore for Snapshot {
    fn fund(&self, fund_id: &str) -> Option<&FundRecord> {
        self.funds.iter().find(|f| f.id == fund_id)
    }

    fn round(&self, round_id: &str) -> Option<&RoundRecord> {
        self.rounds.iter().find(|r| r.id == round_id)
    }

    fn rounds(&self) -> Vec<&RoundRecord> {
        self.rounds.iter().collect()
    }

    fn pages_for_round(&self, round_id: &str) -> Vec<&PageRecord> {
        let mut pages: Vec<&PageRecord> = self
            .pages
            .iter()
            .filter(|p| p.round_id == round_id)
            .collect();
        pages.sort_by_key(|p| p.index);
        pages
    }

    fn sections_for_page(&self, page_id: &str) -> Vec<&SectionRecord> {
        let mut sections: Vec<&SectionRecord> = self
            .sections
            .iter()
            .filter(|s| s.page_id == page_id)
            .collect();
        sections.sort_by_key(|s| s.index);
        sections
    }

    fn components_for_section(&self, section_id: &str) -> Vec<&ComponentRecord> {
        let mut components: Vec<&ComponentRecord> = self
            .components
            .iter()
            .filter(|c| c.section_id == section_id && c.parent_id.is_none())
            .collect();
        components.sort_by_key(|c| c.index);
        components
    }

    fn children_of(&self, parent_id: &str) -> Vec<&ComponentRecord> {
        let mut children: Vec<&ComponentRecord> = self
            .components
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .collect();
        children.sort_by_key(|c| c.index);
        children
    }

    fn section_component_count(&self, section_id: &str) -> usize {
        self.components
            .iter()
            .filter(|c| c.section_id == section_id)
            .count()
    }
}
