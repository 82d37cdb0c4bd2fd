//! Forward-tree assembly for one round.
//!
//! The snapshot stores the component hierarchy flat, with each child holding
//! a back-reference to its parent. Before rendering, that collection is
//! reassembled into forward child lists: starting from a section's top-level
//! components, children are attached recursively in index order.
//!
//! The walk doubles as the referential check for the export: after building
//! a section, the number of nodes reached is compared with the number of
//! component records belonging to that section. A dangling `parent_id` or a
//! parent cycle leaves components unreachable from the top level, the counts
//! diverge, and the whole export aborts — no partial tree ever reaches the
//! renderer. A cycle cannot make the recursion itself loop: every record has
//! at most one parent, so a node reachable from a parentless root is visited
//! exactly once.

use crate::snapshot::RoundStore;
use crate::types::{ComponentRecord, FundRecord, PageRecord, RoundRecord, SectionRecord};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("unknown round: '{0}'")]
    UnknownRound(String),
    #[error("round '{round}' references missing fund '{fund}'")]
    MissingFund { round: String, fund: String },
    #[error(
        "section '{section}' has unreachable components \
         (reached {reached} of {expected}); missing parent or cycle"
    )]
    UnreachableComponents {
        section: String,
        expected: usize,
        reached: usize,
    },
}

/// One round's content as a forward tree, borrowed from the store.
#[derive(Debug)]
pub struct RoundTree<'a> {
    pub fund: &'a FundRecord,
    pub round: &'a RoundRecord,
    pub pages: Vec<PageNode<'a>>,
}

#[derive(Debug)]
pub struct PageNode<'a> {
    pub record: &'a PageRecord,
    pub sections: Vec<SectionNode<'a>>,
}

#[derive(Debug)]
pub struct SectionNode<'a> {
    pub record: &'a SectionRecord,
    pub components: Vec<ComponentNode<'a>>,
}

#[derive(Debug)]
pub struct ComponentNode<'a> {
    pub record: &'a ComponentRecord,
    pub children: Vec<ComponentNode<'a>>,
}

impl<'a> RoundTree<'a> {
    /// Assemble the full tree for `round_id`.
    ///
    /// Fails if the round does not exist, its fund is missing, or any
    /// section's components cannot all be reached from the top level.
    pub fn assemble(store: &'a impl RoundStore, round_id: &str) -> Result<Self, TreeError> {
        let round = store
            .round(round_id)
            .ok_or_else(|| TreeError::UnknownRound(round_id.to_string()))?;
        let fund = store.fund(&round.fund_id).ok_or_else(|| TreeError::MissingFund {
            round: round.id.clone(),
            fund: round.fund_id.clone(),
        })?;

        let mut pages = Vec::new();
        for page in store.pages_for_round(round_id) {
            let mut sections = Vec::new();
            for section in store.sections_for_page(&page.id) {
                sections.push(assemble_section(store, section)?);
            }
            pages.push(PageNode {
                record: page,
                sections,
            });
        }

        Ok(RoundTree { fund, round, pages })
    }

    /// Pages that take part in the export, in display order.
    ///
    /// The "do not show on web summary" flag is applied here, before
    /// numbering, so heading numbers stay sequential with no gaps.
    pub fn visible_pages(&self) -> Vec<&PageNode<'a>> {
        self.pages
            .iter()
            .filter(|p| !p.record.hidden_from_summary)
            .collect()
    }
}

fn assemble_section<'a>(
    store: &'a impl RoundStore,
    section: &'a SectionRecord,
) -> Result<SectionNode<'a>, TreeError> {
    let mut reached = 0;
    let components = store
        .components_for_section(&section.id)
        .into_iter()
        .map(|c| assemble_component(store, c, &mut reached))
        .collect();

    let expected = store.section_component_count(&section.id);
    if reached != expected {
        return Err(TreeError::UnreachableComponents {
            section: section.id.clone(),
            expected,
            reached,
        });
    }

    Ok(SectionNode {
        record: section,
        components,
    })
}

fn assemble_component<'a>(
    store: &'a impl RoundStore,
    record: &'a ComponentRecord,
    reached: &mut usize,
) -> ComponentNode<'a> {
    *reached += 1;
    let children = store
        .children_of(&record.id)
        .into_iter()
        .map(|c| assemble_component(store, c, reached))
        .collect();
    ComponentNode { record, children }
}
