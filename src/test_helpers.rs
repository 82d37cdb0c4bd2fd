//! Shared snapshot builders for the formbook test suite.
//!
//! Each builder returns a self-consistent [`Snapshot`] for one fund and one
//! round, varying only in the detail a test cares about: nesting, hidden
//! pages, informational components. Ids are stable strings so tests can
//! reach into the snapshot and break specific references.

use crate::snapshot::Snapshot;
use crate::types::{
    ComponentRecord, ComponentType, FundRecord, LocalisedText, PageRecord, RoundRecord,
    SectionRecord,
};

pub const FUND_ID: &str = "fund-1";
pub const ROUND_ID: &str = "round-1";

fn base_snapshot() -> Snapshot {
    Snapshot {
        funds: vec![FundRecord {
            id: FUND_ID.to_string(),
            short_name: "COF".to_string(),
            title: LocalisedText::new("Community Ownership Fund"),
        }],
        rounds: vec![RoundRecord {
            id: ROUND_ID.to_string(),
            fund_id: FUND_ID.to_string(),
            short_name: "R1".to_string(),
            title: LocalisedText::new("Round 1"),
        }],
        pages: vec![PageRecord {
            id: "p-1".to_string(),
            round_id: ROUND_ID.to_string(),
            index: 1,
            title: LocalisedText::new("Organisation Information"),
            hidden_from_summary: false,
        }],
        sections: vec![SectionRecord {
            id: "s-1".to_string(),
            page_id: "p-1".to_string(),
            index: 1,
            title: LocalisedText::with_cy("About your organisation", "Am eich sefydliad"),
        }],
        components: Vec::new(),
    }
}

fn text_component(id: &str, index: u32, title: &str, hint: Option<&str>) -> ComponentRecord {
    ComponentRecord {
        id: id.to_string(),
        section_id: "s-1".to_string(),
        parent_id: None,
        index,
        component_type: ComponentType::TextField,
        title: LocalisedText::new(title),
        hint: hint.map(LocalisedText::new),
        hide_title: false,
        options: Vec::new(),
    }
}

/// One fund, one round, one page with one section holding a free-text
/// question and a checkbox question. The end-to-end shape from the export
/// contract.
pub fn snapshot_one_round() -> Snapshot {
    let mut snapshot = base_snapshot();
    snapshot.components = vec![
        text_component(
            "c-1",
            1,
            "What is your organisation's name?",
            Some("This must match the registered legal organisation name"),
        ),
        ComponentRecord {
            id: "c-2".to_string(),
            section_id: "s-1".to_string(),
            parent_id: None,
            index: 2,
            component_type: ComponentType::CheckboxesField,
            title: LocalisedText::new("How is your organisation classified?"),
            hint: None,
            hide_title: false,
            options: vec![
                LocalisedText::new("Charity"),
                LocalisedText::new("Public Limited Company"),
            ],
        },
    ];
    snapshot
}

/// As [`snapshot_one_round`], plus a parent component with two children.
pub fn snapshot_with_nested_components() -> Snapshot {
    let mut snapshot = base_snapshot();
    snapshot.components = vec![
        ComponentRecord {
            parent_id: None,
            ..text_component("c-parent", 1, "Parent question", None)
        },
        ComponentRecord {
            parent_id: Some("c-parent".to_string()),
            ..text_component("c-child-1", 1, "First child", None)
        },
        ComponentRecord {
            parent_id: Some("c-parent".to_string()),
            ..text_component("c-child-2", 2, "Second child", None)
        },
    ];
    snapshot
}

/// As [`snapshot_one_round`], plus a second page flagged "do not show on
/// web summary".
pub fn snapshot_with_hidden_page() -> Snapshot {
    let mut snapshot = snapshot_one_round();
    snapshot.pages.push(PageRecord {
        id: "p-hidden".to_string(),
        round_id: ROUND_ID.to_string(),
        index: 0,
        title: LocalisedText::new("Hidden page"),
        hidden_from_summary: true,
    });
    snapshot
}

/// As [`snapshot_one_round`], plus an informational component whose title is
/// hidden and rendered as body text.
pub fn snapshot_with_info_component() -> Snapshot {
    let mut snapshot = snapshot_one_round();
    snapshot.components.push(ComponentRecord {
        id: "c-info".to_string(),
        section_id: "s-1".to_string(),
        parent_id: None,
        index: 0,
        component_type: ComponentType::Para,
        title: LocalisedText::new("Before you start, read the guidance."),
        hint: None,
        hide_title: true,
        options: Vec::new(),
    });
    snapshot
}
