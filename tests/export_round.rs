//! End-to-end export tests: JSON snapshot on disk → per-locale HTML
//! artifacts in a temp directory.

use formbook::config::ExportConfig;
use formbook::export::{HTML_PREFIX, HTML_SUFFIX, generate_all_round_html};
use formbook::snapshot::Snapshot;
use formbook::types::Locale;
use tempfile::TempDir;

const SNAPSHOT_JSON: &str = r#"{
  "funds": [
    {
      "id": "fund-ctdf",
      "short_name": "CTDF",
      "title": { "en": "Community Testing Fund", "cy": "Cronfa Brofi Gymunedol" }
    }
  ],
  "rounds": [
    {
      "id": "round-ctdf-1",
      "fund_id": "fund-ctdf",
      "short_name": "TEST",
      "title": { "en": "Test Round" }
    }
  ],
  "pages": [
    {
      "id": "page-org",
      "round_id": "round-ctdf-1",
      "index": 1,
      "title": { "en": "1.1 Organisation Information", "cy": "1.1 Gwybodaeth am y sefydliad" }
    },
    {
      "id": "page-skip",
      "round_id": "round-ctdf-1",
      "index": 2,
      "title": { "en": "Internal notes" },
      "hidden_from_summary": true
    },
    {
      "id": "page-risk",
      "round_id": "round-ctdf-1",
      "index": 3,
      "title": { "en": "2. Risk" }
    }
  ],
  "sections": [
    {
      "id": "section-about",
      "page_id": "page-org",
      "index": 1,
      "title": { "en": "About your organisation" }
    },
    {
      "id": "section-risk",
      "page_id": "page-risk",
      "index": 1,
      "title": { "en": "Risk and deliverability" }
    }
  ],
  "components": [
    {
      "id": "comp-name",
      "section_id": "section-about",
      "index": 1,
      "type": "TextField",
      "title": { "en": "What is your organisation's name?" },
      "hint": { "en": "This must match the registered legal organisation name" }
    },
    {
      "id": "comp-class",
      "section_id": "section-about",
      "index": 2,
      "type": "CheckboxesField",
      "title": { "en": "How is your organisation classified?" },
      "options": [
        { "en": "Charity", "cy": "Elusen" },
        { "en": "Public Limited Company" }
      ]
    },
    {
      "id": "comp-risk-parent",
      "section_id": "section-risk",
      "index": 1,
      "type": "MultiInputField",
      "title": { "en": "Tell us about your risks" }
    },
    {
      "id": "comp-risk-child",
      "section_id": "section-risk",
      "parent_id": "comp-risk-parent",
      "index": 1,
      "type": "FreeTextField",
      "title": { "en": "How will you mitigate them?" }
    }
  ]
}"#;

fn load_snapshot(dir: &TempDir) -> Snapshot {
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, SNAPSHOT_JSON).unwrap();
    Snapshot::load(&path).unwrap()
}

fn config_for(dir: &TempDir) -> ExportConfig {
    ExportConfig {
        output_root: dir.path().join("output"),
        ..ExportConfig::default()
    }
}

#[test]
fn exports_full_round_from_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir);
    let config = config_for(&dir);

    let paths = generate_all_round_html(&snapshot, Some("round-ctdf-1"), &config).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(
        paths[0].ends_with("TEST/html/ctdf_test_all_questions_en.html"),
        "unexpected path {}",
        paths[0].display()
    );

    let content = std::fs::read_to_string(&paths[0]).unwrap();
    assert!(content.starts_with(HTML_PREFIX));
    assert!(content.ends_with(HTML_SUFFIX));

    // Hidden page dropped before numbering: authored prefixes stripped,
    // canonical numbers sequential with no gap.
    assert!(content.contains(">1. Organisation Information</h2>"));
    assert!(content.contains(">2. Risk</h2>"));
    assert!(!content.contains("Internal notes"));

    // TOC entries anchor to the numbered pages.
    assert!(content.contains(r##"href="#organisation-information""##));
    assert!(content.contains(r##"href="#risk""##));

    // Selection options as bullets; nested child one level deeper.
    assert!(content.contains("<li>Charity</li>"));
    assert!(content.contains("<h5 class=\"govuk-heading-s\">How will you mitigate them?</h5>"));
}

#[test]
fn welsh_locale_writes_parallel_artifact() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir);
    let config = ExportConfig {
        locales: vec![Locale::En, Locale::Cy],
        ..config_for(&dir)
    };

    let paths = generate_all_round_html(&snapshot, Some("round-ctdf-1"), &config).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[1].ends_with("TEST/html/ctdf_test_all_questions_cy.html"));

    let welsh = std::fs::read_to_string(&paths[1]).unwrap();
    // Translated where available, English fallback elsewhere.
    assert!(welsh.contains(">1. Gwybodaeth am y sefydliad</h2>"));
    assert!(welsh.contains("<li>Elusen</li>"));
    assert!(welsh.contains("<li>Public Limited Company</li>"));
}

#[test]
fn export_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir);
    let config = config_for(&dir);

    let first = generate_all_round_html(&snapshot, Some("round-ctdf-1"), &config).unwrap();
    let before = std::fs::read_to_string(&first[0]).unwrap();
    let second = generate_all_round_html(&snapshot, Some("round-ctdf-1"), &config).unwrap();
    let after = std::fs::read_to_string(&second[0]).unwrap();

    assert_eq!(before, after);
    let html_dir = first[0].parent().unwrap();
    assert_eq!(
        std::fs::read_dir(html_dir).unwrap().count(),
        1,
        "rerun must overwrite, not accumulate"
    );
}

#[test]
fn missing_round_id_fails_before_touching_disk() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir);
    let config = config_for(&dir);

    assert!(generate_all_round_html(&snapshot, None, &config).is_err());
    assert!(generate_all_round_html(&snapshot, Some("round-unknown"), &config).is_err());
    assert!(!config.output_root.exists());
}

#[test]
fn concurrent_exports_of_the_same_round_serialize() {
    let dir = TempDir::new().unwrap();
    let snapshot = load_snapshot(&dir);
    let config = config_for(&dir);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                generate_all_round_html(&snapshot, Some("round-ctdf-1"), &config).unwrap();
            });
        }
    });

    let path = config
        .output_root
        .join("TEST")
        .join("html")
        .join("ctdf_test_all_questions_en.html");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(HTML_PREFIX));
    assert!(content.ends_with(HTML_SUFFIX));
    // Only the final artifact remains, no stranded temp files.
    assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
}
