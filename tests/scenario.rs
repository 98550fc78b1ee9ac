//! Scenario documents and report formatting

use highlight_overlay::cli::format_report;
use highlight_overlay::config::OutputFormat;
use highlight_overlay::overlay::{HighlightName, HighlightRange, LayerKind, OverlapPolicy};
use highlight_overlay::plan::PaintPlan;
use highlight_overlay::{PaintCase, Scenario};

fn load(content: &str) -> Scenario {
    Scenario::from_yaml(content).unwrap()
}

#[test]
fn test_mixed_sample() {
    let report = load(include_str!("../samples/mixed.yaml"))
        .run(OverlapPolicy::Reject)
        .unwrap();
    assert_eq!(report.case, PaintCase::Overlay);

    let PaintPlan::Overlay { layers, parts } = &report.plan else {
        panic!("expected overlay plan");
    };
    let lint = LayerKind::Custom(HighlightName::new("lint"));
    let search = LayerKind::Custom(HighlightName::new("search"));
    assert_eq!(
        layers,
        &vec![
            LayerKind::Originating,
            lint.clone(),
            search.clone(),
            LayerKind::Spelling,
            LayerKind::Selection,
        ]
    );
    let tops: Vec<_> = parts.iter().map(|p| (p.layer.clone(), p.range)).collect();
    assert_eq!(
        tops,
        vec![
            (lint.clone(), HighlightRange::new(0, 4)),
            (search, HighlightRange::new(4, 10)),
            (LayerKind::Selection, HighlightRange::new(10, 12)),
            (LayerKind::Selection, HighlightRange::new(12, 14)),
            (LayerKind::Selection, HighlightRange::new(14, 18)),
            (LayerKind::Spelling, HighlightRange::new(18, 20)),
            (lint, HighlightRange::new(20, 24)),
        ]
    );
}

#[test]
fn test_spelling_sample_takes_fast_path() {
    let report = load(include_str!("../samples/spelling.yaml"))
        .run(OverlapPolicy::Reject)
        .unwrap();
    assert_eq!(report.case, PaintCase::FastSpellingGrammar);
}

#[test]
fn test_selection_sample_takes_fast_path() {
    let report = load(include_str!("../samples/selection.yaml"))
        .run(OverlapPolicy::Reject)
        .unwrap();
    assert_eq!(
        report.plan,
        PaintPlan::FastSelection {
            selection: HighlightRange::new(20, 30),
            unselected: vec![HighlightRange::new(30, 40)],
        }
    );
}

#[test]
fn test_overlapping_markers_follow_policy() {
    let scenario = load(
        r#"
fragment: { from: 0, to: 10 }
markers:
  - { type: spelling, from: 0, to: 6 }
  - { type: spelling, from: 4, to: 9 }
  - { type: target, from: 8, to: 10 }
"#,
    );
    let err = scenario.run(OverlapPolicy::Reject).unwrap_err();
    assert!(err.to_string().contains("overlapping spelling ranges"), "{}", err);
    assert!(scenario.run(OverlapPolicy::DropHighlight).is_ok());
}

#[test]
fn test_text_report() {
    let report = load(include_str!("../samples/mixed.yaml"))
        .run(OverlapPolicy::Reject)
        .unwrap();
    let text = format_report(&report, OutputFormat::Text).unwrap();
    assert!(text.starts_with("mixed highlights [0, 24): Overlay"), "{}", text);
    assert!(text.contains("[10, 12) selection"), "{}", text);
}

#[test]
fn test_json_report() {
    let report = load(include_str!("../samples/spelling.yaml"))
        .run(OverlapPolicy::Reject)
        .unwrap();
    let json = format_report(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["case"], "fast-spelling-grammar");
    assert_eq!(value["plan"]["case"], "fast-spelling-grammar");
    assert_eq!(value["plan"]["decorations"][0]["layer"], "grammar");
    assert_eq!(value["plan"]["decorations"][1]["range"]["from"], 9);
}

#[test]
fn test_yaml_report() {
    let report = load("name: empty\nfragment: { from: 0, to: 3 }\n")
        .run(OverlapPolicy::Reject)
        .unwrap();
    let yaml = format_report(&report, OutputFormat::Yaml).unwrap();
    assert!(yaml.contains("case: no-highlights"), "{}", yaml);
}
