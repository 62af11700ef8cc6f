//! Integration tests for the BoardBuilder API
//!
//! These tests drive boards through parsing, layout and rendering using only
//! the public API.

use corkboard::{
    BoardBuilder, CorkboardError,
    config::{AppConfig, StyleConfig},
};

const PROCESS_BOARD: &str = r#"
[annotations]
track_width = 1200.0
items = [
    { text = "Problem Framing", axis_position = 0.01, vertical_offset = -210, category = "design-thinking" },
    { text = "Stakeholder Interviews", axis_position = 0.12, vertical_offset = -90, category = "design-thinking" },
    { text = "Backlog Grooming", axis_position = 0.40, category = "agile" },
    { text = "Sprint Planning", axis_position = 0.42, category = "agile" },
    { text = "Daily Standups", axis_position = 0.44, category = "agile" },
    { text = "Usability Testing", axis_position = 0.80, vertical_offset = 60 },
]
"#;

#[test]
fn test_parse_empty_board() {
    let board = BoardBuilder::default().parse("").unwrap();

    assert!(board.is_empty());
}

#[test]
fn test_render_empty_board() {
    let builder = BoardBuilder::default();
    let board = builder.parse("").unwrap();

    let svg = builder.render_svg(&board).unwrap();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_process_board_layout() {
    let builder = BoardBuilder::default();
    let board = builder.parse(PROCESS_BOARD).unwrap();

    let layout = builder.layout(&board);
    let annotations = layout.annotations().unwrap();
    let items = annotations.items();

    assert_eq!(items.len(), 6);
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item.index, index);
    }
    // Offsets move in whole steps of the vertical gap.
    let sprint = &items[3];
    assert_eq!(sprint.text, "Sprint Planning");
    assert_eq!(sprint.vertical_offset % 64, 0);
    // Items are clamped to the configured range before layout.
    assert_eq!(items[0].vertical_offset, -120);
}

#[test]
fn test_crowded_labels_are_separated() {
    let builder = BoardBuilder::default();
    let board = builder.parse(PROCESS_BOARD).unwrap();

    let layout = builder.layout(&board);
    let offsets: Vec<i32> = layout.annotations().unwrap().items()[2..5]
        .iter()
        .map(|item| item.vertical_offset)
        .collect();

    let mut distinct = offsets.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 3, "agile labels share a row: {offsets:?}");
}

#[test]
fn test_render_full_board() {
    let source = format!(
        "{PROCESS_BOARD}{}",
        r#"
[[timeline.events]]
title = "Product Strategist"
organization = "Kellton"
start = { year = 2022, month = 8 }
end = { year = 2024, month = 10 }

[[timeline.milestones]]
year = 2023
title = "Certified Scrum Master"
organization = "Scrum Alliance"

[evidence]
hub = "Career Goals"
parents = [{ id = "strategy", label = "Strategic Thinking" }]
children = [{ id = "roadmap", label = "Roadmaps", parent = "strategy", color = "pink" }]

[[stickies]]
text = "Design Thinking"
color = "pink"
"#
    );

    let builder = BoardBuilder::default();
    let board = builder.parse(&source).unwrap();
    let svg = builder.render_svg(&board).unwrap();

    for text in [
        "Problem Framing",
        "Product Strategist",
        "Certified Scrum Master",
        "Career Goals",
        "Roadmaps",
        "Design Thinking",
    ] {
        assert!(svg.contains(text), "missing `{text}`");
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let builder = BoardBuilder::default();
    let board = builder
        .parse("[[stickies]]\ntext = \"A\"\n[[stickies]]\ntext = \"B\"\n")
        .unwrap();

    assert_eq!(
        builder.render_svg(&board).unwrap(),
        builder.render_svg(&board).unwrap()
    );
}

#[test]
fn test_parse_invalid_syntax_returns_error() {
    let result = BoardBuilder::default().parse("[annotations\ntrack_width = ");

    match result {
        Err(CorkboardError::Parse { err, src }) => {
            assert!(err.span().is_some());
            assert!(src.starts_with("[annotations"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_board_returns_error() {
    let source = r#"
        [[timeline.events]]
        title = "Analyst"
        organization = "Acme"
        start = { year = 2020, month = 0 }
        end = { year = 2021 }
    "#;

    let result = BoardBuilder::default().parse(source);

    assert!(matches!(result, Err(CorkboardError::Board(_))));
}

#[test]
fn test_invalid_style_returns_config_error() {
    let config = AppConfig::new(
        Default::default(),
        StyleConfig::default().with_category_color("agile", "definitely-not-a-color"),
    );
    let builder = BoardBuilder::new(config);
    let board = builder.parse(PROCESS_BOARD).unwrap();

    let result = builder.render_svg(&board);

    assert!(matches!(result, Err(CorkboardError::Config(_))));
}
