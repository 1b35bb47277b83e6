use mdopt_core::{
    DiagramKind, Optimizer, extract_headings, normalize_hierarchy, optimize_markdown,
    parse_yaml_block, remove_noise, split_frontmatter,
};
use serde_json::Value as JsonValue;

const GUIDE: &str = "---
author: me
---

# Deployment Guide


#### Overview
The API Gateway routes each request to a module.

***

## Steps
First, configure the server, then start it.
---
## Services
The billing service depends on the API.";

#[test]
fn optimizes_a_realistic_document() {
    let result = Optimizer::default().optimize(GUIDE, Some("deploy"));
    insta::assert_snapshot!(result.document, @r#"
---
title: "Deployment Guide"
tokens: 46
optimized_for_llm: true
concepts:
  - The
  - API
  - Deployment
  - Guide
  - Overview
toc:
- Deployment Guide
  - Overview
  - Steps
  - Services
suggested_diagrams:
  - section: "Overview"
    type: architecture
  - section: "Steps"
    type: flowchart
  - section: "Services"
    type: graph
---

# Deployment Guide

## Overview
The API Gateway routes each request to a module.

## Steps
First, configure the server, then start it.
## Services
The billing service depends on the API.
"#);
}

#[test]
fn generated_block_reads_back_as_yaml() {
    let out = optimize_markdown("# Notes\nSee the API docs.\n## Next\nThen deploy.", None);
    let split = split_frontmatter(&out);
    let block = split.block.expect("output should lead with front-matter");
    let value = parse_yaml_block(block).expect("generated front-matter should parse");
    assert_eq!(value["title"], "Notes");
    assert_eq!(value["optimized_for_llm"], JsonValue::Bool(true));
    assert_eq!(value["suggested_diagrams"][0]["type"], "flowchart");
    assert_eq!(split.body, "# Notes\nSee the API docs.\n## Next\nThen deploy.");
}

#[test]
fn deep_jump_after_title_is_clamped() {
    let normalized = normalize_hierarchy("# Title\n#### Deep\nText");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let headings = extract_headings(&lines);
    let summary: Vec<(u8, &str)> = headings.iter().map(|h| (h.level, h.text.as_str())).collect();
    assert_eq!(summary, vec![(1, "Title"), (2, "Deep")]);
}

#[test]
fn triple_blank_lines_collapse_to_one() {
    assert_eq!(remove_noise("# A\npara\n\n\n\nnext"), "# A\npara\n\nnext");
}

#[test]
fn process_language_outranks_architecture_language() {
    let result = Optimizer::default().optimize(
        "# Setup\nFirst, configure the server, then start it. Each component reloads.",
        None,
    );
    let diagrams = &result.metadata.suggested_diagrams;
    assert_eq!(diagrams.len(), 1);
    assert_eq!(diagrams[0].kind, DiagramKind::Flowchart);
}

#[test]
fn document_without_headings_uses_identifier() {
    let out = optimize_markdown("just some plain notes", Some("scratch"));
    assert!(out.starts_with("---\ntitle: \"scratch\"\n"));
    assert!(!out.contains("toc:"));
    assert!(!out.contains("suggested_diagrams:"));
}

#[test]
fn rerunning_on_output_does_not_stack_frontmatter() {
    let once = optimize_markdown(GUIDE, Some("deploy"));
    let twice = optimize_markdown(&once, Some("deploy"));
    assert_eq!(twice, once);
    assert_eq!(twice.matches("optimized_for_llm").count(), 1);
}

#[test]
fn block_after_intro_survives_until_the_next_run() {
    let input = "Intro\n---\n***\nkey: v\n---\ntext\n---\nend";
    let once = optimize_markdown(input, Some("notes"));
    assert!(once.ends_with("---\n\nIntro\n---\n***\nkey: v\n---\ntext\nend"));

    // The generated block now owns the first two fences.
    let twice = optimize_markdown(&once, Some("notes"));
    assert!(twice.ends_with("---\n\nIntro\nkey: v\ntext\nend"));
    assert_eq!(optimize_markdown(&twice, Some("notes")), twice);
}

#[test]
fn frontmatter_delimiters_survive_noise_removal() {
    let cleaned = remove_noise("---\ntitle: x\n---\n\n---\nBody");
    assert_eq!(cleaned, "---\ntitle: x\n---\n\nBody");
}
