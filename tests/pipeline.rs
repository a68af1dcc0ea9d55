//! Library-level integration tests: whole documents through the public API.
//!
//! Every test runs in its own temporary project root, so nothing touches the
//! working directory.

use md2tsx::{
    catalog_images, convert, convert_str, run, splice_into_target, ConversionConfig, ImageMap,
    Md2TsxError, RunOutcome,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const COMPONENT: &str = concat!(
    "import React from 'react';\n",
    "\n",
    "export default function Engineering() {\n",
    "  return (\n",
    "  );\n",
    "}\n",
);

struct Project {
    dir: TempDir,
    config: ConversionConfig,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .project_root(dir.path())
            .build()
            .unwrap();
        Self { dir, config }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write_doc(&self, name: &str, text: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn write_component(&self, name: &str, text: &str) -> PathBuf {
        let dir = self.root().join("src").join("contents");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.tsx"));
        fs::write(&path, text).unwrap();
        path
    }
}

fn render(text: &str) -> String {
    convert_str(text, &ImageMap::new(), &ConversionConfig::default())
}

// ── Reference scanning ───────────────────────────────────────────────────────

#[test]
fn test_distinct_images_are_numbered_in_order() {
    let project = Project::new();
    let doc = project.write_doc(
        "success.md",
        "# Gallery\n\n![Front](img/front.jpg)\n\nText ![Back](img/back.webp)\n\n![](img/side.gif)\n",
    );

    let images = catalog_images(&doc, &project.config);

    assert_eq!(images.len(), 3);
    let mut names: Vec<(&str, &str)> = images
        .values()
        .map(|r| (r.original_path.as_str(), r.assigned_name.as_str()))
        .collect();
    names.sort_by_key(|(_, name)| *name);
    assert_eq!(
        names,
        vec![
            ("img/front.jpg", "image_01.png"),
            ("img/back.webp", "image_02.png"),
            ("img/side.gif", "image_03.png"),
        ]
    );
    assert!(images.values().all(|r| r.destination_folder == "success_images"));
    assert!(project.root().join("success_images").is_dir());
}

// ── Line transformation ──────────────────────────────────────────────────────

#[test]
fn test_table_block_shape() {
    let md = "\n\n| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |\n| 4 | 5 | 6 |\n\n";
    let out = render(md);

    assert_eq!(out.matches("<table className=\"converted-table\">").count(), 1);
    assert_eq!(out.matches("</table>").count(), 1);
    assert_eq!(out.matches("<thead>").count(), 1);
    assert_eq!(out.matches("<th>").count(), 3);
    // header row + 2 body rows
    assert_eq!(out.matches("<tr>").count(), 3);
    assert_eq!(out.matches("<td>").count(), 6);
}

#[test]
fn test_blank_line_inside_table_starts_a_new_table() {
    let out = render("| A |\n|---|\n| 1 |\n\n| 2 |");
    assert_eq!(out.matches("<table").count(), 2);
    assert_eq!(out.matches("</table>").count(), 2);
}

#[test]
fn test_dashes_are_a_rule() {
    let out = render("above\n---\nbelow");
    assert_eq!(
        out,
        "<div className=\"Content\">\n  <p>above</p>\n  <hr />\n  <p>below</p>\n</div>"
    );
}

#[test]
fn test_heading_drops_emphasis() {
    let out = render("# Title **bold** and *em*");
    assert!(out.contains("  <h1>Title bold and em</h1>"), "got: {out}");
    assert!(!out.contains("<em>"));
}

#[test]
fn test_paragraph_code_and_link() {
    let out = render("Some `code` and [link](http://x)");
    assert!(out.contains("<code>code</code>"), "got: {out}");
    assert!(out.contains("<a href=\"http://x\">link</a>"), "got: {out}");
    assert!(out.contains("  <p>Some "), "got: {out}");
}

#[test]
fn test_full_document() {
    let md = "# Guide\n\
Intro with **bold** & *style*.\n\
\n\
- first\n\
1. second\n\
> note\n\
***\n\
![Diagram](d.png)";
    let out = render(md);
    let expected = [
        "<div className=\"Content\">",
        "  <h1>Guide</h1>",
        "  <p>Intro with bold &amp; <em>style</em>.</p>",
        "  <br />",
        "  <li>first</li>",
        "  <li>second</li>",
        "  <blockquote>note</blockquote>",
        "  <hr />",
        "  {/* Image: No mapping found */}",
        "  <img src=\"\" alt=\"Diagram\" className=\"medium\" />",
        "</div>",
    ]
    .join("\n");
    assert_eq!(out, expected);
}

#[test]
fn test_missing_document_is_an_error() {
    let project = Project::new();
    let err = convert(project.root().join("absent.md"), &project.config).unwrap_err();
    assert!(matches!(err, Md2TsxError::SourceNotFound { .. }));
}

#[test]
fn test_empty_document_is_not_an_error() {
    let project = Project::new();
    let doc = project.write_doc("empty.md", "");
    let output = convert(&doc, &project.config).unwrap();
    assert_eq!(
        output.markup,
        "<div className=\"Content\">\n  <br />\n</div>"
    );
}

// ── Splicing ─────────────────────────────────────────────────────────────────

#[test]
fn test_splice_without_anchor_leaves_target_byte_identical() {
    let project = Project::new();
    let original = "export const Engineering = () => null;\n";
    let target = project.write_component("engineering", original);

    let err = splice_into_target("<div />", "engineering", &project.config).unwrap_err();

    assert!(matches!(err, Md2TsxError::AnchorNotFound { .. }));
    assert_eq!(fs::read(&target).unwrap(), original.as_bytes());
}

#[test]
fn test_run_splices_into_component() {
    let project = Project::new();
    let target = project.write_component("engineering", COMPONENT);
    let doc = project.write_doc("success.md", "## Done");

    let report = run(&doc, "engineering", &project.config).unwrap();

    assert!(report.outcome.is_spliced());
    assert_eq!(report.outcome.written_path(), &target);
    let expected = concat!(
        "import React from 'react';\n",
        "\n",
        "export default function Engineering() {\n",
        "  return (\n",
        "    <div className=\"Content\">\n",
        "      <h2>Done</h2>\n",
        "    </div>\n",
        "  );\n",
        "}\n",
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), expected);
    assert!(!project.root().join("success.txt").exists());
}

#[test]
fn test_run_twice_inserts_twice() {
    let project = Project::new();
    let target = project.write_component("engineering", COMPONENT);
    let doc = project.write_doc("success.md", "Only once?");

    run(&doc, "engineering", &project.config).unwrap();
    run(&doc, "engineering", &project.config).unwrap();

    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content.matches("<p>Only once?</p>").count(), 2);
    assert_eq!(content.matches("<div className=\"Content\">").count(), 2);
    assert!(content.ends_with("    </div>\n  );\n}\n"));
}

#[test]
fn test_run_writes_fallback_when_anchor_missing() {
    let project = Project::new();
    let original = "export {};\n";
    let target = project.write_component("engineering", original);
    let doc = project.write_doc("success.md", "text");

    let report = run(&doc, "engineering", &project.config).unwrap();

    match report.outcome {
        RunOutcome::FallbackWritten { ref path, ref reason } => {
            assert_eq!(path, &project.root().join("success.txt"));
            assert!(reason.contains("return statement"), "got: {reason}");
        }
        ref other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&target).unwrap(), original);
    assert_eq!(
        fs::read_to_string(project.root().join("success.txt")).unwrap(),
        "<div className=\"Content\">\n  <p>text</p>\n</div>"
    );
}
