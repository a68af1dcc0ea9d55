//! Line-by-line Markdown → JSX transformation.
//!
//! Each trimmed input line is classified into exactly one [`Block`] and
//! rendered independently. The only state carried between lines is whether a
//! `<table>` is currently open: consecutive pipe rows extend it, anything
//! else closes it.
//!
//! ## Priority order
//!
//! Classification tries, in order: blank, table row, heading, image, bullet
//! item, numbered item, blockquote, horizontal rule, and finally paragraph.
//! The first rule that matches wins, so `| # |` is a table row, not a heading,
//! and `---` is a rule only because it has no pipe and no space after the
//! dash.

use crate::config::ConversionConfig;
use crate::pipeline::images::{ImageMap, RE_IMAGE};
use crate::pipeline::inline;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[|\s\-:]+$").unwrap());

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)").unwrap());

static RE_UNORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s+").unwrap());

static RE_ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+").unwrap());

static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*_]{3,}$").unwrap());

/// A classified source line. Borrowed slices point into the trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Blank,
    /// `|---|:--:|` between table header and body; produces no output.
    TableSeparator,
    /// Cells with the outer empty cells already dropped.
    TableRow(Vec<&'a str>),
    Heading { level: usize, text: &'a str },
    Image { alt: &'a str, path: &'a str },
    UnorderedItem(&'a str),
    OrderedItem(&'a str),
    Blockquote(&'a str),
    Rule,
    Paragraph(&'a str),
}

/// Classify one already-trimmed line.
pub fn classify(line: &str) -> Block<'_> {
    if line.is_empty() {
        return Block::Blank;
    }

    if line.contains('|') && !line.starts_with('#') {
        if RE_TABLE_SEPARATOR.is_match(line) {
            return Block::TableSeparator;
        }
        return Block::TableRow(split_cells(line));
    }

    if let Some(caps) = RE_HEADING.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.as_str().len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Block::Heading { level, text };
    }

    if let Some(caps) = RE_IMAGE.captures(line) {
        let alt = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str());
        return Block::Image { alt, path };
    }

    if let Some(m) = RE_UNORDERED.find(line) {
        return Block::UnorderedItem(&line[m.end()..]);
    }

    if let Some(m) = RE_ORDERED.find(line) {
        return Block::OrderedItem(&line[m.end()..]);
    }

    if let Some(rest) = line.strip_prefix('>') {
        return Block::Blockquote(rest.trim());
    }

    if RE_RULE.is_match(line) {
        return Block::Rule;
    }

    Block::Paragraph(line)
}

fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Counters collected while transforming a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    /// Lines read from the document (including blank ones).
    pub source_lines: usize,
    /// Lines of markup produced, wrapper included.
    pub markup_lines: usize,
    /// Tables opened.
    pub tables: usize,
    /// Heading elements emitted.
    pub headings: usize,
    /// Image placeholders emitted.
    pub images_referenced: usize,
    /// Image placeholders whose path had no catalog entry.
    pub images_unmapped: usize,
}

/// Result of [`transform_document`].
#[derive(Debug, Clone)]
pub struct Transformed {
    /// Complete markup, wrapped in the container `<div>`.
    pub markup: String,
    pub counts: BlockCounts,
}

/// Accumulates markup lines and owns the table toggle.
struct MarkupWriter<'a> {
    config: &'a ConversionConfig,
    images: &'a ImageMap,
    lines: Vec<String>,
    in_table: bool,
    counts: BlockCounts,
}

impl<'a> MarkupWriter<'a> {
    fn new(config: &'a ConversionConfig, images: &'a ImageMap) -> Self {
        Self {
            config,
            images,
            lines: Vec::new(),
            in_table: false,
            counts: BlockCounts::default(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn close_table(&mut self) {
        if self.in_table {
            self.push("  </table>");
            self.in_table = false;
        }
    }

    fn write(&mut self, block: Block<'_>) {
        if !matches!(block, Block::TableSeparator | Block::TableRow(_)) {
            self.close_table();
        }

        match block {
            Block::TableSeparator => {}
            Block::TableRow(cells) => self.write_table_row(&cells),
            Block::Blank => self.push("  <br />"),
            Block::Heading { level, text } => {
                self.counts.headings += 1;
                let text = inline::render_heading(text);
                self.push(format!("  <h{level}>{text}</h{level}>"));
            }
            Block::Image { alt, path } => self.write_image(alt, path),
            Block::UnorderedItem(text) | Block::OrderedItem(text) => {
                self.push(format!("  <li>{}</li>", inline::escape_attr(text)));
            }
            Block::Blockquote(text) => {
                self.push(format!(
                    "  <blockquote>{}</blockquote>",
                    inline::escape_attr(text)
                ));
            }
            Block::Rule => self.push("  <hr />"),
            Block::Paragraph(text) => {
                self.push(format!("  <p>{}</p>", inline::render_paragraph(text)));
            }
        }
    }

    fn write_table_row(&mut self, cells: &[&str]) {
        if !self.in_table {
            let open = format!("  <table className=\"{}\">", self.config.table_class);
            self.push(open);
            self.push("    <thead>");
            self.push("      <tr>");
            for cell in cells {
                self.push(format!("        <th>{}</th>", inline::escape_attr(cell)));
            }
            self.push("      </tr>");
            self.push("    </thead>");
            self.in_table = true;
            self.counts.tables += 1;
        } else {
            self.push("    <tr>");
            for cell in cells {
                self.push(format!("      <td>{}</td>", inline::render_cell(cell)));
            }
            self.push("    </tr>");
        }
    }

    fn write_image(&mut self, alt: &str, path: &str) {
        self.counts.images_referenced += 1;
        let comment = match self.images.get(path) {
            Some(image) => format!("  {{/* Image: {} */}}", image.destination()),
            None => {
                self.counts.images_unmapped += 1;
                "  {/* Image: No mapping found */}".to_string()
            }
        };
        self.push(comment);

        let alt = if alt.is_empty() {
            "placeholder".to_string()
        } else {
            inline::escape_attr(alt)
        };
        let img = format!(
            "  <img src=\"\" alt=\"{alt}\" className=\"{}\" />",
            self.config.image_class
        );
        self.push(img);
    }

    fn finish(mut self) -> Transformed {
        self.close_table();
        self.push("</div>");
        self.counts.markup_lines = self.lines.len();
        Transformed {
            markup: self.lines.join("\n"),
            counts: self.counts,
        }
    }
}

/// Transform a whole document into wrapped JSX markup.
pub fn transform_document(
    text: &str,
    images: &ImageMap,
    config: &ConversionConfig,
) -> Transformed {
    let mut writer = MarkupWriter::new(config, images);
    writer.push(format!("<div className=\"{}\">", config.container_class));

    for raw in text.split('\n') {
        writer.counts.source_lines += 1;
        writer.write(classify(raw.trim()));
    }

    writer.finish()
}

/// Transform a document and return only the markup.
pub fn convert_str(text: &str, images: &ImageMap, config: &ConversionConfig) -> String {
    transform_document(text, images, config).markup
}
