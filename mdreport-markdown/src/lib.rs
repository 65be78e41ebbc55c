//! # mdreport-markdown
//!
//! A small, line-oriented Markdown to HTML converter built for turning a
//! known corpus of architecture documents into static report sections. It
//! deliberately implements only the subset of Markdown those documents use.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdreport_markdown::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Hello World\n\nThis is **bold** text.");
//!
//! assert!(result.html.contains(r#"<h1 id="hello-world">"#));
//! assert_eq!(result.title.as_deref(), Some("Hello World"));
//! ```
//!
//! ## Pipeline
//!
//! 1. Fenced blocks are pulled out and replaced with inert placeholders
//!    ([`extract`]).
//! 2. The remaining text goes through a line-by-line block converter
//!    ([`blocks`]), which uses the [`inline`] formatter for spans.
//! 3. Placeholders are swapped back for rendered code and diagram markup.
//! 4. Untagged code blocks that look like ASCII art are restyled or rewritten
//!    into Mermaid ([`postprocess`], [`diagram`]).
//!
//! ## Diagram styles
//!
//! ```rust
//! use mdreport_markdown::{DiagramStyle, MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   diagram_style: DiagramStyle::Visual,
//!   ..Default::default()
//! };
//! let processor = MarkdownProcessor::new(options);
//! let result = processor.render("```\nSYS_ADMIN -> GL_CORE\n```");
//! assert!(result.html.contains("class=\"mermaid\""));
//! ```

pub mod blocks;
pub mod diagram;
pub mod extract;
pub mod inline;
pub mod postprocess;
pub mod processor;
pub mod table;
pub mod toc;
mod types;
pub mod utils;

pub use crate::{
  diagram::{AsciiArtKind, ClassifierOptions, DiagramStyle},
  processor::{MarkdownOptions, MarkdownProcessor},
  types::{Header, MarkdownResult},
  utils::slugify,
};
