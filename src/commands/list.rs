//! List site content

use anyhow::Result;
use std::io::{self, Write};

use crate::content::{ContentFilter, ContentIndex, DocumentQuery};
use crate::Quill;

/// Print every post, newest first
pub fn run(quill: &Quill, include_drafts: bool, json: bool) -> Result<()> {
    let stdout = io::stdout();
    write_listing(&mut stdout.lock(), quill, include_drafts, json)
}

fn write_listing(
    out: &mut impl Write,
    quill: &Quill,
    include_drafts: bool,
    json: bool,
) -> Result<()> {
    let index = quill.open_index()?;
    let query = DocumentQuery {
        filter: if include_drafts {
            ContentFilter::All
        } else {
            ContentFilter::Published
        },
        ..DocumentQuery::newest_first()
    };
    let posts = index.documents(&query)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&posts)?)?;
        return Ok(());
    }

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in &posts {
        let date = if post.date.is_empty() {
            "(undated)"
        } else {
            post.date.as_str()
        };
        writeln!(out, "  {} - {} [{}]", date, post.display_title(), post.slug)?;
    }

    Ok(())
}
