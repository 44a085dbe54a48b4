//! Custom assertions for generated context documents.

use anyhow::{Context, Result};

const AUTO_START: &str = "<!--AUTO_START-->";
const AUTO_END: &str = "<!--AUTO_END-->";

/// The text between the first marker pair.
pub fn generated_region(document: &str) -> Result<&str> {
    let start = document
        .find(AUTO_START)
        .context("Document has no AUTO_START marker")?;
    let end = document
        .find(AUTO_END)
        .context("Document has no AUTO_END marker")?;
    if end < start {
        anyhow::bail!("AUTO_END appears before AUTO_START");
    }
    Ok(&document[start + AUTO_START.len()..end])
}

/// Exactly one marker pair, in order.
pub fn assert_single_region(document: &str) -> Result<()> {
    let starts = document.matches(AUTO_START).count();
    let ends = document.matches(AUTO_END).count();
    if starts != 1 || ends != 1 {
        anyhow::bail!(
            "Expected one marker pair, found {} start and {} end markers",
            starts,
            ends
        );
    }
    generated_region(document).map(|_| ())
}

/// `text` occurs outside the generated region.
pub fn assert_human_text_kept(document: &str, text: &str) -> Result<()> {
    let region = generated_region(document)?;
    let outside = document.replacen(region, "", 1);
    if !outside.contains(text) {
        anyhow::bail!("Human-authored text {:?} was not preserved", text);
    }
    Ok(())
}
