use std::fmt;

/// Opens the machine-owned region of a context document.
pub const AUTO_START: &str = "<!--AUTO_START-->";
/// Closes the machine-owned region of a context document.
pub const AUTO_END: &str = "<!--AUTO_END-->";

/// Inserted between a marker-less document and the appended region.
pub const LEGACY_SEPARATOR: &str = "\n\n---\n\n";

/// Freshly generated content, already wrapped in the marker pair.
///
/// Constructing through [`GeneratedRegion::new`] guarantees the text starts
/// with [`AUTO_START`], ends with [`AUTO_END`], and contains no other marker
/// literal, so a document produced by [`merge`] is always recognised as
/// marker-delimited on the next pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRegion(String);

impl GeneratedRegion {
    pub fn new(body: &str) -> Self {
        let body = body.replace(AUTO_START, "").replace(AUTO_END, "");
        let body = body.trim();
        if body.is_empty() {
            Self(format!("{}\n{}", AUTO_START, AUTO_END))
        } else {
            Self(format!("{}\n{}\n{}", AUTO_START, body, AUTO_END))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for GeneratedRegion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an existing document will be combined with a new region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentLayout<'a> {
    /// Nothing (or only whitespace) on disk yet.
    Empty,
    /// A well-formed marker pair; the human-owned text around it.
    Marked { leading: &'a str, trailing: &'a str },
    /// No markers, or `AUTO_END` before `AUTO_START`.
    Legacy,
}

/// Locate the first `AUTO_START` and first `AUTO_END` in `document`.
pub fn classify(document: &str) -> DocumentLayout<'_> {
    if document.trim().is_empty() {
        return DocumentLayout::Empty;
    }

    let (Some(start), Some(end)) = (document.find(AUTO_START), document.find(AUTO_END)) else {
        return DocumentLayout::Legacy;
    };
    if start >= end {
        return DocumentLayout::Legacy;
    }

    DocumentLayout::Marked {
        leading: document[..start].trim_end(),
        trailing: document[end + AUTO_END.len()..].trim_start(),
    }
}

/// Rebuild `existing` around `region`, keeping every human-owned byte.
///
/// Pure: the result depends only on the two arguments.
pub fn merge(existing: &str, region: &GeneratedRegion) -> String {
    match classify(existing) {
        DocumentLayout::Empty => region.as_str().to_string(),
        DocumentLayout::Marked { leading, trailing } => {
            let mut blocks = Vec::with_capacity(3);
            if !leading.is_empty() {
                blocks.push(leading);
            }
            blocks.push(region.as_str());
            if !trailing.is_empty() {
                blocks.push(trailing);
            }
            blocks.join("\n\n")
        }
        DocumentLayout::Legacy => {
            format!("{}{}{}", existing.trim_end(), LEGACY_SEPARATOR, region)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(body: &str) -> GeneratedRegion {
        GeneratedRegion::new(body)
    }

    #[test]
    fn test_region_is_wrapped_in_markers() {
        assert_eq!(
            region("  hello\n").as_str(),
            "<!--AUTO_START-->\nhello\n<!--AUTO_END-->"
        );
    }

    #[test]
    fn test_region_strips_embedded_markers() {
        let r = region("a <!--AUTO_END--> b <!--AUTO_START-->");
        assert_eq!(r.as_str().matches(AUTO_START).count(), 1);
        assert_eq!(r.as_str().matches(AUTO_END).count(), 1);
    }

    #[test]
    fn test_empty_document_yields_region() {
        let r = region("body");
        assert_eq!(merge("", &r), r.as_str());
        assert_eq!(merge("  \n\n", &r), r.as_str());
    }

    #[test]
    fn test_splice_replaces_only_marked_region() {
        let doc = "Header\n<!--AUTO_START-->\nold\n<!--AUTO_END-->\nFooter";
        let merged = merge(doc, &region("new"));

        assert_eq!(
            merged,
            "Header\n\n<!--AUTO_START-->\nnew\n<!--AUTO_END-->\n\nFooter"
        );
        assert!(!merged.contains("old"));
    }

    #[test]
    fn test_splice_omits_empty_blocks() {
        let doc = "<!--AUTO_START-->\nold\n<!--AUTO_END-->\n\n";
        assert_eq!(merge(doc, &region("new")), region("new").as_str());

        let doc = "Notes\n\n<!--AUTO_START-->old<!--AUTO_END-->";
        assert_eq!(
            merge(doc, &region("new")),
            format!("Notes\n\n{}", region("new"))
        );
    }

    #[test]
    fn test_legacy_document_is_appended_to() {
        let doc = "# My notes\n\nHand written.\n\n\n";
        let r = region("generated");

        assert_eq!(
            merge(doc, &r),
            format!("# My notes\n\nHand written.\n\n---\n\n{}", r)
        );
    }

    #[test]
    fn test_reversed_markers_are_treated_as_legacy() {
        let doc = "x <!--AUTO_END--> y <!--AUTO_START--> z";
        assert_eq!(classify(doc), DocumentLayout::Legacy);
        assert!(merge(doc, &region("r")).starts_with(doc));
    }

    #[test]
    fn test_only_first_marker_pair_is_meaningful() {
        let doc = "L\n<!--AUTO_START-->\n1\n<!--AUTO_END-->\nmid <!--AUTO_END--> T";
        assert_eq!(
            classify(doc),
            DocumentLayout::Marked {
                leading: "L",
                trailing: "mid <!--AUTO_END--> T",
            }
        );
    }
}
