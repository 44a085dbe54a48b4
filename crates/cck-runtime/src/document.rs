use crate::Result;
use cck_engine::{GeneratedRegion, merge};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = ".cck-tmp";

/// Sibling file the document is staged in before the rename.
pub fn temp_path_for(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(TEMP_SUFFIX);
    output.with_file_name(name)
}

/// What merging `region` into the document on disk would produce.
pub fn merged_document(output: &Path, region: &GeneratedRegion) -> Result<(String, String)> {
    let existing = match fs::read_to_string(output) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let merged = merge(&existing, region);
    Ok((existing, merged))
}

/// Merge `region` into `output` and write it back.
///
/// Returns `false` when the merged text equals what is already on disk, in
/// which case nothing is written. The write goes to a temporary sibling that
/// is renamed over the target, so a failed write leaves the previous document
/// in place.
pub fn sync_document(output: &Path, region: &GeneratedRegion) -> Result<bool> {
    let (existing, merged) = merged_document(output, region)?;
    if merged == existing {
        return Ok(false);
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path_for(output);
    if let Err(e) = fs::write(&tmp, &merged).and_then(|()| fs::rename(&tmp, output)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::debug!(path = %output.display(), bytes = merged.len(), "document written");
    Ok(true)
}
