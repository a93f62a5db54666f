//! Object key and file name helpers.
//!
//! Keys are path-like and always use `/` regardless of the host platform. Effective keys are
//! normalized: empty and `.` segments are dropped, `..` removes the previous segment and never
//! climbs above the bucket root, and there is no leading `/`.

/// Join a caller-supplied key prefix with a file name.
///
/// `join_key("folder", "report.pdf") == "folder/report.pdf"`
pub fn join_key(prefix: &str, filename: &str) -> String {
    normalize_key(&format!("{}/{}", prefix, filename))
}

/// Normalize a `/`-separated key.
pub fn normalize_key(key: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in key.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Final path segment of a key, ignoring trailing slashes.
///
/// Returns `None` when there is no usable file name (`"/"`, `"."` or `".."`).
pub fn base_name(key: &str) -> Option<&str> {
    let trimmed = key.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    valid_file_name(name)
}

/// File name of an uploaded part with any client-side directory components removed.
///
/// Browsers on Windows may send `C:\dir\file.txt`, so both separators are stripped.
pub fn upload_file_name(raw: &str) -> Option<&str> {
    let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw).trim();
    valid_file_name(name)
}

fn valid_file_name(name: &str) -> Option<&str> {
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}
