//! Request path resolution and sandboxing.
//!
//! # Responsibilities
//! - Percent-decode and lexically clean the request path
//! - Join it onto the served root
//! - Reject anything that would leave the root
//!
//! # Design Decisions
//! - Purely lexical: no filesystem access, no symlink resolution. A symlink
//!   inside the tree pointing outside it is still served
//! - `..` that climbs above the root is rejected, not clamped
//! - Containment is checked component-wise (`/srv/docs2` is not inside
//!   `/srv/docs`)

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

use crate::http::response::ServeError;

/// Map `request_path` (as found in the URI) to a path under `base`.
pub fn resolve(base: &Path, request_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode_str(request_path)
        .decode_utf8()
        .map_err(|_| ServeError::BadRequest("request path is not valid UTF-8".into()))?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(ServeError::BadRequest(format!(
                        "path {request_path} escapes the served directory"
                    )));
                }
            }
            other if is_plain_segment(other) => segments.push(other),
            other => {
                return Err(ServeError::BadRequest(format!(
                    "path segment {other:?} is not allowed"
                )));
            }
        }
    }

    let resolved = segments.iter().fold(base.to_path_buf(), |mut path, segment| {
        path.push(segment);
        path
    });

    if !resolved.starts_with(base) {
        return Err(ServeError::BadRequest(format!(
            "path {request_path} escapes the served directory"
        )));
    }

    Ok(resolved)
}

/// A segment the platform sees as exactly one normal path component.
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
