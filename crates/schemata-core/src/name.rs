use std::path::{Component, Path};

use crate::error::AppError;
use crate::pluralize::pluralize;

const DOT: &str = ".";
const INDEX: &str = "index";

/// Derive the dotted logical name for a schema file relative to the base
/// directory.
///
/// The extension is stripped, directory separators collapse to `.`, and every
/// segment equal to `index` (ASCII case-insensitive) is dropped so a
/// directory's index file takes the directory's own name:
///
/// - `user.json` → `user`
/// - `post/comment.json` → `post.comment`
/// - `post/index.json` → `post`
///
/// An `index` file directly in the base directory would resolve to an empty
/// name; that is rejected with [`AppError::Name`].
pub fn logical_name(basedir: &Path, file: &Path) -> Result<String, AppError> {
    let relative = file.strip_prefix(basedir).map_err(|_| {
        AppError::Name(format!(
            "{} is not under base directory {}",
            file.display(),
            basedir.display()
        ))
    })?;

    let mut segments = Vec::new();

    for component in relative.components() {
        let Component::Normal(os) = component else {
            continue;
        };
        let segment = os.to_str().ok_or_else(|| {
            AppError::Name(format!("non-UTF-8 path segment in {}", file.display()))
        })?;
        segments.push(segment);
    }

    // The last segment is the file name; drop its extension.
    if let Some(last) = segments.pop() {
        let stem = Path::new(last)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(last);
        segments.push(stem);
    }

    segments.retain(|s| !s.eq_ignore_ascii_case(INDEX) && !s.is_empty());

    if segments.is_empty() {
        return Err(AppError::Name(format!(
            "{} resolves to an empty logical name",
            file.display()
        )));
    }

    Ok(segments.join(DOT))
}

/// Derive the collection name: every dot-delimited segment of the logical
/// name pluralized independently, rejoined with dots.
///
/// `post.comment` → `posts.comments`
pub fn collection_name(name: &str) -> String {
    name.split(DOT)
        .map(pluralize)
        .collect::<Vec<_>>()
        .join(DOT)
}
