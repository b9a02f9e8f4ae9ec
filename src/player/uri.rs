use std::path::Path;
use url::Url;

/// `file://` URI for a local track, percent-encoded.
///
/// Relative paths cannot be expressed as file URLs; they are passed through
/// unchanged and left to the output to resolve.
pub fn parse_uri(path: &Path) -> String {
    Url::from_file_path(path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string())
}
