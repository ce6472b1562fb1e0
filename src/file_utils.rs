use anyhow::{Result, Context};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

// @module: File naming and writing utilities

/// Base name used when no article URL is known
pub const DEFAULT_BASE_FILENAME: &str = "article";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file as UTF-8
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Download paths for the original and translated article
    pub fn download_paths<P: AsRef<Path>>(output_dir: P, base: &str) -> (PathBuf, PathBuf) {
        let (original, translated) = download_filenames(base);
        let output_dir = output_dir.as_ref();
        (output_dir.join(original), output_dir.join(translated))
    }
}

/// Derive a filesystem-safe base name from an article URL
///
/// Uses the last path segment without its extension, with every character
/// other than alphanumerics, `-` and `_` replaced by `_`. Falls back to
/// `article_<YYYYmmdd_HHMMSS>` when the URL has no usable segment.
pub fn derive_base_filename(url: &str) -> String {
    slug_from_url(url).unwrap_or_else(timestamp_filename)
}

fn slug_from_url(url: &str) -> Option<String> {
    let parsed = if url.contains("://") {
        Url::parse(url).ok()?
    } else {
        Url::parse(&format!("http://{}", url)).ok()?
    };

    let path = parsed.path().trim_matches('/');
    if path.is_empty() {
        return None;
    }

    // `Url` percent-encodes non-ASCII; decode so `文章.html` yields `文章`
    let segment = path.rsplit('/').next()?;
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let mut slug: &str = &decoded;
    if let Some((stem, _extension)) = slug.rsplit_once('.') {
        slug = stem;
    }

    let slug: String = slug
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if slug.is_empty() { None } else { Some(slug) }
}

fn timestamp_filename() -> String {
    format!("{}_{}", DEFAULT_BASE_FILENAME, Local::now().format("%Y%m%d_%H%M%S"))
}

/// Download file names for a base name: `<base>_original.md`, `<base>_translated.md`
pub fn download_filenames(base: &str) -> (String, String) {
    (format!("{}_original.md", base), format!("{}_translated.md", base))
}
