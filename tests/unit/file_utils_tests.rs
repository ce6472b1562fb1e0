/*!
 * Tests for file naming and writing utilities
 */

use artran::file_utils::{derive_base_filename, download_filenames, FileManager};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_deriveBaseFilename_withBlogUrl_shouldUseLastSegment() {
    assert_eq!(derive_base_filename("https://example.com/blog/my-post.html"), "my-post");
    assert_eq!(derive_base_filename("https://example.com/docs/getting_started/"), "getting_started");
}

#[test]
fn test_deriveBaseFilename_withQueryAndFragment_shouldIgnoreThem() {
    assert_eq!(derive_base_filename("https://example.com/a/intro?lang=en#setup"), "intro");
}

#[test]
fn test_deriveBaseFilename_withOnlyLastDotStripped_shouldKeepInnerDots() {
    assert_eq!(derive_base_filename("https://example.com/release.notes.v1.md"), "release_notes_v1");
}

#[test]
fn test_deriveBaseFilename_withNonAsciiSegment_shouldKeepUnicodeLetters() {
    assert_eq!(derive_base_filename("https://example.com/blog/文章.html"), "文章");
    assert_eq!(derive_base_filename("https://example.com/posts/café-notes"), "café-notes");
}

#[test]
fn test_deriveBaseFilename_withEncodedSegment_shouldDecodeBeforeSanitizing() {
    assert_eq!(derive_base_filename("https://example.com/blog/%E6%96%87%E7%AB%A0"), "文章");
}

#[test]
fn test_deriveBaseFilename_withBareHost_shouldFallBackToTimestamp() {
    let name = derive_base_filename("https://example.com/");
    assert!(name.starts_with("article_"));
    // article_YYYYmmdd_HHMMSS
    assert_eq!(name.len(), "article_".len() + 15);
}

#[test]
fn test_deriveBaseFilename_withoutScheme_shouldStillFindSlug() {
    assert_eq!(derive_base_filename("example.com/posts/hello-world"), "hello-world");
}

#[test]
fn test_downloadFilenames_shouldAppendSuffixes() {
    assert_eq!(
        download_filenames("my-post"),
        ("my-post_original.md".to_string(), "my-post_translated.md".to_string())
    );
}

#[test]
fn test_downloadPaths_shouldJoinOutputDir() {
    let temp_dir = create_temp_dir().unwrap();
    let (original, translated) = FileManager::download_paths(temp_dir.path(), "guide");
    assert_eq!(original, temp_dir.path().join("guide_original.md"));
    assert_eq!(translated, temp_dir.path().join("guide_translated.md"));
}

#[test]
fn test_writeToFile_withMissingParent_shouldCreateDirectories() {
    let temp_dir = create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("out.md");

    FileManager::write_to_file(&nested, "# 标题\n").unwrap();

    assert!(FileManager::file_exists(&nested));
    assert_eq!(FileManager::read_to_string(&nested).unwrap(), "# 标题\n");
}

#[test]
fn test_readToString_withExistingFile_shouldReturnContent() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "post.md", "Hello\n").unwrap();
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "Hello\n");
}

#[test]
fn test_readToString_withMissingFile_shouldFail() {
    let temp_dir = create_temp_dir().unwrap();
    let result = FileManager::read_to_string(temp_dir.path().join("nope.md"));
    assert!(result.is_err());
}
