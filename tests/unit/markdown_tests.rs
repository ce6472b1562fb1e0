/*!
 * Tests for Markdown tokenizing and fence location
 */

use artran::markdown::{locate_fences, tokenize, LineTable, MarkdownToken};

use crate::common::sample_article;

#[test]
fn test_lineTable_withSampleArticle_shouldCoverWholeDocument() {
    let article = sample_article();
    let table = LineTable::new(&article);

    assert_eq!(table.line_count(), 16);
    assert_eq!(table.document_len(), article.len());
    assert_eq!(table.offset_of_line(1), "# Getting started\n".len());
}

#[test]
fn test_lineTable_spanOffsets_withLastLine_shouldReachDocumentEnd() {
    let doc = "one\ntwo\nthree";
    let table = LineTable::new(doc);
    assert_eq!(table.span_offsets(1, 3), (4, doc.len()));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_lineTable_spanOffsets_pastEnd_shouldPanic() {
    let table = LineTable::new("one\n");
    table.span_offsets(0, 5);
}

#[test]
fn test_tokenize_withSampleArticle_shouldListBlocksInOrder() {
    let article = sample_article();
    let tokens = tokenize(&article, &LineTable::new(&article));

    let kinds: Vec<&str> = tokens
        .iter()
        .map(|token| match token {
            MarkdownToken::Heading { .. } => "heading",
            MarkdownToken::Paragraph { .. } => "paragraph",
            MarkdownToken::Fence(_) => "fence",
            _ => "other",
        })
        .collect();

    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "fence", "paragraph", "fence", "paragraph"]
    );
    assert_eq!(tokens[0].map(), Some((0, 1)));
    assert_eq!(tokens[2].map(), Some((4, 7)));
    assert_eq!(tokens[4].map(), Some((10, 14)));
}

#[test]
fn test_locateFences_withSampleArticle_shouldCaptureMarkersAndTags() {
    let article = sample_article();
    let located = locate_fences(&article, &LineTable::new(&article));

    assert_eq!(located.skipped, 0);
    assert_eq!(located.spans.len(), 2);

    let bash = &located.spans[0];
    assert_eq!((bash.start_line, bash.end_line), (4, 7));
    assert_eq!(bash.fence_marker, "```");
    assert_eq!(bash.language_tag, "bash");
    assert_eq!(bash.raw_content, "cargo install demo\n");

    let toml = &located.spans[1];
    assert_eq!(toml.fence_marker, "~~~");
    assert_eq!(toml.language_tag, "toml");
    assert_eq!(toml.reconstruct(), "~~~toml\n[server]\nport = 8080\n~~~\n");
}

#[test]
fn test_locateFences_withFenceInList_shouldLocateNestedBlock() {
    let doc = "- item\n\n  ```sh\n  make\n  ```\n";
    let located = locate_fences(doc, &LineTable::new(doc));

    assert_eq!(located.spans.len(), 1);
    assert_eq!(located.spans[0].language_tag, "sh");
    assert_eq!(located.spans[0].raw_content, "make\n");
}

#[test]
fn test_locateFences_withEmptyFence_shouldReconstructWithoutContent() {
    let doc = "```js\n```\n";
    let located = locate_fences(doc, &LineTable::new(doc));

    assert_eq!(located.spans.len(), 1);
    assert_eq!(located.spans[0].raw_content, "");
    assert_eq!(located.spans[0].reconstruct(), "```js\n```\n");
}
