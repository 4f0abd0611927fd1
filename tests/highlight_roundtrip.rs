//! End-to-end tests: build a .docx in memory, highlight, save, reopen.

use loquat::docx::{HighlightColor, Package};
use loquat::highlight::{MatchFinder, highlight_document};
use std::io::{Cursor, Read, Write};
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;

/// Build a minimal but well-formed .docx around the given body XML.
fn build_docx(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", RELS),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", STYLES),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn member(archive_bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes.to_vec())).unwrap();
    let mut data = Vec::new();
    archive.by_name(name).unwrap().read_to_end(&mut data).unwrap();
    data
}

#[test]
fn highlight_save_reopen() {
    let input = build_docx(
        r#"<w:p><w:r><w:t>The </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>amp</w:t></w:r><w:r><w:t>R cassette was cloned.</w:t></w:r></w:p><w:p><w:r><w:t>No match in this one.</w:t></w:r></w:p>"#,
    );

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("ampR");
    let stats = highlight_document(pkg.document_mut(), &finder, HighlightColor::Green).unwrap();
    assert_eq!(stats.paragraphs_rewritten, 1);
    assert_eq!(stats.matches, 1);

    let mut out = Cursor::new(Vec::new());
    pkg.write_to(&mut out).unwrap();

    let reopened = Package::from_reader(Cursor::new(out.into_inner())).unwrap();
    let doc = reopened.document();

    // Text round-trips through rewrite, save and reopen
    assert_eq!(
        doc.text().unwrap(),
        "The ampR cassette was cloned.\nNo match in this one."
    );

    // The bold boundary inside the match survives, with highlight unified
    let runs = doc.paragraph(0).runs().unwrap();
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["The ", "amp", "R", " cassette was cloned."]);
    assert_eq!(runs[1].bold, Some(true));
    assert_eq!(runs[1].highlight, Some(HighlightColor::Green));
    assert_eq!(runs[2].bold, None);
    assert_eq!(runs[2].highlight, Some(HighlightColor::Green));
    assert_eq!(runs[0].highlight, None);
    assert_eq!(runs[3].highlight, None);
}

#[test]
fn no_match_writes_identical_document_part() {
    let input = build_docx(r#"<w:p><w:r><w:t>nothing of interest</w:t></w:r></w:p>"#);
    let original_document = member(&input, "word/document.xml");

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("egfp");
    let stats = highlight_document(pkg.document_mut(), &finder, HighlightColor::Yellow).unwrap();
    assert_eq!(stats.matches, 0);

    // The output is still written, and the document part is byte-identical
    let mut out = Cursor::new(Vec::new());
    pkg.write_to(&mut out).unwrap();
    let saved = out.into_inner();
    assert_eq!(member(&saved, "word/document.xml"), original_document);
}

#[test]
fn unrelated_parts_pass_through_untouched() {
    let input = build_docx(r#"<w:p><w:r><w:t>egfp here</w:t></w:r></w:p>"#);

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("egfp");
    highlight_document(pkg.document_mut(), &finder, HighlightColor::Magenta).unwrap();

    let mut out = Cursor::new(Vec::new());
    pkg.write_to(&mut out).unwrap();
    let saved = out.into_inner();

    assert_eq!(member(&saved, "word/styles.xml"), STYLES.as_bytes());
    assert_eq!(member(&saved, "_rels/.rels"), RELS.as_bytes());
}

#[test]
fn table_content_is_never_rewritten() {
    let input = build_docx(
        r#"<w:p><w:r><w:t>egfp outside</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>egfp inside a table</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
    );

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("egfp");
    let stats = highlight_document(pkg.document_mut(), &finder, HighlightColor::Yellow).unwrap();

    // Only the body-level paragraph is touched
    assert_eq!(stats.paragraphs_scanned, 1);
    assert_eq!(stats.paragraphs_rewritten, 1);

    let mut out = Cursor::new(Vec::new());
    pkg.write_to(&mut out).unwrap();
    let document = String::from_utf8(member(&out.into_inner(), "word/document.xml")).unwrap();
    assert!(document.contains("egfp inside a table"));
    // The table paragraph carries no highlight
    let table_part = document.split("<w:tbl>").nth(1).unwrap();
    assert!(!table_part.contains("w:highlight"));
}

#[test]
fn escaped_characters_round_trip() {
    let input = build_docx(
        r#"<w:p><w:r><w:t>Mix &amp; match egfp &lt;here&gt;</w:t></w:r></w:p>"#,
    );

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("egfp");
    let stats = highlight_document(pkg.document_mut(), &finder, HighlightColor::Yellow).unwrap();
    assert_eq!(stats.matches, 1);

    // The match sits after an entity, so its offsets only line up if the
    // entity resolves to a single character in the flattened text
    let runs = pkg.document().paragraph(0).runs().unwrap();
    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Mix & match ", "egfp", " <here>"]);
    assert_eq!(runs[1].highlight, Some(HighlightColor::Yellow));

    let mut out = Cursor::new(Vec::new());
    pkg.write_to(&mut out).unwrap();
    let saved = out.into_inner();

    // Saved XML is re-escaped
    let document = String::from_utf8(member(&saved, "word/document.xml")).unwrap();
    assert!(document.contains("Mix &amp; match "));
    assert!(document.contains("&lt;here&gt;"));

    let reopened = Package::from_reader(Cursor::new(saved)).unwrap();
    assert_eq!(
        reopened.document().text().unwrap(),
        "Mix & match egfp <here>"
    );
}

#[test]
fn existing_formatting_and_highlight_preserved_outside_matches() {
    let input = build_docx(
        r#"<w:p><w:r><w:rPr><w:i/><w:sz w:val="28"/><w:highlight w:val="cyan"/></w:rPr><w:t>keep egfp keep</w:t></w:r></w:p>"#,
    );

    let mut pkg = Package::from_reader(Cursor::new(input)).unwrap();
    let finder = MatchFinder::new("EGFP");
    highlight_document(pkg.document_mut(), &finder, HighlightColor::Yellow).unwrap();

    let runs = pkg.document().paragraph(0).runs().unwrap();
    assert_eq!(runs.len(), 3);
    for run in runs.iter() {
        assert_eq!(run.italic, Some(true));
        assert_eq!(run.font_size, Some(28));
    }
    assert_eq!(runs[0].highlight, Some(HighlightColor::Cyan));
    assert_eq!(runs[1].highlight, Some(HighlightColor::Yellow));
    assert_eq!(runs[2].highlight, Some(HighlightColor::Cyan));
}
