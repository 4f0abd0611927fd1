//! Package implementation: the .docx OPC (ZIP) container.

use crate::docx::document::Document;
use crate::docx::error::{DocxError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Content type of the WordprocessingML main document part.
const WML_DOCUMENT_MAIN: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Relationship type suffix identifying the main document part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// A Word (.docx) package.
///
/// Owns every archive member byte-for-byte, plus the parsed main document.
/// Saving re-emits the archive in its original member order with only the
/// main document part rewritten, so parts this tool does not model
/// (headers, footers, styles, media) pass through untouched.
///
/// # Examples
///
/// ```rust,no_run
/// use loquat::docx::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// println!("{} paragraphs", pkg.document().paragraph_count());
/// pkg.save("document_out.docx")?;
/// # Ok::<(), loquat::docx::DocxError>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// All archive members in original order, the document part included
    parts: Vec<(String, Vec<u8>)>,
    /// Name of the main document part, e.g. `word/document.xml`
    document_part: String,
    /// The parsed main document
    document: Document,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocxError::PackageNotFound(path.display().to_string()));
        }
        Self::from_reader(File::open(path)?)
    }

    /// Open a .docx package from any `Read + Seek` source.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let mut parts: Vec<(String, Vec<u8>)> = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;
            parts.push((entry.name().to_string(), data));
        }

        let document_part = main_document_part(&parts)?;
        verify_content_type(&parts, &document_part)?;

        let document_xml = parts
            .iter()
            .find(|(name, _)| *name == document_part)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| DocxError::PartNotFound(document_part.clone()))?;

        let document = Document::from_xml(document_xml)?;

        Ok(Self {
            parts,
            document_part,
            document,
        })
    }

    /// The main document.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the main document.
    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Name of the main document part within the archive.
    #[inline]
    pub fn document_part_name(&self) -> &str {
        &self.document_part
    }

    /// Save the package to a file path.
    ///
    /// A single write at the end of processing; there is no partial-output
    /// mode. An error here invalidates the whole operation.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Write the package to any `Write + Seek` sink.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options)?;
            if *name == self.document_part {
                zip.write_all(&self.document.to_xml())?;
            } else {
                zip.write_all(data)?;
            }
        }
        zip.finish()?;
        Ok(())
    }
}

/// Resolve the main document part name through the package relationships
/// (`_rels/.rels`, relationship type ending in `/officeDocument`).
fn main_document_part(parts: &[(String, Vec<u8>)]) -> Result<String> {
    let rels = parts
        .iter()
        .find(|(name, _)| name == "_rels/.rels")
        .map(|(_, data)| data.as_slice())
        .ok_or_else(|| DocxError::PartNotFound("_rels/.rels".to_string()))?;

    let mut reader = Reader::from_reader(rels);
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let mut rel_type = None;
                    let mut target = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => {
                                rel_type = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .map(|s| s.to_string());
                            },
                            b"Target" => {
                                target = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .map(|s| s.to_string());
                            },
                            _ => {},
                        }
                    }
                    if let (Some(rel_type), Some(target)) = (rel_type, target)
                        && rel_type.ends_with(OFFICE_DOCUMENT_REL)
                    {
                        // Pack URIs may be written absolute; archive names are not
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Err(DocxError::PartNotFound(
        "main document part relationship".to_string(),
    ))
}

/// Verify the main part's declared content type against `[Content_Types].xml`.
fn verify_content_type(parts: &[(String, Vec<u8>)], document_part: &str) -> Result<()> {
    let content_types = parts
        .iter()
        .find(|(name, _)| name == "[Content_Types].xml")
        .map(|(_, data)| data.as_slice())
        .ok_or_else(|| DocxError::PartNotFound("[Content_Types].xml".to_string()))?;

    let part_name = format!("/{document_part}");
    let mut reader = Reader::from_reader(content_types);
    let mut buf = Vec::with_capacity(512);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Override" {
                    let mut name = None;
                    let mut content_type = None;
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"PartName" => {
                                name = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .map(|s| s.to_string());
                            },
                            b"ContentType" => {
                                content_type = std::str::from_utf8(&attr.value)
                                    .ok()
                                    .map(|s| s.to_string());
                            },
                            _ => {},
                        }
                    }
                    if name.as_deref() == Some(part_name.as_str()) {
                        let got = content_type.unwrap_or_default();
                        if got != WML_DOCUMENT_MAIN {
                            return Err(DocxError::InvalidContentType {
                                expected: WML_DOCUMENT_MAIN.to_string(),
                                got,
                            });
                        }
                        return Ok(());
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Err(DocxError::InvalidContentType {
        expected: WML_DOCUMENT_MAIN.to_string(),
        got: "(not declared)".to_string(),
    })
}
