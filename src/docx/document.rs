//! The main document part: body-level paragraph access and splicing.

use crate::docx::error::{DocxError, Result};
use crate::docx::paragraph::Paragraph;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::ops::Range;

/// One body-level paragraph: where it sits in the original XML, and the
/// replacement XML once the paragraph has been rewritten.
#[derive(Debug, Clone)]
struct ParagraphSlot {
    range: Range<usize>,
    replacement: Option<Vec<u8>>,
}

/// The content of `word/document.xml`.
///
/// Holds the original XML verbatim plus the byte ranges of every paragraph
/// that is a direct child of `<w:body>`. Paragraphs nested inside tables are
/// not indexed and therefore never rewritten; the same goes for every other
/// body element (tables, section properties, bookmarks), which round-trip
/// byte-for-byte through [`Document::to_xml`].
#[derive(Debug, Clone)]
pub struct Document {
    xml: Vec<u8>,
    slots: Vec<ParagraphSlot>,
}

impl Document {
    /// Parse `document.xml` bytes and index the body-level paragraphs.
    pub fn from_xml(xml: Vec<u8>) -> Result<Self> {
        let slots = scan_body_paragraphs(&xml)?;
        Ok(Self { xml, slots })
    }

    /// Number of body-level paragraphs.
    #[inline]
    pub fn paragraph_count(&self) -> usize {
        self.slots.len()
    }

    /// Get one paragraph by index, reflecting any replacement already made.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn paragraph(&self, index: usize) -> Paragraph {
        let slot = &self.slots[index];
        let bytes = match &slot.replacement {
            Some(xml) => xml.clone(),
            None => self.xml[slot.range.clone()].to_vec(),
        };
        Paragraph::new(bytes)
    }

    /// Iterate over all body-level paragraphs in document order.
    pub fn paragraphs(&self) -> impl Iterator<Item = Paragraph> + '_ {
        (0..self.slots.len()).map(|i| self.paragraph(i))
    }

    /// Replace one paragraph's XML wholesale.
    ///
    /// The swap is atomic from the point of view of every other accessor:
    /// either the original bytes or the full replacement are observed,
    /// never a partial rewrite.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_paragraph(&mut self, index: usize, xml: Vec<u8>) {
        self.slots[index].replacement = Some(xml);
    }

    /// All paragraph texts joined with newlines.
    pub fn text(&self) -> Result<String> {
        let mut parts = Vec::with_capacity(self.slots.len());
        for para in self.paragraphs() {
            parts.push(para.text()?);
        }
        Ok(parts.join("\n"))
    }

    /// Serialize the document, splicing replacements into the original XML.
    pub fn to_xml(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.xml.len());
        let mut cursor = 0usize;
        for slot in &self.slots {
            out.extend_from_slice(&self.xml[cursor..slot.range.start]);
            match &slot.replacement {
                Some(xml) => out.extend_from_slice(xml),
                None => out.extend_from_slice(&self.xml[slot.range.clone()]),
            }
            cursor = slot.range.end;
        }
        out.extend_from_slice(&self.xml[cursor..]);
        out
    }
}

/// Locate every `<w:p>` that is a direct child of `<w:body>`.
///
/// Byte offsets come from the reader position before/after each event; with
/// text trimming off every byte belongs to exactly one event, so the spans
/// are exact.
fn scan_body_paragraphs(xml: &[u8]) -> Result<Vec<ParagraphSlot>> {
    let mut reader = Reader::from_reader(xml);

    let mut slots = Vec::new();
    let mut in_body = false;
    // Depth below <w:body>; 0 = direct children
    let mut body_depth = 0usize;
    let mut para_start: Option<usize> = None;
    let mut last_pos = 0usize;
    let mut buf = Vec::with_capacity(2048);

    loop {
        let event = reader.read_event_into(&mut buf);
        let event_start = last_pos;
        last_pos = reader.buffer_position() as usize;

        match event {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name();
                if !in_body {
                    if name.as_ref() == b"body" {
                        in_body = true;
                        body_depth = 0;
                    }
                } else {
                    if body_depth == 0 && name.as_ref() == b"p" {
                        para_start = Some(event_start);
                    }
                    body_depth += 1;
                }
            },
            Ok(Event::Empty(ref e)) => {
                if in_body && body_depth == 0 && e.local_name().as_ref() == b"p" {
                    slots.push(ParagraphSlot {
                        range: event_start..last_pos,
                        replacement: None,
                    });
                }
            },
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                if in_body {
                    if body_depth == 0 {
                        if name.as_ref() == b"body" {
                            in_body = false;
                        }
                    } else {
                        body_depth -= 1;
                        if body_depth == 0
                            && name.as_ref() == b"p"
                            && let Some(start) = para_start.take()
                        {
                            slots.push(ParagraphSlot {
                                range: start..last_pos,
                                replacement: None,
                            });
                        }
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocxError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(slots)
}
