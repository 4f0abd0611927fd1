//! Run format records: one contiguous span of text sharing one set of
//! character formatting.

use crate::docx::color::{HighlightColor, RgbColor};
use crate::docx::error::{DocxError, Result};
use crate::docx::xml::{escape_xml, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use std::fmt::Write as FmtWrite;

/// An immutable snapshot of one run: its text plus character formatting.
///
/// Represents one `<w:r>` element. Bold, italic and underline are tri-state:
/// `Some(true)` is explicitly on, `Some(false)` is explicitly off, and `None`
/// inherits from the paragraph or character style. The remaining attributes
/// are `None` when not set on the run itself.
///
/// Concatenating the `text` of all records of a paragraph, in order,
/// reproduces the paragraph's flattened text exactly. Tabs and line breaks
/// are carried in `text` as `\t` and `\n` and re-emitted as `<w:tab/>` and
/// `<w:br/>` when the run is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFormat {
    /// The run's literal characters (may be empty)
    pub text: String,
    /// Bold on/off, `None` = inherit
    pub bold: Option<bool>,
    /// Italic on/off, `None` = inherit
    pub italic: Option<bool>,
    /// Underline on/off, `None` = inherit
    pub underline: Option<bool>,
    /// Typeface name (`w:rFonts w:ascii`)
    pub font_name: Option<String>,
    /// Font size in half-points, as WordprocessingML stores it (24 = 12pt)
    pub font_size: Option<u32>,
    /// Font color; `None` covers both "not set" and `auto`
    pub font_color: Option<RgbColor>,
    /// The run's existing highlight, distinct from the one being applied
    pub highlight: Option<HighlightColor>,
}

/// Tri-state boolean from a toggle property element: the element present
/// without `w:val` means true.
fn toggle_value(e: &BytesStart<'_>) -> Option<bool> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"w:val" || attr.key.as_ref() == b"val" {
            let value = attr.value.as_ref();
            return Some(value == b"true" || value == b"1" || value == b"on");
        }
    }
    Some(true)
}

/// Append the character a `&name;` or `&#N;` reference stands for.
///
/// Unknown named entities keep their raw spelling rather than being dropped.
fn append_reference(text: &mut String, e: &BytesRef<'_>) -> Result<()> {
    if let Some(c) = e
        .resolve_char_ref()
        .map_err(|e| DocxError::Xml(e.to_string()))?
    {
        text.push(c);
        return Ok(());
    }
    let name: &[u8] = e;
    match name {
        b"amp" => text.push('&'),
        b"lt" => text.push('<'),
        b"gt" => text.push('>'),
        b"quot" => text.push('"'),
        b"apos" => text.push('\''),
        other => {
            text.push('&');
            text.push_str(&String::from_utf8_lossy(other));
            text.push(';');
        },
    }
    Ok(())
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        let name = attr.key.as_ref();
        // Attribute keys keep their prefix in the raw event
        let local = name.rsplit(|b| *b == b':').next().unwrap_or(name);
        if local == key {
            return std::str::from_utf8(&attr.value)
                .ok()
                .map(|s| unescape_xml(s));
        }
    }
    None
}

impl RunFormat {
    /// Create a record carrying only text, all formatting inherited.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Copy of this record with different text. Used by the segmenter when
    /// re-slicing a run against region boundaries.
    pub(crate) fn resliced(&self, text: &str) -> Self {
        let mut copy = self.clone();
        copy.text = text.to_string();
        copy
    }

    /// Apply one `<w:rPr>` child element to this record.
    fn apply_property(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"b" => self.bold = toggle_value(e),
            b"i" => self.italic = toggle_value(e),
            b"u" => {
                // w:u carries a style name; "none" is explicitly off,
                // anything else is on
                self.underline = match attr_value(e, b"val").as_deref() {
                    Some("none") => Some(false),
                    _ => Some(true),
                };
            },
            b"rFonts" => self.font_name = attr_value(e, b"ascii"),
            b"sz" => {
                self.font_size = attr_value(e, b"val").and_then(|v| v.parse::<u32>().ok());
            },
            b"color" => {
                self.font_color = attr_value(e, b"val").and_then(|v| RgbColor::from_hex(&v));
            },
            b"highlight" => {
                self.highlight = attr_value(e, b"val").and_then(|v| HighlightColor::parse(&v));
            },
            _ => {},
        }
    }

    /// Parse a `<w:r>` XML fragment into a record.
    ///
    /// Extracts text and all modeled properties in a single streaming pass,
    /// in the same way the paragraph reader extracts runs. `<w:tab/>` becomes
    /// `\t` and `<w:br/>` becomes `\n`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);

        let mut run = Self::default();
        let mut in_r_pr = false;
        let mut in_text = false;
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"rPr" {
                        in_r_pr = true;
                    } else if in_r_pr {
                        run.apply_property(e);
                    } else if name.as_ref() == b"t" {
                        in_text = true;
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    if in_r_pr {
                        run.apply_property(e);
                    } else if name.as_ref() == b"tab" {
                        run.text.push('\t');
                    } else if name.as_ref() == b"br" || name.as_ref() == b"cr" {
                        run.text.push('\n');
                    }
                },
                Ok(Event::Text(e)) if in_text => {
                    let text = e
                        .xml_content()
                        .map_err(|e| DocxError::Xml(e.to_string()))?;
                    run.text.push_str(&text);
                },
                // Entity and character references arrive as their own events,
                // not as part of the surrounding text
                Ok(Event::GeneralRef(ref e)) if in_text => {
                    append_reference(&mut run.text, e)?;
                },
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"t" {
                        in_text = false;
                    } else if name.as_ref() == b"rPr" {
                        in_r_pr = false;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(run)
    }

    fn has_properties(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.font_name.is_some()
            || self.font_size.is_some()
            || self.font_color.is_some()
            || self.highlight.is_some()
    }

    /// Serialize this record as a `<w:r>` element.
    ///
    /// Explicit-off tri-states are written out (`<w:b w:val="0"/>`), never
    /// dropped: dropping them would let a style-inherited value reappear on
    /// the rewritten run.
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.has_properties() {
            xml.push_str("<w:rPr>");

            match self.bold {
                Some(true) => xml.push_str("<w:b/>"),
                Some(false) => xml.push_str("<w:b w:val=\"0\"/>"),
                None => {},
            }

            match self.italic {
                Some(true) => xml.push_str("<w:i/>"),
                Some(false) => xml.push_str("<w:i w:val=\"0\"/>"),
                None => {},
            }

            match self.underline {
                Some(true) => xml.push_str("<w:u w:val=\"single\"/>"),
                Some(false) => xml.push_str("<w:u w:val=\"none\"/>"),
                None => {},
            }

            if let Some(size) = self.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/>", size)
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
            }

            if let Some(ref font_name) = self.font_name {
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{}\" w:hAnsi=\"{}\"/>",
                    escape_xml(font_name),
                    escape_xml(font_name)
                )
                .map_err(|e| DocxError::Xml(e.to_string()))?;
            }

            if let Some(color) = self.font_color {
                write!(xml, "<w:color w:val=\"{}\"/>", color.to_hex())
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
            }

            if let Some(highlight) = self.highlight {
                write!(xml, "<w:highlight w:val=\"{}\"/>", highlight.as_str())
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
            }

            xml.push_str("</w:rPr>");
        }

        // Split the text around tabs and breaks and re-emit them as elements
        let mut chunk_start = 0;
        for (idx, c) in self.text.char_indices() {
            if c == '\t' || c == '\n' {
                if idx > chunk_start {
                    write!(
                        xml,
                        "<w:t xml:space=\"preserve\">{}</w:t>",
                        escape_xml(&self.text[chunk_start..idx])
                    )
                    .map_err(|e| DocxError::Xml(e.to_string()))?;
                }
                xml.push_str(if c == '\t' { "<w:tab/>" } else { "<w:br/>" });
                chunk_start = idx + 1;
            }
        }
        if chunk_start < self.text.len() {
            write!(
                xml,
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape_xml(&self.text[chunk_start..])
            )
            .map_err(|e| DocxError::Xml(e.to_string()))?;
        }

        xml.push_str("</w:r>");

        Ok(())
    }
}
