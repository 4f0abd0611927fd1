//! Paragraph structure: an ordered sequence of formatted runs.

use crate::docx::error::{DocxError, Result};
use crate::docx::run::RunFormat;
use crate::docx::xml::{push_ref, push_tag};
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element, held as raw XML. Runs and flattened text
/// are derived on demand and carry no identity beyond one processing pass;
/// the paragraph itself is only ever replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// The raw XML bytes for this paragraph
    xml_bytes: Vec<u8>,
}

impl Paragraph {
    /// Create a new Paragraph from the XML content of a `<w:p>` element.
    pub fn new(xml_bytes: Vec<u8>) -> Self {
        Self { xml_bytes }
    }

    /// The raw XML of this paragraph.
    #[inline]
    pub fn xml_bytes(&self) -> &[u8] {
        &self.xml_bytes
    }

    /// Get the runs of this paragraph, in document order.
    ///
    /// Only direct `<w:r>` children count: runs nested inside hyperlinks,
    /// smart tags or field groups are not rewritten by this tool. The check
    /// is on the full name so `m:r` (math run) inside OMML is not mistaken
    /// for a word run.
    pub fn runs(&self) -> Result<SmallVec<[RunFormat; 8]>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut runs = SmallVec::new();
        let mut current_run_xml = Vec::with_capacity(512);
        let mut in_run = false;
        let mut depth = 0usize;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let is_word_run = e.local_name().as_ref() == b"r"
                        && (e.name().as_ref() == b"w:r" || e.name().as_ref() == b"r");

                    if !in_run && is_word_run && depth == 1 {
                        in_run = true;
                        current_run_xml.clear();
                        push_tag(&mut current_run_xml, e, false);
                    } else if in_run {
                        push_tag(&mut current_run_xml, e, false);
                    }
                    depth += 1;
                },
                Ok(Event::Empty(ref e)) => {
                    if in_run {
                        push_tag(&mut current_run_xml, e, true);
                    }
                },
                Ok(Event::Text(e)) if in_run => {
                    current_run_xml.extend_from_slice(e.as_ref());
                },
                Ok(Event::GeneralRef(ref e)) if in_run => {
                    push_ref(&mut current_run_xml, e);
                },
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    if in_run {
                        current_run_xml.extend_from_slice(b"</");
                        current_run_xml.extend_from_slice(e.name().as_ref());
                        current_run_xml.push(b'>');

                        let is_word_run_end = e.local_name().as_ref() == b"r"
                            && (e.name().as_ref() == b"w:r" || e.name().as_ref() == b"r");
                        if is_word_run_end && depth == 1 {
                            runs.push(RunFormat::from_xml(&current_run_xml)?);
                            in_run = false;
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(runs)
    }

    /// The flattened text of this paragraph: the concatenation of all run
    /// texts in order. This is the coordinate space match spans live in.
    pub fn text(&self) -> Result<String> {
        let runs = self.runs()?;
        let mut result = String::with_capacity(runs.iter().map(|r| r.text.len()).sum());
        for run in &runs {
            result.push_str(&run.text);
        }
        Ok(result)
    }

    /// Re-emit this paragraph with its run list replaced by `runs`.
    ///
    /// The `<w:p>` start tag (with attributes) and the `<w:pPr>` subtree are
    /// carried over verbatim, so paragraph-level formatting is untouched.
    /// All previous inline content is dropped in favor of the new runs.
    pub fn rebuild_with_runs(&self, runs: &[RunFormat]) -> Result<Vec<u8>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut out: Vec<u8> = Vec::with_capacity(self.xml_bytes.len());
        let mut p_pr_xml: Vec<u8> = Vec::new();
        let mut in_p_pr = false;
        let mut p_pr_depth = 0usize;
        let mut depth = 0usize;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if depth == 0 && e.local_name().as_ref() == b"p" {
                        push_tag(&mut out, e, false);
                    } else if depth == 1 && e.local_name().as_ref() == b"pPr" {
                        in_p_pr = true;
                        p_pr_depth = depth;
                        push_tag(&mut p_pr_xml, e, false);
                    } else if in_p_pr {
                        push_tag(&mut p_pr_xml, e, false);
                    }
                    depth += 1;
                },
                Ok(Event::Empty(ref e)) => {
                    if depth == 0 && e.local_name().as_ref() == b"p" {
                        // Self-closing empty paragraph
                        push_tag(&mut out, e, false);
                    } else if depth == 1 && e.local_name().as_ref() == b"pPr" {
                        push_tag(&mut p_pr_xml, e, true);
                    } else if in_p_pr {
                        push_tag(&mut p_pr_xml, e, true);
                    }
                },
                Ok(Event::Text(e)) if in_p_pr => {
                    p_pr_xml.extend_from_slice(e.as_ref());
                },
                Ok(Event::GeneralRef(ref e)) if in_p_pr => {
                    push_ref(&mut p_pr_xml, e);
                },
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    if in_p_pr {
                        p_pr_xml.extend_from_slice(b"</");
                        p_pr_xml.extend_from_slice(e.name().as_ref());
                        p_pr_xml.push(b'>');
                        if depth == p_pr_depth {
                            in_p_pr = false;
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(DocxError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        if out.is_empty() {
            return Err(DocxError::Xml("not a <w:p> fragment".to_string()));
        }

        out.extend_from_slice(&p_pr_xml);

        let mut runs_xml = String::new();
        for run in runs {
            run.to_xml(&mut runs_xml)?;
        }
        out.extend_from_slice(runs_xml.as_bytes());
        out.extend_from_slice(b"</w:p>");

        Ok(out)
    }
}
