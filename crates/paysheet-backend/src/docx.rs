//! DOCX (Microsoft Word) text extraction
//!
//! # Architecture
//!
//! Manual ZIP + XML parsing. Only `word/document.xml` is read: every body
//! paragraph becomes one line of text (`w:t` runs, `w:tab` as a tab, `w:br`
//! and `w:cr` as newlines), each followed by `\n`.
//!
//! Paragraphs inside tables are not body paragraphs and are skipped, unless
//! [`BackendOptions::include_docx_tables`] is set, in which case each table
//! row is emitted as one line of tab-joined cell texts in document order.
//! Text boxes and nested tables are always skipped.

use crate::traits::{BackendOptions, TextBackend};
use paysheet_core::{InputFormat, PaysheetError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract an attribute value by key from an element
#[inline]
fn get_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// State for walking `word/document.xml`
#[derive(Debug, Default)]
struct WalkBodyState {
    include_tables: bool,
    out: String,

    /// Text of the outermost open paragraph
    paragraph: String,
    paragraph_depth: usize,
    table_depth: usize,
    textbox_depth: usize,
    /// Open `w:r` elements, text box runs included
    run_depth: usize,
    in_text: bool,

    /// Cells of the current top-level table row
    row_cells: Vec<String>,
    cell: String,
    cell_has_paragraph: bool,
}

impl WalkBodyState {
    fn new(options: &BackendOptions) -> Self {
        Self {
            include_tables: options.include_docx_tables,
            ..Self::default()
        }
    }

    /// Whether text at the current position belongs to the output
    const fn collecting(&self) -> bool {
        self.paragraph_depth == 1
            && self.textbox_depth == 0
            && (self.table_depth == 0 || (self.include_tables && self.table_depth == 1))
    }

    fn handle_start_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:tbl" => {
                self.table_depth += 1;
            }
            b"w:tr" if self.table_depth == 1 => {
                self.row_cells.clear();
            }
            b"w:tc" if self.table_depth == 1 => {
                self.cell.clear();
                self.cell_has_paragraph = false;
            }
            b"w:txbxContent" => {
                self.textbox_depth += 1;
            }
            b"w:p" => {
                self.paragraph_depth += 1;
                if self.paragraph_depth == 1 {
                    self.paragraph.clear();
                }
            }
            b"w:r" => {
                self.run_depth += 1;
            }
            b"w:t" if self.run_depth > 0 => {
                self.in_text = true;
            }
            _ => {}
        }
    }

    fn handle_empty_element(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:p" if self.paragraph_depth == 0 => {
                // <w:p/> is an empty paragraph
                self.paragraph_depth = 1;
                self.paragraph.clear();
                self.handle_paragraph_end();
                self.paragraph_depth = 0;
            }
            b"w:tab" if self.run_depth > 0 && self.collecting() => {
                self.paragraph.push('\t');
            }
            b"w:br" if self.run_depth > 0 && self.collecting() => {
                // page and column breaks carry no text
                if get_attr(e, b"w:type").map_or(true, |t| t == "textWrapping") {
                    self.paragraph.push('\n');
                }
            }
            b"w:cr" if self.run_depth > 0 && self.collecting() => {
                self.paragraph.push('\n');
            }
            _ => {}
        }
    }

    fn handle_text_event(&mut self, text: &str) {
        if self.in_text && self.collecting() {
            self.paragraph.push_str(text);
        }
    }

    fn handle_end_element(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            b"w:tr" if self.table_depth == 1 && self.include_tables => {
                self.out.push_str(&self.row_cells.join("\t"));
                self.out.push('\n');
                self.row_cells.clear();
            }
            b"w:tc" if self.table_depth == 1 => {
                self.row_cells.push(std::mem::take(&mut self.cell));
            }
            b"w:txbxContent" => {
                self.textbox_depth = self.textbox_depth.saturating_sub(1);
            }
            b"w:p" => {
                if self.paragraph_depth == 1 {
                    self.handle_paragraph_end();
                }
                self.paragraph_depth = self.paragraph_depth.saturating_sub(1);
            }
            b"w:r" => {
                self.run_depth = self.run_depth.saturating_sub(1);
                self.in_text = false;
            }
            b"w:t" => {
                self.in_text = false;
            }
            _ => {}
        }
    }

    fn handle_paragraph_end(&mut self) {
        if self.textbox_depth > 0 {
            return;
        }
        let text = std::mem::take(&mut self.paragraph);
        match self.table_depth {
            0 => {
                self.out.push_str(&text);
                self.out.push('\n');
            }
            1 if self.include_tables => {
                // multi-paragraph cells are joined with a space to keep one line per row
                if self.cell_has_paragraph {
                    self.cell.push(' ');
                }
                self.cell.push_str(text.trim_end_matches('\n'));
                self.cell_has_paragraph = true;
            }
            _ => {}
        }
    }

    fn into_text(self) -> String {
        self.out
    }
}

/// DOCX backend for extracting text from Microsoft Word documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new DOCX backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for extraction"]
    pub const fn new() -> Self {
        Self
    }

    /// Read `word/document.xml` out of the archive
    fn read_document_xml<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, PaysheetError> {
        let mut document_xml = archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| PaysheetError::extraction(InputFormat::Docx, format!("missing {DOCUMENT_XML}: {e}")))?;

        let mut content = String::new();
        document_xml
            .read_to_string(&mut content)
            .map_err(|e| PaysheetError::extraction(InputFormat::Docx, e))?;
        Ok(content)
    }

    /// Walk through document body and collect paragraph text
    fn walk_body(xml_content: &str, options: &BackendOptions) -> Result<String, PaysheetError> {
        let mut state = WalkBodyState::new(options);

        let mut reader = Reader::from_str(xml_content);
        // whitespace inside w:t is significant (xml:space="preserve")
        reader.trim_text(false);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => state.handle_start_element(&e),
                Ok(Event::Empty(e)) => state.handle_empty_element(&e),
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| PaysheetError::extraction(InputFormat::Docx, e))?;
                    state.handle_text_event(&text);
                }
                Ok(Event::End(e)) => state.handle_end_element(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PaysheetError::extraction(
                        InputFormat::Docx,
                        format!("error parsing {DOCUMENT_XML}: {e}"),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(state.into_text())
    }
}

impl TextBackend for DocxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn extract_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<String, PaysheetError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            PaysheetError::extraction(InputFormat::Docx, format!("failed to open DOCX as ZIP: {e}"))
        })?;

        let xml_content = Self::read_document_xml(&mut archive)?;
        let text = Self::walk_body(&xml_content, options)?;
        log::debug!("DOCX extracted: {} chars", text.len());
        Ok(text)
    }
}
