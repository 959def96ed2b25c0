//! Document content parsing (word/document.xml)
//!
//! This module parses the main document body into paragraphs and tables.
//! Runs keep their bold/italic/underline flags; hyperlinks are flattened
//! into their runs. Text boxes and `mc:Fallback` content are skipped.

use std::mem;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::archive::DOCUMENT_PART;
use crate::error::{OoxmlError, Result};
use crate::image::Image;

/// A parsed Word document body
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Body elements in document order
    pub blocks: Vec<BodyElement>,
}

/// Top-level body elements
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph with its content and style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Style ID (references styles.xml)
    pub style_id: Option<String>,
    /// Runs and images in order
    pub children: Vec<ParagraphChild>,
}

/// Child elements of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    /// A text run
    Run(Run),
    /// An embedded image
    Image(Image),
}

/// A text run with formatting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// The text content
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
    /// Whether the text is underlined
    pub underline: bool,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside <w:t> is significant
        reader.config_mut().trim_text(false);

        let mut parser = BodyParser::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => parser.start(e),
                Ok(Event::Empty(ref e)) => {
                    parser.start(e);
                    parser.end(e.local_name().as_ref());
                }
                Ok(Event::End(ref e)) => parser.end(e.local_name().as_ref()),
                Ok(Event::Text(ref e)) => {
                    if parser.in_text {
                        let text = e
                            .unescape()
                            .map_err(|err| OoxmlError::xml(DOCUMENT_PART, err.into()))?;
                        parser.text(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::xml(DOCUMENT_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document {
            blocks: parser.blocks,
        })
    }
}

impl Paragraph {
    /// Images in order
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.children.iter().filter_map(|child| match child {
            ParagraphChild::Image(image) => Some(image),
            ParagraphChild::Run(_) => None,
        })
    }

    fn push_run(&mut self, run: Run) {
        if !run.text.is_empty() {
            self.children.push(ParagraphChild::Run(run));
        }
    }

    /// Add an image unless the same relationship already appears here
    fn push_image(&mut self, image: Image) {
        if self.images().all(|existing| existing.rel_id != image.rel_id) {
            self.children.push(ParagraphChild::Image(image));
        }
    }
}

/// Streaming state for the body of word/document.xml
#[derive(Default)]
struct BodyParser {
    blocks: Vec<BodyElement>,
    in_body: bool,
    /// Depth inside content that must not reach the body (text boxes, fallbacks)
    skip_depth: u32,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    in_run_props: bool,
    in_text: bool,
    image: Option<ImageBuilder>,
    /// Open tables, innermost last
    tables: Vec<TableBuilder>,
}

impl BodyParser {
    fn start(&mut self, e: &BytesStart) {
        let name = e.local_name();
        if self.skip_depth > 0 {
            if is_skipped_container(name.as_ref()) {
                self.skip_depth += 1;
            }
            return;
        }

        match name.as_ref() {
            b"body" => self.in_body = true,
            n if is_skipped_container(n) => self.skip_depth += 1,
            b"tbl" if self.in_body => self.tables.push(TableBuilder::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.start_row();
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.start_cell();
                }
            }
            b"p" if self.in_body => self.paragraph = Some(Paragraph::default()),
            b"pStyle" => {
                if let Some(para) = self.paragraph.as_mut() {
                    para.style_id = get_attr(e, b"val");
                }
            }
            b"r" if self.paragraph.is_some() => self.run = Some(Run::default()),
            b"rPr" if self.run.is_some() => self.in_run_props = true,
            b"b" | b"i" | b"u" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    match name.as_ref() {
                        b"b" => run.bold = toggle_on(e),
                        b"i" => run.italic = toggle_on(e),
                        _ => run.underline = underline_on(e),
                    }
                }
            }
            b"t" if self.run.is_some() => self.in_text = true,
            b"tab" if !self.in_run_props => self.text("\t"),
            b"br" | b"cr" if !self.in_run_props => {
                if get_attr(e, b"type").as_deref() != Some("page") {
                    self.text("\n");
                }
            }
            b"drawing" | b"pict" | b"object" if self.paragraph.is_some() => {
                self.image = Some(ImageBuilder::default());
            }
            b"docPr" => {
                if let Some(image) = self.image.as_mut() {
                    image.alt = non_empty(get_attr(e, b"descr"))
                        .or_else(|| non_empty(get_attr(e, b"title")));
                }
            }
            b"blip" => {
                if let Some(image) = self.image.as_mut() {
                    image.rel_id = image.rel_id.take().or_else(|| get_attr(e, b"embed"));
                }
            }
            b"imagedata" => {
                if let Some(image) = self.image.as_mut() {
                    image.rel_id = image.rel_id.take().or_else(|| get_attr(e, b"id"));
                    if image.alt.is_none() {
                        image.alt = non_empty(get_attr(e, b"title"));
                    }
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            if is_skipped_container(name) {
                self.skip_depth -= 1;
            }
            return;
        }

        match name {
            b"body" => self.in_body = false,
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" => {
                if let (Some(run), Some(para)) = (self.run.take(), self.paragraph.as_mut()) {
                    para.push_run(run);
                }
                self.in_run_props = false;
            }
            b"drawing" | b"pict" | b"object" => {
                let Some(image) = self.image.take().and_then(ImageBuilder::build) else {
                    return;
                };
                if let Some(para) = self.paragraph.as_mut() {
                    // Text collected so far in this run precedes the image
                    if let Some(run) = self.run.as_mut() {
                        let before = Run {
                            text: mem::take(&mut run.text),
                            ..run.clone()
                        };
                        para.push_run(before);
                    }
                    para.push_image(image);
                }
            }
            b"p" => {
                if let Some(para) = self.paragraph.take() {
                    match self.tables.last_mut() {
                        Some(table) => table.push_paragraph(para),
                        None => self.blocks.push(BodyElement::Paragraph(para)),
                    }
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.end_cell();
                }
            }
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.end_row();
                }
            }
            b"tbl" => {
                if let Some(builder) = self.tables.pop() {
                    let table = builder.build();
                    match self.tables.last_mut() {
                        Some(parent) => parent.absorb(table),
                        None => self.blocks.push(BodyElement::Table(table)),
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// Elements whose content never reaches the body stream
fn is_skipped_container(name: &[u8]) -> bool {
    matches!(name, b"txbxContent" | b"Fallback")
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
    row: Option<TableRow>,
    cell: Option<TableCell>,
}

impl TableBuilder {
    fn start_row(&mut self) {
        self.row = Some(TableRow::default());
    }

    fn start_cell(&mut self) {
        self.cell = Some(TableCell::default());
    }

    fn push_paragraph(&mut self, para: Paragraph) {
        if let Some(cell) = self.cell.as_mut() {
            cell.paragraphs.push(para);
        }
    }

    fn end_cell(&mut self) {
        if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
            row.cells.push(cell);
        }
    }

    fn end_row(&mut self) {
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }
    }

    /// Flatten a nested table into the current cell
    fn absorb(&mut self, nested: Table) {
        for para in nested
            .rows
            .into_iter()
            .flat_map(|r| r.cells)
            .flat_map(|c| c.paragraphs)
        {
            self.push_paragraph(para);
        }
    }

    fn build(self) -> Table {
        Table { rows: self.rows }
    }
}

#[derive(Default)]
struct ImageBuilder {
    rel_id: Option<String>,
    alt: Option<String>,
}

impl ImageBuilder {
    /// Build the image if a relationship ID was found
    fn build(self) -> Option<Image> {
        Some(Image {
            rel_id: self.rel_id?,
            alt: self.alt,
        })
    }
}

/// Get an attribute by local name, ignoring its namespace prefix
pub(crate) fn get_attr(e: &BytesStart, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local_name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// On/off property such as `<w:b/>` or `<w:i w:val="0"/>`
fn toggle_on(e: &BytesStart) -> bool {
    !matches!(
        get_attr(e, b"val").as_deref(),
        Some("0") | Some("false") | Some("off")
    )
}

/// Underline is on for every `w:u` value except "none"
fn underline_on(e: &BytesStart) -> bool {
    !matches!(get_attr(e, b"val").as_deref(), Some("none") | Some("0") | Some("false"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
