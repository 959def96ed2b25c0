//! Block model construction
//!
//! One forward pass over the source elements produces the normalized
//! `Vec<Block>` and the asset catalog together, so asset ids follow
//! document order.

use tracing::debug;
use wordbook_ast::{
    Block, Heading, ImageRef, Paragraph, SourceElement, SourceImage, SourceParagraph, SourceRun,
    SourceTable, Table,
};

use crate::assets::{AssetCatalog, AssetExtractor};
use crate::classify::{HeadingClassifier, StyleNameClassifier};
use crate::inline::spans_from_runs;

/// Output of the forward pass
#[derive(Debug, Clone, Default)]
pub struct BlockModel {
    /// Blocks in document order
    pub blocks: Vec<Block>,
    /// Extracted images
    pub assets: AssetCatalog,
    /// Recoverable problems (skipped images)
    pub warnings: Vec<String>,
}

/// Builds the block model from source elements
pub struct BlockModelBuilder<'a> {
    classifier: &'a dyn HeadingClassifier,
    extractor: AssetExtractor,
    blocks: Vec<Block>,
}

impl<'a> BlockModelBuilder<'a> {
    /// Create a builder using the given heading classifier
    pub fn new(classifier: &'a dyn HeadingClassifier) -> Self {
        Self {
            classifier,
            extractor: AssetExtractor::new(),
            blocks: Vec::new(),
        }
    }

    /// Consume the elements and return the finished model
    pub fn build(mut self, elements: &[SourceElement]) -> BlockModel {
        for element in elements {
            match element {
                SourceElement::Paragraph(p) => self.paragraph(p),
                SourceElement::Table(t) => self.table(t),
            }
        }

        let (assets, warnings) = self.extractor.finish();
        debug!(
            "Built {} blocks with {} assets",
            self.blocks.len(),
            assets.len()
        );

        BlockModel {
            blocks: self.blocks,
            assets,
            warnings,
        }
    }

    fn paragraph(&mut self, para: &SourceParagraph) {
        let spans = spans_from_runs(&para.runs);

        let heading = self
            .classifier
            .heading_level(para)
            .map(|level| Heading::new(level, spans.clone()))
            .filter(|h| !h.text.is_empty());

        match heading {
            Some(heading) => self.blocks.push(Block::Heading(heading)),
            None => {
                let paragraph = Paragraph::new(spans);
                if !paragraph.plain_text().trim().is_empty() {
                    self.blocks.push(Block::Paragraph(paragraph));
                }
            }
        }

        self.images(para.images());
    }

    fn table(&mut self, table: &SourceTable) {
        let rows = table
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text()).collect())
            .collect();
        self.blocks.push(Block::Table(Table { rows }));

        let images = table
            .rows
            .iter()
            .flatten()
            .flat_map(|cell| cell.paragraphs.iter())
            .flat_map(|p| p.runs.iter())
            .filter_map(|run| match run {
                SourceRun::Image(image) => Some(image),
                SourceRun::Text(_) => None,
            });
        self.images(images);
    }

    fn images<'i>(&mut self, images: impl Iterator<Item = &'i SourceImage>) {
        for image in images {
            if let Some(asset_id) = self.extractor.extract(image) {
                self.blocks.push(Block::Image(ImageRef {
                    asset_id,
                    alt: image.alt.clone().filter(|alt| !alt.trim().is_empty()),
                }));
            }
        }
    }
}

/// Build blocks with the default style-name classifier
pub fn build_blocks(elements: &[SourceElement]) -> BlockModel {
    BlockModelBuilder::new(&StyleNameClassifier::new()).build(elements)
}
