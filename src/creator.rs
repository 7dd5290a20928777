use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{Array, Document, Error, NodeId, Result, WriteOptions, dictionary};

/// Builds the page tree and catalog around a list of pages and writes the file.
///
/// ```no_run
/// use pdfemit::{PdfWriter, dictionary};
///
/// let mut writer = PdfWriter::new();
/// let page = writer.document_mut().add(dictionary! { "Type" => "Page" });
/// writer.add_page(page)?;
/// writer.write("blank.pdf")?;
/// # Ok::<(), pdfemit::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct PdfWriter {
    document: Document,
    pages: Vec<NodeId>,
    options: WriteOptions,
    tree: Option<PageTree>,
}

/// Document structure nodes, created on the first write and refreshed on later ones.
#[derive(Debug, Clone, Copy)]
struct PageTree {
    kids: NodeId,
    pages: NodeId,
    trailer: NodeId,
}

impl PdfWriter {
    pub fn new() -> PdfWriter {
        PdfWriter::default()
    }

    pub fn with_options(options: WriteOptions) -> PdfWriter {
        PdfWriter {
            options,
            ..PdfWriter::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The graph pages and their resources are built in.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a page. The page dictionary must have `/Type /Page`.
    ///
    /// Each call wraps a copy of the dictionary in a new indirect object and
    /// returns its id, so adding the same page twice yields two pages.
    pub fn add_page(&mut self, page: NodeId) -> Result<NodeId> {
        let dict = self.document.get_dictionary(page)?;
        if !dict.type_is(b"Page") {
            return Err(Error::ContractViolation(format!(
                "page {} has type {:?}, expected Page",
                page,
                dict.type_name()
            )));
        }
        let wrapped = dict.clone().with_indirect(true);
        let wrapped = self.document.add(wrapped);
        self.pages.push(wrapped);
        Ok(wrapped)
    }

    /// Write the document to the specified file path.
    pub fn write<P: AsRef<Path>>(&mut self, path: P) -> Result<File> {
        let trailer = self.build_trailer()?;
        let options = self.options.clone();
        self.document.save(path, trailer, &options)
    }

    /// Write the document to an arbitrary target.
    pub fn write_to<W: Write>(&mut self, target: &mut W) -> Result<()> {
        let trailer = self.build_trailer()?;
        let options = self.options.clone();
        self.document.dump(target, trailer, &options)
    }

    /// Point every page's `/Parent` at the page tree and return a trailer
    /// dictionary rooted at the catalog. The `/Pages` and `/Catalog` nodes are
    /// added once; later calls only refresh `/Kids` and `/Count`.
    fn build_trailer(&mut self) -> Result<NodeId> {
        let tree = match self.tree {
            Some(tree) => tree,
            None => {
                let kids = self.document.add(Array::default());
                let pages = self.document.add(dictionary! { "Type" => "Pages" }.with_indirect(true));
                let catalog = self.document.add(
                    dictionary! {
                        "Type" => "Catalog",
                        "Pages" => pages,
                    }
                    .with_indirect(true),
                );
                let trailer = self.document.add(dictionary! { "Root" => catalog });
                let tree = PageTree { kids, pages, trailer };
                self.tree = Some(tree);
                tree
            }
        };

        *self.document.get_array_mut(tree.kids)? = self.pages.iter().copied().collect();
        let pages = self.document.get_dictionary_mut(tree.pages)?;
        pages.set("Count", self.pages.len());
        pages.set("Kids", tree.kids);
        for &page in &self.pages {
            self.document.get_dictionary_mut(page)?.set("Parent", tree.pages);
        }
        Ok(tree.trailer)
    }
}
