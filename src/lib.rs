mod object;
pub use object::{Array, Dictionary, Node, NodeId, Object, StringFormat};

mod document;
pub use document::Document;

mod error;
pub use error::{Error, Result};

pub mod compress;
pub use compress::{Compressor, FlateCompressor};

mod save_options;
pub use save_options::{WriteOptions, WriteOptionsBuilder};

mod creator;
pub use creator::PdfWriter;

mod serializer;
mod writer;
mod xref;
