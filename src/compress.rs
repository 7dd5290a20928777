//! Stream compression.
//!
//! The serializer hands every stream dictionary to a [`Compressor`] the first time it
//! formats that dictionary, so any filter metadata the compressor adds ends up in the
//! object's own output.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::debug;
use std::io::prelude::*;

use crate::{Dictionary, Result};

/// Rewrites a stream dictionary in place: encodes the payload and records the filter.
pub trait Compressor {
    fn compress(&self, dict: &mut Dictionary) -> Result<()>;
}

/// Zlib (`/FlateDecode`) stream compression.
#[derive(Debug, Clone, Copy)]
pub struct FlateCompressor {
    level: Compression,
}

impl FlateCompressor {
    pub fn new(level: u32) -> FlateCompressor {
        FlateCompressor {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for FlateCompressor {
    fn default() -> Self {
        FlateCompressor {
            level: Compression::default(),
        }
    }
}

impl Compressor for FlateCompressor {
    fn compress(&self, dict: &mut Dictionary) -> Result<()> {
        if !dict.allows_compression || dict.has(b"Filter") {
            return Ok(());
        }
        let Some(content) = dict.stream() else {
            return Ok(());
        };

        let mut encoder = ZlibEncoder::new(Vec::new(), self.level);
        encoder.write_all(content)?;
        let compressed = encoder.finish()?;
        if compressed.len() + 19 < content.len() {
            debug!("deflated stream from {} to {} bytes", content.len(), compressed.len());
            dict.set("Filter", "FlateDecode");
            dict.set_stream(compressed);
        }
        Ok(())
    }
}

/// Compress every dictionary in `dicts` with `compressor`.
pub fn compress<'a, C, I>(compressor: &C, dicts: I) -> Result<()>
where
    C: Compressor + ?Sized,
    I: IntoIterator<Item = &'a mut Dictionary>,
{
    for dict in dicts {
        compressor.compress(dict)?;
    }
    Ok(())
}
