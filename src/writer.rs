use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::serializer::{Serialized, Serializer};
use crate::xref::{Xref, XrefEntry};
use crate::{Compressor, Document, FlateCompressor, NodeId, Result, WriteOptions};

/// Comment line after the header; the high-bit bytes mark the file as binary.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

impl Document {
    /// Save the graph below `trailer` to the specified file path.
    #[inline]
    pub fn save<P: AsRef<Path>>(&mut self, path: P, trailer: NodeId, options: &WriteOptions) -> Result<File> {
        let mut file = BufWriter::new(File::create(path)?);
        self.dump(&mut file, trailer, options)?;
        file.into_inner().map_err(io::IntoInnerError::into_error).map_err(Into::into)
    }

    /// Write the graph below `trailer` to an arbitrary target, compressing streams
    /// with [`FlateCompressor`] when `options.compress` is set.
    #[inline]
    pub fn dump<W: Write>(&mut self, target: &mut W, trailer: NodeId, options: &WriteOptions) -> Result<()> {
        let compressor = FlateCompressor::new(options.compression_level);
        self.dump_with(target, trailer, options, &compressor)
    }

    /// Like [`Document::dump`], with a caller supplied compressor.
    ///
    /// `trailer` must be a dictionary; its `/Size` entry is overwritten with the
    /// final object count. The trailer's own `/Root` and friends are up to the caller.
    pub fn dump_with<W: Write, C: Compressor + ?Sized>(
        &mut self, target: &mut W, trailer: NodeId, options: &WriteOptions, compressor: &C,
    ) -> Result<()> {
        let compressor = if options.compress { Some(compressor) } else { None };
        let serialized = Serializer::new(self, compressor, options.log_objects).run(trailer)?;
        Writer::write_file(target, &options.version, &serialized)?;
        Ok(())
    }
}

pub struct Writer;

impl Writer {
    fn write_file<W: Write>(target: &mut W, version: &str, serialized: &Serialized) -> io::Result<()> {
        let mut target = CountingWrite {
            inner: target,
            bytes_written: 0,
        };
        writeln!(target, "%PDF-{}", version)?;
        target.write_all(BINARY_MARKER)?;

        let mut xref = Xref::new();
        for content in &serialized.objects {
            let offset = target.bytes_written as u64;
            let id = xref.push(XrefEntry::Normal { offset, generation: 0 });
            Writer::write_indirect_object(&mut target, id, content)?;
        }

        let xref_start = target.bytes_written;
        xref.write_to(&mut target)?;
        target.write_all(b"trailer\n\n")?;
        target.write_all(&serialized.trailer)?;
        write!(target, "\nstartxref\n{}\n%%EOF\n", xref_start)?;
        target.flush()?;

        debug!("wrote {} objects, {} bytes", serialized.objects.len(), target.bytes_written);
        Ok(())
    }

    fn write_indirect_object(file: &mut dyn Write, id: u32, content: &[u8]) -> io::Result<()> {
        writeln!(file, "{} 0 obj", id)?;
        file.write_all(content)?;
        file.write_all(b"\nendobj\n")
    }
}

pub struct CountingWrite<W: Write> {
    inner: W,
    bytes_written: usize,
}

impl<W: Write> Write for CountingWrite<W> {
    #[inline]
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buffer);
        if let Ok(bytes) = result {
            self.bytes_written += bytes;
        }
        result
    }

    #[inline]
    fn write_all(&mut self, buffer: &[u8]) -> io::Result<()> {
        self.bytes_written += buffer.len();
        // If this returns `Err` we can’t know how many bytes were actually written (if any)
        // but that doesn’t matter since we’re gonna abort the entire PDF generation anyway.
        self.inner.write_all(buffer)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
