/// Options for writing PDF documents
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriteOptions {
    /// Version written into the `%PDF-` header line
    pub version: String,

    /// Deflate stream payloads the first time they are written
    pub compress: bool,

    /// Zlib compression level (0-9)
    pub compression_level: u32,

    /// Log every object number as it is assigned
    pub log_objects: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            version: "1.3".to_string(),
            compress: true,
            compression_level: 6,
            log_objects: false,
        }
    }
}

impl WriteOptions {
    /// Create a builder for WriteOptions
    pub fn builder() -> WriteOptionsBuilder {
        WriteOptionsBuilder::default()
    }
}

/// Builder for WriteOptions
#[derive(Default)]
pub struct WriteOptionsBuilder {
    version: Option<String>,
    compress: Option<bool>,
    compression_level: Option<u32>,
    log_objects: bool,
}

impl WriteOptionsBuilder {
    /// Set the PDF version of the header
    pub fn version<S: Into<String>>(mut self, value: S) -> Self {
        self.version = Some(value.into());
        self
    }

    /// Enable or disable stream compression
    pub fn compress(mut self, value: bool) -> Self {
        self.compress = Some(value);
        self
    }

    /// Set compression level (0-9)
    pub fn compression_level(mut self, value: u32) -> Self {
        self.compression_level = Some(value);
        self
    }

    /// Enable or disable per-object logging
    pub fn log_objects(mut self, value: bool) -> Self {
        self.log_objects = value;
        self
    }

    /// Build the WriteOptions
    pub fn build(self) -> WriteOptions {
        let defaults = WriteOptions::default();
        WriteOptions {
            version: self.version.unwrap_or(defaults.version),
            compress: self.compress.unwrap_or(defaults.compress),
            compression_level: self.compression_level.map_or(defaults.compression_level, |level| level.min(9)),
            log_objects: self.log_objects,
        }
    }
}
