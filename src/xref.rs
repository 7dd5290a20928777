use std::io::{Result, Write};

/// Cross-reference table of a classic (non-stream) xref section.
///
/// Entry 0 is always the head of the free list.
pub struct Xref {
    entries: Vec<XrefEntry>,
}

#[derive(Debug, Clone, Copy)]
pub enum XrefEntry {
    Free { next: u32, generation: u16 },
    Normal { offset: u64, generation: u16 },
}

impl XrefEntry {
    /// Write the fixed-width 20 byte entry: `oooooooooo ggggg n\r\n`.
    pub fn write_to(&self, file: &mut dyn Write) -> Result<()> {
        let (value, generation, kind) = match *self {
            XrefEntry::Free { next, generation } => (u64::from(next), generation, 'f'),
            XrefEntry::Normal { offset, generation } => (offset, generation, 'n'),
        };
        write!(file, "{:010} {:05} {}\r\n", value, generation, kind)
    }
}

impl Xref {
    pub fn new() -> Xref {
        Xref {
            entries: vec![XrefEntry::Free {
                next: 0,
                generation: 65535,
            }],
        }
    }

    /// Record the next object and return its object number.
    pub fn push(&mut self, entry: XrefEntry) -> u32 {
        self.entries.push(entry);
        (self.entries.len() - 1) as u32
    }

    /// Number of entries including the free-list head.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn write_to(&self, file: &mut dyn Write) -> Result<()> {
        writeln!(file, "xref\n0 {}", self.size())?;
        for entry in &self.entries {
            entry.write_to(file)?;
        }
        Ok(())
    }
}
