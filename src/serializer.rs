use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::io::{Result as IoResult, Write};

use crate::{Compressor, Document, Error, Node, NodeId, Object, Result, StringFormat};

/// Token lists longer than this are wrapped onto indented continuation lines.
const LINE_WIDTH: usize = 70;

/// Formatted body objects (object number `n` lives at index `n - 1`) and the trailer text.
pub(crate) struct Serialized {
    pub objects: Vec<Vec<u8>>,
    pub trailer: Vec<u8>,
}

/// Walks the object graph below a trailer, numbering indirect nodes in
/// first-discovery order and formatting every node to PDF syntax.
///
/// State is per run: build a new serializer for every document written.
pub(crate) struct Serializer<'a, C: ?Sized> {
    document: &'a mut Document,
    compressor: Option<&'a C>,
    log_objects: bool,
    numbers: HashMap<NodeId, u32>,
    objects: Vec<Vec<u8>>,
    inlining: HashSet<NodeId>,
}

impl<'a, C: Compressor + ?Sized> Serializer<'a, C> {
    pub fn new(document: &'a mut Document, compressor: Option<&'a C>, log_objects: bool) -> Self {
        Serializer {
            document,
            compressor,
            log_objects,
            numbers: HashMap::new(),
            objects: Vec::new(),
            inlining: HashSet::new(),
        }
    }

    /// Format the whole graph reachable from `trailer`.
    ///
    /// The first pass only discovers and numbers objects; its trailer text is thrown
    /// away. `/Size` is then set on the trailer and the second pass formats the trailer
    /// again, resolving every indirect node through the table built by the first pass.
    pub fn run(mut self, trailer: NodeId) -> Result<Serialized> {
        self.document.get_dictionary(trailer)?;

        self.format_node(trailer)?;
        let size = self.objects.len() + 1;
        debug!("discovered {} indirect objects", self.objects.len());

        self.document.get_dictionary_mut(trailer)?.set("Size", size);
        let trailer = self.format_node(trailer)?;
        debug_assert_eq!(self.objects.len() + 1, size);

        Ok(Serialized {
            objects: self.objects,
            trailer,
        })
    }

    /// Resolve a value to the token written at its point of use: a reference for
    /// indirect nodes, the formatted content for everything else.
    fn add(&mut self, value: &Object) -> Result<Vec<u8>> {
        let mut token = Vec::new();
        match *value {
            Object::Null => token.extend_from_slice(b"null"),
            Object::Boolean(value) => token.extend_from_slice(if value { &b"true"[..] } else { &b"false"[..] }),
            Object::Integer(value) => token.extend_from_slice(itoa::Buffer::new().format(value).as_bytes()),
            Object::Real(value) => write_real(&mut token, value)?,
            Object::Name(ref name) => write_name(&mut token, name)?,
            Object::String(ref text, format) => write_string(&mut token, text, format)?,
            Object::Token(ref text) => token.extend_from_slice(text.as_bytes()),
            Object::Node(id) => return self.add_node(id),
        }
        Ok(token)
    }

    fn add_node(&mut self, id: NodeId) -> Result<Vec<u8>> {
        if !self.document.get(id)?.is_indirect() {
            if !self.inlining.insert(id) {
                return Err(Error::CircularReference {
                    node: id,
                    object: format!("{:?}", self.document.get(id)?),
                });
            }
            let result = self.format_node(id);
            self.inlining.remove(&id);
            return result;
        }

        let number = match self.numbers.get(&id) {
            Some(&number) => number,
            None => {
                // Reserve the slot before recursing so that cycles through this
                // node resolve to its reference.
                self.objects.push(Vec::new());
                let number = self.objects.len() as u32;
                self.numbers.insert(id, number);
                if self.log_objects {
                    info!("object {} <- node {}", number, id);
                }
                // The body of an indirect object is a text of its own, so inlining
                // restarts there; any way back to this node ends at its reference.
                let outer = std::mem::take(&mut self.inlining);
                let content = self.format_node(id);
                self.inlining = outer;
                self.objects[number as usize - 1] = content?;
                number
            }
        };
        Ok(format!("{} 0 R", number).into_bytes())
    }

    fn format_node(&mut self, id: NodeId) -> Result<Vec<u8>> {
        match self.document.get(id)? {
            Node::Array(array) => {
                let items: Vec<Object> = array.iter().cloned().collect();
                let tokens = items.iter().map(|item| self.add(item)).collect::<Result<Vec<_>>>()?;
                Ok(pack_tokens(&tokens, b"[", b"]"))
            }
            Node::Dictionary(_) => self.format_dictionary(id),
        }
    }

    fn format_dictionary(&mut self, id: NodeId) -> Result<Vec<u8>> {
        if let Some(compressor) = self.compressor {
            let dict = self.document.get_dictionary_mut(id)?;
            if dict.stream().is_some() {
                compressor.compress(dict)?;
            }
        }

        let dict = self.document.get_dictionary(id)?;
        let entries = dict.sorted_entries();
        let stream = dict.stream().map(<[u8]>::to_vec);

        let mut tokens = Vec::with_capacity(entries.len() * 2);
        for (key, value) in &entries {
            let mut name = Vec::new();
            write_name(&mut name, key)?;
            tokens.push(name);
            tokens.push(self.add(value)?);
        }

        let mut result = pack_tokens(&tokens, b"<<", b">>");
        if let Some(stream) = stream {
            result.extend_from_slice(b"\nstream\n");
            result.extend_from_slice(&stream);
            result.extend_from_slice(b"\nendstream");
        }
        Ok(result)
    }
}

/// Join tokens with spaces between `open` and `close`, breaking onto lines
/// indented by two spaces once a line would grow past [`LINE_WIDTH`].
pub(crate) fn pack_tokens(tokens: &[Vec<u8>], open: &[u8], close: &[u8]) -> Vec<u8> {
    let joined_len = tokens.iter().map(Vec::len).sum::<usize>() + tokens.len().saturating_sub(1);
    let mut result = Vec::with_capacity(open.len() + joined_len + close.len());
    result.extend_from_slice(open);

    if joined_len <= LINE_WIDTH {
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                result.push(b' ');
            }
            result.extend_from_slice(token);
        }
    } else {
        // Counts every token plus its trailing separator on the current line.
        let mut line_len = 0;
        for (index, token) in tokens.iter().enumerate() {
            if index > 0 {
                if line_len + token.len() > LINE_WIDTH {
                    result.extend_from_slice(b"\n  ");
                    line_len = 0;
                } else {
                    result.push(b' ');
                }
            }
            result.extend_from_slice(token);
            line_len += token.len() + 1;
        }
    }

    result.extend_from_slice(close);
    result
}

fn write_real(file: &mut dyn Write, value: f64) -> IoResult<()> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return file.write_all(itoa::Buffer::new().format(value as i64).as_bytes());
    }
    let text = format!("{:.6}", value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    file.write_all(text.as_bytes())
}

fn write_name(file: &mut dyn Write, name: &[u8]) -> IoResult<()> {
    file.write_all(b"/")?;
    for &byte in name {
        // white-space and delimiter chars are encoded to # sequences
        // also encode bytes outside of the range 33 (!) to 126 (~)
        if b" \t\n\r\x0C()<>[]{}/%#".contains(&byte) || !(33..=126).contains(&byte) {
            write!(file, "#{:02X}", byte)?;
        } else {
            file.write_all(&[byte])?;
        }
    }
    Ok(())
}

fn write_string(file: &mut dyn Write, text: &[u8], format: StringFormat) -> IoResult<()> {
    match format {
        // Within a Literal string, backslash (\) and unbalanced parentheses should be escaped.
        // An unescaped end-of-line marker reads back as \n, so \r also needs escaping.
        StringFormat::Literal => {
            let mut escape = vec![false; text.len()];
            let mut parentheses = Vec::new();
            for (index, &byte) in text.iter().enumerate() {
                match byte {
                    b'(' => parentheses.push(index),
                    b')' => {
                        if parentheses.pop().is_none() {
                            escape[index] = true;
                        }
                    }
                    b'\\' | b'\r' => escape[index] = true,
                    _ => continue,
                }
            }
            for index in parentheses {
                escape[index] = true;
            }

            file.write_all(b"(")?;
            for (&byte, escaped) in text.iter().zip(escape) {
                if escaped {
                    file.write_all(b"\\")?;
                    file.write_all(&[if byte == b'\r' { b'r' } else { byte }])?;
                } else {
                    file.write_all(&[byte])?;
                }
            }
            file.write_all(b")")?;
        }
        StringFormat::Hexadecimal => {
            file.write_all(b"<")?;
            for &byte in text {
                write!(file, "{:02X}", byte)?;
            }
            file.write_all(b">")?;
        }
    }
    Ok(())
}
