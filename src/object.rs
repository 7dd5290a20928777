use indexmap::IndexMap;
use std::fmt;
use std::str;

/// Stable identity of a composite object inside a [`Document`](crate::Document).
///
/// Two structurally identical dictionaries added separately get two distinct ids,
/// and therefore two distinct object numbers when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Basic PDF object types defined in an enum.
///
/// Composite values (arrays and dictionaries) live in the document arena and are
/// referred to through [`Object::Node`].
#[derive(Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Name(Vec<u8>),
    String(Vec<u8>, StringFormat),
    /// Opaque text written out verbatim.
    Token(String),
    Node(NodeId),
}

/// String objects can be written in two formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFormat {
    #[default]
    Literal,
    Hexadecimal,
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<i64> for Object {
    fn from(number: i64) -> Self {
        Object::Integer(number)
    }
}

macro_rules! from_smaller_ints {
	($( $Int: ty )+) => {
		$(
			impl From<$Int> for Object {
				fn from(number: $Int) -> Self {
					Object::Integer(i64::from(number))
				}
			}
		)+
	}
}

from_smaller_ints! {
    i8 i16 i32
    u8 u16 u32
}

impl From<usize> for Object {
    fn from(number: usize) -> Self {
        Object::Integer(number as i64)
    }
}

impl From<f64> for Object {
    fn from(number: f64) -> Self {
        Object::Real(number)
    }
}

impl From<f32> for Object {
    fn from(number: f32) -> Self {
        Object::Real(f64::from(number))
    }
}

impl From<String> for Object {
    fn from(name: String) -> Self {
        Object::Name(name.into_bytes())
    }
}

impl<'a> From<&'a str> for Object {
    fn from(name: &'a str) -> Self {
        Object::Name(name.as_bytes().to_vec())
    }
}

impl From<NodeId> for Object {
    fn from(id: NodeId) -> Self {
        Object::Node(id)
    }
}

impl Object {
    pub fn string_literal<S: Into<Vec<u8>>>(s: S) -> Self {
        Object::String(s.into(), StringFormat::Literal)
    }

    pub fn token<S: Into<String>>(s: S) -> Self {
        Object::Token(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(*self, Object::Null)
    }

    pub fn as_name(&self) -> Option<&[u8]> {
        match *self {
            Object::Name(ref name) => Some(name),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match *self {
            Object::Node(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Object::Null => f.write_str("null"),
            Object::Boolean(ref value) => {
                if *value {
                    f.write_str("true")
                } else {
                    f.write_str("false")
                }
            }
            Object::Integer(ref value) => write!(f, "{}", *value),
            Object::Real(ref value) => write!(f, "{}", *value),
            Object::Name(ref name) => write!(f, "/{}", String::from_utf8_lossy(name)),
            Object::String(ref text, _) => write!(f, "({})", String::from_utf8_lossy(text)),
            Object::Token(ref text) => f.write_str(text),
            Object::Node(ref id) => write!(f, "{}", id),
        }
    }
}

/// Array object.
#[derive(Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Object>,
    /// Write this array as a numbered object instead of inlining it.
    pub indirect: bool,
}

impl Array {
    pub fn new(items: Vec<Object>) -> Array {
        Array { items, indirect: false }
    }

    #[inline]
    pub fn with_indirect(mut self, indirect: bool) -> Array {
        self.indirect = indirect;
        self
    }

    pub fn push<V: Into<Object>>(&mut self, value: V) {
        self.items.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.items.iter()
    }

    pub fn is_indirect(&self) -> bool {
        self.indirect
    }
}

impl From<Vec<Object>> for Array {
    fn from(items: Vec<Object>) -> Self {
        Array::new(items)
    }
}

impl<V: Into<Object>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Array::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.items.iter().map(|item| format!("{:?}", item)).collect::<Vec<String>>();
        write!(f, "[{}]", items.join(" "))
    }
}

/// Dictionary object, optionally carrying a stream payload.
///
/// A dictionary with a stream is always written as an indirect object,
/// whatever its `indirect` flag says.
#[derive(Clone, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<Vec<u8>, Object>,
    /// Write this dictionary as a numbered object instead of inlining it.
    pub indirect: bool,
    stream: Option<Vec<u8>>,
    /// Can the stream be compressed when the document is written?
    /// Font streams may not be compressed, for example
    pub allows_compression: bool,
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary::new()
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            entries: IndexMap::new(),
            indirect: false,
            stream: None,
            allows_compression: true,
        }
    }

    #[inline]
    pub fn with_indirect(mut self, indirect: bool) -> Dictionary {
        self.indirect = indirect;
        self
    }

    #[inline]
    pub fn with_stream(mut self, content: Vec<u8>) -> Dictionary {
        self.set_stream(content);
        self
    }

    /// Default is that the stream may be compressed. On font streams,
    /// set this to false, otherwise the font will be corrupt
    #[inline]
    pub fn with_compression(mut self, allows_compression: bool) -> Dictionary {
        self.allows_compression = allows_compression;
        self
    }

    pub fn is_indirect(&self) -> bool {
        self.indirect || self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&[u8]> {
        self.stream.as_deref()
    }

    /// Attach a stream payload and keep `/Length` in sync with it.
    pub fn set_stream(&mut self, content: Vec<u8>) {
        self.set("Length", content.len());
        self.stream = Some(content);
    }

    pub fn remove_stream(&mut self) -> Option<Vec<u8>> {
        self.remove(b"Length");
        self.stream.take()
    }

    pub fn has(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &[u8]) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<Vec<u8>>,
        V: Into<Object>,
    {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Object> {
        self.entries.shift_remove(key)
    }

    pub fn type_name(&self) -> Option<&str> {
        self.get(b"Type")
            .and_then(Object::as_name)
            .and_then(|name| str::from_utf8(name).ok())
    }

    pub fn type_is(&self, type_name: &[u8]) -> bool {
        self.get(b"Type").and_then(Object::as_name) == Some(type_name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Vec<u8>, Object> {
        self.entries.iter()
    }

    /// Entries ordered by key, as they are written to the file.
    pub fn sorted_entries(&self) -> Vec<(Vec<u8>, Object)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

#[macro_export]
macro_rules! dictionary {
	() => {
		$crate::Dictionary::new()
	};
	($( $key: expr => $value: expr ),+ ,) => {
		$crate::dictionary!( $($key => $value),+ )
	};
	($( $key: expr => $value: expr ),*) => {{
		let mut dict = $crate::Dictionary::new();
		$(
			dict.set($key, $value);
		)*
		dict
	}}
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .into_iter()
            .map(|(key, value)| format!("/{} {:?}", String::from_utf8_lossy(key), value))
            .collect::<Vec<String>>();
        write!(f, "<<{}>>", entries.concat())?;
        if self.stream.is_some() {
            f.write_str("stream...endstream")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Vec<u8>, &'a Object);
    type IntoIter = indexmap::map::Iter<'a, Vec<u8>, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<Vec<u8>>> FromIterator<(K, Object)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, Object)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.set(k, v);
        }
        dict
    }
}

/// A composite object owned by the document arena.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Array(Array),
    Dictionary(Dictionary),
}

impl Node {
    /// Indirect nodes are written as numbered objects and referenced by `n 0 R`.
    pub fn is_indirect(&self) -> bool {
        match self {
            Node::Array(array) => array.is_indirect(),
            Node::Dictionary(dict) => dict.is_indirect(),
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Node::Dictionary(dict) => Some(dict),
            Node::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            Node::Dictionary(_) => None,
        }
    }
}

impl From<Dictionary> for Node {
    fn from(dict: Dictionary) -> Self {
        Node::Dictionary(dict)
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Node::Array(array)
    }
}

impl From<Vec<Object>> for Node {
    fn from(items: Vec<Object>) -> Self {
        Node::Array(Array::new(items))
    }
}
