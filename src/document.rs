use super::{Array, Dictionary, Error, Node, NodeId, Result};

/// PDF object graph.
///
/// The document owns every composite object. Identity is the arena slot handed
/// out by [`Document::add`], which stays stable for the lifetime of the document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Document {
        Document { nodes: Vec::new() }
    }

    /// Add a composite object to the graph and return its identity.
    pub fn add<T: Into<Node>>(&mut self, node: T) -> NodeId {
        self.nodes.push(node.into());
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::NodeNotFound(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(Error::NodeNotFound(id))
    }

    pub fn get_dictionary(&self, id: NodeId) -> Result<&Dictionary> {
        match self.get(id)? {
            Node::Dictionary(dict) => Ok(dict),
            Node::Array(_) => Err(Error::ContractViolation(format!("node {} is not a dictionary", id))),
        }
    }

    pub fn get_dictionary_mut(&mut self, id: NodeId) -> Result<&mut Dictionary> {
        match self.get_mut(id)? {
            Node::Dictionary(dict) => Ok(dict),
            Node::Array(_) => Err(Error::ContractViolation(format!("node {} is not a dictionary", id))),
        }
    }

    pub fn get_array(&self, id: NodeId) -> Result<&Array> {
        match self.get(id)? {
            Node::Array(array) => Ok(array),
            Node::Dictionary(_) => Err(Error::ContractViolation(format!("node {} is not an array", id))),
        }
    }

    pub fn get_array_mut(&mut self, id: NodeId) -> Result<&mut Array> {
        match self.get_mut(id)? {
            Node::Array(array) => Ok(array),
            Node::Dictionary(_) => Err(Error::ContractViolation(format!("node {} is not an array", id))),
        }
    }
}
