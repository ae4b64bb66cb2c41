//! Dependency graphs built from three-column sentence blocks
//!
//! A block holds one token per line as `word<TAB>tag<TAB>head`. Heads are
//! 1-based; head 0 attaches a token to the artificial root at address 0.
//! Structure is taken as given: cycles and multiple roots are not checked.

use crate::bytes::{is_blank, leading_fields, parse_int};
use crate::error::GraphError;
use std::fmt::Write as _;

/// Address of a node in a graph (0 is the artificial root)
pub type Address = usize;

/// Something that turns a three-column block into a parse structure
pub trait GraphBuilder {
    type Graph;

    fn build(&self, block: &str) -> Result<Self::Graph, GraphError>;
}

/// Builds [`DependencyGraph`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyGraphBuilder;

impl GraphBuilder for DependencyGraphBuilder {
    type Graph = DependencyGraph;

    fn build(&self, block: &str) -> Result<DependencyGraph, GraphError> {
        DependencyGraph::from_conll(block)
    }
}

/// A node in a dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub address: Address,
    pub word: Option<String>,
    pub tag: String,
    pub head: Option<Address>,
    pub children: Vec<Address>,
}

impl GraphNode {
    fn top() -> Self {
        Self {
            address: 0,
            word: None,
            tag: "TOP".to_string(),
            head: None,
            children: Vec::new(),
        }
    }
}

/// A dependency graph (one sentence)
///
/// Node 0 is always the artificial root, so `nodes` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
}

impl DependencyGraph {
    /// Create a graph holding only the artificial root
    pub fn new() -> Self {
        Self {
            nodes: vec![GraphNode::top()],
        }
    }

    /// Parse a three-column block
    pub fn from_conll(block: &str) -> Result<Self, GraphError> {
        let mut rows = Vec::new();
        for (line_idx, line) in block.lines().enumerate() {
            if is_blank(line) {
                continue;
            }
            let line_num = line_idx + 1;
            let [word, tag, head] = leading_fields::<3>(line)
                .map_err(|found| GraphError::MalformedLine { line: line_num, found })?;
            let head = parse_int(head).ok_or_else(|| GraphError::InvalidHead {
                line: line_num,
                head: head.to_string(),
            })?;
            rows.push((line_num, word, tag, head));
        }

        let len = rows.len();
        let mut graph = Self::new();
        for (line_num, word, tag, head) in rows {
            let head = usize::try_from(head)
                .ok()
                .filter(|h| *h <= len)
                .ok_or(GraphError::HeadOutOfRange { line: line_num, head, len })?;
            graph.add_node(word, tag, head);
        }

        // Heads may point forward, so link children once every node exists
        for address in 1..graph.nodes.len() {
            if let Some(head) = graph.nodes[address].head {
                graph.nodes[head].children.push(address);
            }
        }
        Ok(graph)
    }

    fn add_node(&mut self, word: &str, tag: &str, head: Address) -> Address {
        let address = self.nodes.len();
        self.nodes.push(GraphNode {
            address,
            word: Some(word.to_string()),
            tag: tag.to_string(),
            head: Some(head),
            children: Vec::new(),
        });
        address
    }

    /// All nodes, the artificial root first
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    fn tokens(&self) -> &[GraphNode] {
        self.nodes.get(1..).unwrap_or_default()
    }

    /// Number of tokens, not counting the artificial root
    pub fn len(&self) -> usize {
        self.tokens().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a node by address
    pub fn get_node(&self, address: Address) -> Option<&GraphNode> {
        self.nodes.get(address)
    }

    /// The first token attached to the artificial root
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes
            .first()
            .and_then(|top| top.children.first())
            .and_then(|&address| self.get_node(address))
    }

    /// Get the children of a node
    pub fn children(&self, address: Address) -> Vec<&GraphNode> {
        if let Some(node) = self.get_node(address) {
            node.children
                .iter()
                .filter_map(|&id| self.get_node(id))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get the parent of a node (the artificial root for top-level tokens)
    pub fn parent(&self, address: Address) -> Option<&GraphNode> {
        self.get_node(address)
            .and_then(|node| node.head)
            .and_then(|head| self.get_node(head))
    }

    /// Token words in order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens().iter().filter_map(|n| n.word.as_deref())
    }

    /// Serialize back to a three-column block
    pub fn to_conll(&self) -> String {
        let mut out = String::new();
        for node in self.tokens() {
            let _ = writeln!(
                out,
                "{}\t{}\t{}",
                node.word.as_deref().unwrap_or_default(),
                node.tag,
                node.head.unwrap_or(0)
            );
        }
        out
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
