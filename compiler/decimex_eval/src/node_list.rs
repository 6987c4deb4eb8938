//! Term nodes of one nesting level and the per-operator occurrence index.
//!
//! Nodes live in an arena (`Vec`) and are linked by index, so splicing a node
//! out during reduction only rewrites two links and never moves values.

use bigdecimal::BigDecimal;

use crate::operator::Operator;

/// Index of a node inside its [`NodeList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A resolved term and the operator that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermNode {
    pub value: BigDecimal,
    pub op: Option<Operator>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked sequence of term nodes, in source order.
#[derive(Debug, Default)]
pub struct NodeList {
    nodes: Vec<TermNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    live: usize,
}

impl NodeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node after the current tail
    pub fn push(&mut self, value: BigDecimal, op: Option<Operator>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TermNode {
            value,
            op,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail.0].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.live += 1;
        id
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// The most recently appended node, if it is still linked
    pub fn last(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn get(&self, id: NodeId) -> &TermNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TermNode {
        &mut self.nodes[id.0]
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    /// Splice a node out of the sequence; its slot in the arena stays
    pub fn unlink(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = &self.nodes[id.0];
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.nodes[prev.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.nodes[id.0];
        node.prev = None;
        node.next = None;
        self.live -= 1;
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Walk the linked nodes from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Iterator over the linked nodes of a [`NodeList`]
pub struct Iter<'a> {
    list: &'a NodeList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TermNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.get(id);
        self.cursor = node.next;
        Some(node)
    }
}

/// For every operator, the nodes carrying it, in discovery order.
#[derive(Debug, Default)]
pub struct OccurrenceIndex {
    per_op: [Vec<NodeId>; 5],
}

impl OccurrenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, op: Operator, id: NodeId) {
        self.per_op[op.rank()].push(id);
    }

    pub fn occurrences(&self, op: Operator) -> &[NodeId] {
        &self.per_op[op.rank()]
    }

    pub fn total(&self) -> usize {
        self.per_op.iter().map(Vec::len).sum()
    }
}
