//! Bump arena backing the AST and all interned text.
//!
//! Every token payload, AST node and runtime string lives here and shares the
//! arena's lifetime; nothing is freed individually. Raw addresses are replaced
//! by integer handles ([`NodeId`], [`StrId`]) into append-only tables, which
//! keeps the bulk-reset lifecycle without pointer hazards.
//!
//! The arena accounts bytes against a fixed capacity: each allocation advances
//! a monotonic offset by its size rounded up to an 8-byte multiple, and an
//! allocation that would pass the capacity is refused with
//! [`ResourceError::Memory`]. `reset()` returns the offset to zero and
//! invalidates every previously issued handle.

use ahash::AHashMap;

use crate::ast::Node;
use crate::limits::{ResourceError, RunResult};

/// Handle of an AST node stored in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        Self(index.try_into().expect("node id overflow"))
    }

    /// Returns the raw index value.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a string interned in the arena.
///
/// Interned text is deduplicated on insert, so two `StrId`s are equal exactly
/// when their byte content is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrId(u32);

impl StrId {
    fn new(index: usize) -> Self {
        Self(index.try_into().expect("string id overflow"))
    }

    /// Returns the raw index value.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity bump store for AST nodes and interned text.
#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Node>,
    strings: Vec<String>,
    /// Maps interned text to its id for deduplication.
    string_map: AHashMap<String, StrId>,
    offset: usize,
    capacity: usize,
}

impl Arena {
    /// Creates an empty arena with the given byte capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            strings: Vec::new(),
            string_map: AHashMap::new(),
            offset: 0,
            capacity,
        }
    }

    /// Charges `size` bytes against the capacity, rounded up to 8.
    fn charge(&mut self, size: usize) -> RunResult<()> {
        let size = (size + 7) & !7;
        if self.offset + size > self.capacity {
            return Err(ResourceError::Memory {
                requested: size,
                capacity: self.capacity,
            });
        }
        self.offset += size;
        Ok(())
    }

    /// Stores a node, returning its handle.
    pub fn alloc_node(&mut self, node: Node) -> RunResult<NodeId> {
        self.charge(size_of::<Node>())?;
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Returns the node stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued before the last `reset()`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Copies `text` into the arena, returning its handle.
    ///
    /// Byte-equal text shares a single copy; only the first insert of a given
    /// string is charged against the capacity (at `len + 1` bytes, rounded).
    pub fn alloc_str(&mut self, text: &str) -> RunResult<StrId> {
        if let Some(&id) = self.string_map.get(text) {
            return Ok(id);
        }
        self.charge(text.len() + 1)?;
        let id = StrId::new(self.strings.len());
        self.string_map.insert(text.to_owned(), id);
        self.strings.push(text.to_owned());
        Ok(id)
    }

    /// Returns the text interned at `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued before the last `reset()`.
    #[must_use]
    pub fn get_str(&self, id: StrId) -> &str {
        &self.strings[id.index()]
    }

    /// Empties the arena and returns the offset to zero.
    ///
    /// Idempotent. All previously issued `NodeId`/`StrId` handles are
    /// invalidated.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.strings.clear();
        self.string_map.clear();
        self.offset = 0;
    }

    /// Bytes consumed so far, including alignment padding.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
