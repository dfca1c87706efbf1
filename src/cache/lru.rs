//! Recency List Module
//!
//! Doubly-linked list of cache entries ordered by recency of use.
//!
//! Nodes live in a slot arena (`Vec<Option<Node>>`). Links are slot indices,
//! so they only describe position: releasing an entry means taking it out of
//! its slot, never following or freeing a link. Vacated slots are recycled
//! through a free list.
//!
//! - Head = Most recently used
//! - Tail = Least recently used

use crate::cache::CacheEntry;

// == Node ==
#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Arena-backed doubly-linked list with O(1) insert, promote and evict.
#[derive(Debug, Default)]
pub struct RecencyList {
    /// Slot arena; `None` marks a free slot
    nodes: Vec<Option<Node>>,
    /// Vacated slots available for reuse
    free: Vec<usize>,
    /// Most recently used slot
    head: Option<usize>,
    /// Least recently used slot
    tail: Option<usize>,
    /// Number of linked entries
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` entries before the
    /// arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Insert At Head ==
    /// Links a new entry as the most recently used and returns its slot.
    pub fn insert_at_head(&mut self, entry: CacheEntry) -> usize {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.link_at_head(slot);
        self.len += 1;
        slot
    }

    // == Move To Head ==
    /// Marks the entry in `slot` as most recently used.
    ///
    /// No-op if the entry is already the head or the slot is vacant.
    pub fn move_to_head(&mut self, slot: usize) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_at_head(slot);
    }

    // == Remove Tail ==
    /// Detaches and returns the least recently used entry.
    ///
    /// The entry is handed back to the caller, who decides when it is
    /// released. Returns None if the list is empty.
    pub fn remove_tail(&mut self) -> Option<CacheEntry> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Remove ==
    /// Detaches and returns the entry in `slot`, freeing the slot.
    pub fn remove(&mut self, slot: usize) -> Option<CacheEntry> {
        self.node(slot)?;
        self.unlink(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.entry)
    }

    // == Accessors ==
    /// Returns the entry stored in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&CacheEntry> {
        self.node(slot).map(|node| &node.entry)
    }

    /// Slot of the most recently used entry.
    pub fn head_slot(&self) -> Option<usize> {
        self.head
    }

    /// Slot of the least recently used entry.
    pub fn tail_slot(&self) -> Option<usize> {
        self.tail
    }

    /// Most recently used entry.
    pub fn head(&self) -> Option<&CacheEntry> {
        self.get(self.head?)
    }

    /// Least recently used entry.
    pub fn tail(&self) -> Option<&CacheEntry> {
        self.get(self.tail?)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Walks from head to tail, yielding `(slot, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CacheEntry)> + '_ {
        self.walk(self.head, |node| node.next)
    }

    /// Walks from tail to head, yielding `(slot, entry)`.
    pub fn iter_rev(&self) -> impl Iterator<Item = (usize, &CacheEntry)> + '_ {
        self.walk(self.tail, |node| node.prev)
    }

    fn walk(
        &self,
        start: Option<usize>,
        step: fn(&Node) -> Option<usize>,
    ) -> impl Iterator<Item = (usize, &CacheEntry)> + '_ {
        let mut cursor = start;
        std::iter::from_fn(move || {
            let slot = cursor?;
            let node = self.node(slot)?;
            cursor = step(node);
            Some((slot, &node.entry))
        })
    }

    // == Linking ==
    fn node(&self, slot: usize) -> Option<&Node> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.nodes.get_mut(slot).and_then(Option::as_mut)
    }

    /// Links a detached slot in front of the current head.
    fn link_at_head(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old) => {
                if let Some(node) = self.node_mut(old) {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Detaches a slot from its neighbours, fixing head and tail.
    fn unlink(&mut self, slot: usize) {
        let Some((prev, next)) = self.node(slot).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = None;
        }
    }
}
