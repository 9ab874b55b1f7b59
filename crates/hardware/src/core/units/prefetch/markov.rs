//! Markov Prefetcher.
//!
//! Learns, for each missing block, which blocks missed right after it and how
//! often. On a miss to block `X` it prefetches the most frequent recorded
//! successor of `X`.
//!
//! The table is bounded twice:
//! - each row keeps at most [`MARKOV_ROW_ENTRIES`] successors; a new successor
//!   in a full row replaces the least frequent one (ties: lower block address);
//! - the table keeps at most `capacity` rows; a new row in a full table
//!   replaces the least recently touched row.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1) row lookup + O(E) entry scan, E ≤ 4
//!   - `record()`: O(E) + O(log R) recency update, R = row count
//! - **Space Complexity:** O(R × E)
//! - **Best Case:** Pointer chasing and other irregular but repeating miss streams
//! - **Worst Case:** Streams with no repetition (the table only churns)

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use super::Prefetcher;
use crate::common::BlockAddr;
use crate::common::constants::MARKOV_ROW_ENTRIES;

/// One recorded transition `source -> successor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkovEntry {
    /// Block that missed after the row's source block.
    pub successor: BlockAddr,
    /// Times the transition was observed.
    pub count: u64,
}

/// Successors of one source block. Successors are distinct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkovRow {
    entries: Vec<MarkovEntry>,
}

impl MarkovRow {
    fn with_successor(successor: BlockAddr) -> Self {
        let mut entries = Vec::with_capacity(MARKOV_ROW_ENTRIES);
        entries.push(MarkovEntry {
            successor,
            count: 1,
        });
        Self { entries }
    }

    /// Entries in insertion/replacement slot order.
    pub fn entries(&self) -> &[MarkovEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the row holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most frequent successor; ties go to the higher block address.
    pub fn best(&self) -> Option<&MarkovEntry> {
        self.entries.iter().max_by_key(|e| (e.count, e.successor))
    }

    /// Records one more observation of `successor`.
    fn record(&mut self, successor: BlockAddr) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.successor == successor) {
            entry.count += 1;
            return;
        }
        let fresh = MarkovEntry {
            successor,
            count: 1,
        };
        if self.entries.len() < MARKOV_ROW_ENTRIES {
            self.entries.push(fresh);
        } else if let Some(victim) = self
            .entries
            .iter_mut()
            .min_by_key(|e| (e.count, e.successor))
        {
            *victim = fresh;
        }
    }
}

/// Bounded map from source block to [`MarkovRow`], with row recency.
#[derive(Clone, Debug)]
pub struct MarkovTable {
    rows: HashMap<BlockAddr, MarkovRow>,
    /// Last touch stamp of each row.
    stamps: HashMap<BlockAddr, u64>,
    /// Row keys ordered by touch stamp, oldest first.
    recency: BTreeMap<u64, BlockAddr>,
    clock: u64,
    capacity: usize,
    prev: Option<BlockAddr>,
}

impl MarkovTable {
    /// Creates an empty table holding at most `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: HashMap::new(),
            stamps: HashMap::new(),
            recency: BTreeMap::new(),
            clock: 0,
            capacity,
            prev: None,
        }
    }

    /// Maximum number of rows.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `source`, if one exists.
    pub fn row(&self, source: BlockAddr) -> Option<&MarkovRow> {
        self.rows.get(&source)
    }

    /// Row keys from most to least recently touched.
    pub fn rows_by_recency(&self) -> impl Iterator<Item = BlockAddr> + '_ {
        self.recency.values().rev().copied()
    }

    /// Last block passed to [`record`](Self::record).
    pub const fn previous(&self) -> Option<BlockAddr> {
        self.prev
    }

    /// Predicted successor of `block`, read from the current table state.
    pub fn predict(&self, block: BlockAddr) -> Option<BlockAddr> {
        self.rows
            .get(&block)
            .and_then(MarkovRow::best)
            .map(|entry| entry.successor)
    }

    /// Records the transition from the previously recorded block to `block`.
    ///
    /// The first call only remembers `block`. Afterwards the previous block's
    /// row is updated (or created, evicting the least recently touched row
    /// when full) and becomes most recently touched; if `block` has a row of
    /// its own, that row is then touched too.
    pub fn record(&mut self, block: BlockAddr) {
        let Some(prev) = self.prev.replace(block) else {
            return;
        };

        if let Some(row) = self.rows.get_mut(&prev) {
            row.record(block);
            self.touch_row(prev);
        } else {
            if self.rows.len() >= self.capacity {
                if let Some((_, lru)) = self.recency.pop_first() {
                    trace!(row = %lru, "evicting Markov row");
                    let _ = self.rows.remove(&lru);
                    let _ = self.stamps.remove(&lru);
                }
            }
            let _ = self.rows.insert(prev, MarkovRow::with_successor(block));
            self.touch_row(prev);
        }

        if self.rows.contains_key(&block) {
            self.touch_row(block);
        }
    }

    fn touch_row(&mut self, key: BlockAddr) {
        let stamp = self.clock;
        self.clock += 1;
        if let Some(old) = self.stamps.insert(key, stamp) {
            let _ = self.recency.remove(&old);
        }
        let _ = self.recency.insert(stamp, key);
    }
}

/// Markov prefetcher state.
#[derive(Clone, Debug)]
pub struct MarkovPrefetcher {
    table: MarkovTable,
}

impl MarkovPrefetcher {
    /// Creates a Markov prefetcher with a `rows`-row table.
    pub fn new(rows: usize) -> Self {
        Self {
            table: MarkovTable::new(rows),
        }
    }
}

impl Prefetcher for MarkovPrefetcher {
    /// Predicts from the row of `block`, then records the transition into `block`.
    ///
    /// A prediction equal to `block` itself is dropped.
    fn observe(&mut self, block: BlockAddr) -> Option<BlockAddr> {
        let target = self.table.predict(block).filter(|&t| t != block);
        self.table.record(block);
        target
    }

    fn markov_table(&self) -> Option<&MarkovTable> {
        Some(&self.table)
    }
}
