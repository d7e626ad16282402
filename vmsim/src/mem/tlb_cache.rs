use hashbrown::HashMap;

use crate::types::{FrameId, PageId};

const NIL: usize = usize::MAX;

/// A cached page to frame binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TlbEntry {
    pub page: PageId,
    pub frame: FrameId,
}

#[derive(Clone, Copy)]
struct CachedEntry {
    entry: TlbEntry,
    prev: usize,
    next: usize,
}

/// Fixed size translation lookaside buffer with least recently used eviction.
///
/// Entries are stored in a slab of `capacity` slots which are linked into a
/// recency list, the head being the most and the tail the least recently used
/// entry. Lookups, touches, insertions and evictions are O(1).
///
/// A lookup does not change the recency of an entry, callers confirm the use
/// of a hit with [`touch`](Self::touch).
///
/// # Examples
///
/// ```
/// use vmsim::mem::TlbCache;
/// use vmsim::types::{FrameId, PageId};
///
/// let mut tlb = TlbCache::new(2);
/// tlb.insert(PageId::new(1), FrameId::new(1));
/// tlb.insert(PageId::new(2), FrameId::new(2));
/// tlb.touch(PageId::new(1));
///
/// // page 2 is the least recently used entry now
/// let evicted = tlb.insert(PageId::new(3), FrameId::new(3)).unwrap();
/// assert_eq!(evicted.page, PageId::new(2));
/// ```
#[derive(Clone)]
pub struct TlbCache {
    entries: Vec<CachedEntry>,
    index: HashMap<PageId, usize>,
    capacity: usize,
    head: usize,
    tail: usize,
    hits: usize,
}

impl TlbCache {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "tlb capacity must not be zero");
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
            head: NIL,
            tail: NIL,
            hits: 0,
        }
    }

    /// Returns the frame cached for `page`.
    ///
    /// A successful lookup is counted as a hit.
    #[inline]
    pub fn lookup(&mut self, page: PageId) -> Option<FrameId> {
        let idx = *self.index.get(&page)?;
        self.hits += 1;
        Some(self.entries[idx].entry.frame)
    }

    /// Marks `page` as the most recently used entry.
    ///
    /// Touching a page that is not cached does nothing.
    #[inline]
    pub fn touch(&mut self, page: PageId) {
        if let Some(&idx) = self.index.get(&page) {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    /// Caches the binding of `page` to `frame` as the most recently used entry.
    ///
    /// If the cache is full the least recently used entry is evicted and returned.
    pub fn insert(&mut self, page: PageId, frame: FrameId) -> Option<TlbEntry> {
        if let Some(&idx) = self.index.get(&page) {
            self.entries[idx].entry.frame = frame;
            self.unlink(idx);
            self.push_front(idx);
            return None;
        }

        let entry = TlbEntry { page, frame };

        if self.entries.len() < self.capacity {
            let idx = self.entries.len();
            self.entries.push(CachedEntry {
                entry,
                prev: NIL,
                next: NIL,
            });
            self.index.insert(page, idx);
            self.push_front(idx);
            return None;
        }

        // reuse the slot of the least recently used entry
        let idx = self.tail;
        let evicted = self.entries[idx].entry;
        self.unlink(idx);
        self.index.remove(&evicted.page);

        self.entries[idx].entry = entry;
        self.index.insert(page, idx);
        self.push_front(idx);

        Some(evicted)
    }

    /// Checks whether `page` is cached without counting a hit.
    pub fn contains(&self, page: PageId) -> bool {
        self.index.contains_key(&page)
    }

    /// Number of successful lookups so far.
    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the least recently used entry, the next one to be evicted.
    pub fn lru(&self) -> Option<TlbEntry> {
        self.entries.get(self.tail).map(|cached| cached.entry)
    }

    /// Iterates the cached entries from the most to the least recently used one.
    pub fn iter(&self) -> TlbIter<'_> {
        TlbIter {
            entries: &self.entries,
            cur: self.head,
        }
    }

    /// Drops all entries. The hit counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    fn unlink(&mut self, idx: usize) {
        let CachedEntry { prev, next, .. } = self.entries[idx];

        if prev != NIL {
            self.entries[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.entries[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.entries[idx].prev = NIL;
        self.entries[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.entries[idx].prev = NIL;
        self.entries[idx].next = self.head;

        if self.head != NIL {
            self.entries[self.head].prev = idx;
        }
        self.head = idx;

        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

pub struct TlbIter<'a> {
    entries: &'a [CachedEntry],
    cur: usize,
}

impl<'a> Iterator for TlbIter<'a> {
    type Item = TlbEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let cached = self.entries.get(self.cur)?;
        self.cur = cached.next;
        Some(cached.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(tlb: &TlbCache) -> Vec<u32> {
        tlb.iter().map(|e| e.page.as_u32()).collect()
    }

    fn insert(tlb: &mut TlbCache, page: u32) -> Option<TlbEntry> {
        tlb.insert(PageId::new(page), FrameId::new(page))
    }

    #[test]
    fn lookup_counts_hits() {
        let mut tlb = TlbCache::new(4);
        assert_eq!(tlb.lookup(PageId::new(1)), None);
        assert_eq!(tlb.hits(), 0);

        insert(&mut tlb, 1);
        assert_eq!(tlb.lookup(PageId::new(1)), Some(FrameId::new(1)));
        assert_eq!(tlb.lookup(PageId::new(1)), Some(FrameId::new(1)));
        assert_eq!(tlb.hits(), 2);
    }

    #[test]
    fn lookup_does_not_touch() {
        let mut tlb = TlbCache::new(2);
        insert(&mut tlb, 1);
        insert(&mut tlb, 2);
        tlb.lookup(PageId::new(1));

        let evicted = insert(&mut tlb, 3).unwrap();
        assert_eq!(evicted.page, PageId::new(1));
    }

    #[test]
    fn touch_reorders() {
        let mut tlb = TlbCache::new(3);
        insert(&mut tlb, 1);
        insert(&mut tlb, 2);
        insert(&mut tlb, 3);
        assert_eq!(pages(&tlb), vec![3, 2, 1]);

        tlb.touch(PageId::new(1));
        assert_eq!(pages(&tlb), vec![1, 3, 2]);

        tlb.touch(PageId::new(1));
        assert_eq!(pages(&tlb), vec![1, 3, 2]);

        tlb.touch(PageId::new(42));
        assert_eq!(pages(&tlb), vec![1, 3, 2]);
        assert_eq!(tlb.lru().unwrap().page, PageId::new(2));
    }

    #[test]
    fn reinsert_rebinds_and_touches() {
        let mut tlb = TlbCache::new(2);
        insert(&mut tlb, 1);
        insert(&mut tlb, 2);
        assert_eq!(tlb.insert(PageId::new(1), FrameId::new(9)), None);

        assert_eq!(tlb.len(), 2);
        assert_eq!(pages(&tlb), vec![1, 2]);
        assert_eq!(tlb.lookup(PageId::new(1)), Some(FrameId::new(9)));
    }

    #[test]
    fn capacity_bound() {
        let mut tlb = TlbCache::new(16);
        for page in 0..16 {
            assert_eq!(insert(&mut tlb, page), None);
        }
        assert_eq!(tlb.len(), 16);

        let evicted = insert(&mut tlb, 16).unwrap();
        assert_eq!(
            evicted,
            TlbEntry {
                page: PageId::new(0),
                frame: FrameId::new(0),
            }
        );
        assert_eq!(tlb.len(), 16);
        assert!(!tlb.contains(PageId::new(0)));
        assert!((1..=16).all(|page| tlb.contains(PageId::new(page))));
    }

    #[test]
    fn single_entry() {
        let mut tlb = TlbCache::new(1);
        insert(&mut tlb, 1);
        assert_eq!(insert(&mut tlb, 2).unwrap().page, PageId::new(1));
        assert_eq!(pages(&tlb), vec![2]);
        tlb.touch(PageId::new(2));
        assert_eq!(pages(&tlb), vec![2]);
    }

    #[test]
    fn clear_keeps_hits() {
        let mut tlb = TlbCache::new(2);
        insert(&mut tlb, 1);
        tlb.lookup(PageId::new(1));
        tlb.clear();

        assert!(tlb.is_empty());
        assert_eq!(tlb.hits(), 1);
        assert_eq!(tlb.lru(), None);

        insert(&mut tlb, 5);
        assert_eq!(pages(&tlb), vec![5]);
    }
}
