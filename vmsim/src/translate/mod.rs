/*!
Virtual to physical address translation.

The [`Translator`] resolves one virtual address at a time: the address is
decoded into a page and an offset, the page is looked up in the TLB and, on a
miss, in the page table. Pages that are not resident yet are read from the
backing store into their frame. Every translation yields a [`Translation`]
record, the run totals are available as [`TranslationStats`].
*/

use std::fmt;

use log::{debug, info, warn};

use crate::error::Result;
use crate::mem::{BackingStore, FrameStore, PageLookup, PageTable, TlbCache};
use crate::mmu::{AddressDecoder, MmuSpec};
use crate::types::{umem, Address, FrameId, PageId};


#[cfg(feature = "trace_mmu")]
macro_rules! vtop_trace {
    ( $( $x:expr ),* ) => {
        log::trace!( $($x, )* );
    }
}

#[cfg(not(feature = "trace_mmu"))]
macro_rules! vtop_trace {
    ( $( $x:expr ),* ) => {};
}

/// Describes how a translation was resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TranslationKind {
    /// The binding was found in the TLB.
    TlbHit,
    /// The TLB missed but the page was already resident.
    TableHit,
    /// The page was referenced for the first time and had to be loaded.
    PageFault,
}

/// The result of translating one virtual address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Translation {
    pub address: Address,
    pub page: PageId,
    pub offset: umem,
    pub frame: FrameId,
    /// The byte stored at the physical location.
    pub value: u8,
    pub kind: TranslationKind,
}

impl Translation {
    /// Returns the byte interpreted as a signed value.
    pub fn signed_value(&self) -> i8 {
        self.value as i8
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Translating {} {}... | Frame number: {} {} | Byte: {}",
            self.page,
            self.offset,
            self.frame,
            self.offset,
            self.signed_value()
        )
    }
}

/// Cumulative counters of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct TranslationStats {
    pub translations: usize,
    pub tlb_hits: usize,
    pub page_faults: usize,
}

impl TranslationStats {
    /// Fraction of translations that hit the TLB.
    pub fn tlb_hit_ratio(&self) -> f64 {
        ratio(self.tlb_hits, self.translations)
    }

    /// Fraction of translations that caused a page fault.
    pub fn page_fault_ratio(&self) -> f64 {
        ratio(self.page_faults, self.translations)
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl fmt::Display for TranslationStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Page fault rate: {}", self.page_faults)?;
        write!(f, "TLB hit rate: {}", self.tlb_hits)
    }
}

/// Drives the translation of virtual addresses through the TLB, the page table
/// and the frame store, loading pages from the backing store on demand.
///
/// The translator replays addresses strictly in the order they are passed in,
/// hit and fault counts as well as the TLB eviction order depend on it.
///
/// # Examples
///
/// ```
/// use vmsim::connector::BufferBackingStore;
/// use vmsim::mmu::MmuSpec;
/// use vmsim::translate::{TranslationKind, Translator};
/// use vmsim::types::Address;
///
/// let store = BufferBackingStore::with_pattern(256, 256);
/// let mut translator = Translator::new(MmuSpec::DEFAULT, store).unwrap();
///
/// let first = translator.translate(Address::from(300u64)).unwrap();
/// assert_eq!(first.kind, TranslationKind::PageFault);
///
/// let second = translator.translate(Address::from(301u64)).unwrap();
/// assert_eq!(second.kind, TranslationKind::TlbHit);
/// assert_eq!(second.value, (301 % 251) as u8);
/// ```
pub struct Translator<B> {
    decoder: AddressDecoder,
    tlb: TlbCache,
    page_table: PageTable,
    frames: FrameStore,
    store: B,
    page_buf: Box<[u8]>,
    translations: usize,
}

impl<B: BackingStore> Translator<B> {
    pub fn new(spec: MmuSpec, store: B) -> Result<Self> {
        let decoder = AddressDecoder::new(spec)?;
        let page_size = decoder.page_size() as usize;
        let frame_count = decoder.page_count() as usize;

        if store.size() < spec.address_space_size {
            warn!(
                "backing store holds {} bytes but the address space spans {}, pages beyond the store can not be loaded",
                store.size(),
                spec.address_space_size
            );
        }

        info!(
            "translator: page_size={} address_space_size={} frames={} tlb_entries={}",
            page_size, spec.address_space_size, frame_count, spec.tlb_entries
        );

        Ok(Self {
            decoder,
            tlb: TlbCache::new(spec.tlb_entries),
            page_table: PageTable::new(),
            frames: FrameStore::new(frame_count, page_size),
            store,
            page_buf: vec![0u8; page_size].into_boxed_slice(),
            translations: 0,
        })
    }

    /// Translates `address` and reads the byte it refers to.
    pub fn translate(&mut self, address: Address) -> Result<Translation> {
        let (page, offset) = self.decoder.decode(address)?;
        vtop_trace!("{:x}: decoded page={} offset={}", address, page, offset);

        let (frame, kind) = if let Some(frame) = self.tlb.lookup(page) {
            vtop_trace!("{:x}: tlb hit frame={}", address, frame);
            self.tlb.touch(page);
            (frame, TranslationKind::TlbHit)
        } else {
            match self.page_table.lookup(page) {
                PageLookup::Resident(frame) => {
                    vtop_trace!("{:x}: page table hit frame={}", address, frame);
                    self.cache(page, frame);
                    (frame, TranslationKind::TableHit)
                }
                PageLookup::Fault => {
                    vtop_trace!("{:x}: page fault", address);
                    (self.fault(page)?, TranslationKind::PageFault)
                }
            }
        };

        let value = self.frames.read_byte(frame, offset)?;

        self.translations += 1;

        Ok(Translation {
            address,
            page,
            offset,
            frame,
            value,
            kind,
        })
    }

    /// Translates every address of `addrs`, stopping at the first error.
    pub fn translate_all<I>(&mut self, addrs: I) -> Result<Vec<Translation>>
    where
        I: IntoIterator<Item = Address>,
    {
        addrs
            .into_iter()
            .map(|address| self.translate(address))
            .collect()
    }

    /// Translates a stream of addresses and hands every record to `out`.
    ///
    /// The stream itself may fail, e.g. when it is parsed from a trace file.
    /// The first error of either the stream or a translation aborts the replay.
    pub fn replay<I, F>(&mut self, addrs: I, mut out: F) -> Result<TranslationStats>
    where
        I: IntoIterator<Item = Result<Address>>,
        F: FnMut(&Translation) -> Result<()>,
    {
        for address in addrs {
            let translation = self.translate(address?)?;
            out(&translation)?;
        }

        let stats = self.stats();
        info!(
            "replayed {} addresses: {} tlb hits, {} page faults",
            stats.translations, stats.tlb_hits, stats.page_faults
        );
        Ok(stats)
    }

    pub fn stats(&self) -> TranslationStats {
        TranslationStats {
            translations: self.translations,
            tlb_hits: self.tlb.hits(),
            page_faults: self.page_table.faults(),
        }
    }

    pub fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    pub fn tlb(&self) -> &TlbCache {
        &self.tlb
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn into_backing_store(self) -> B {
        self.store
    }

    /// Loads `page` from the backing store and maps it to its frame.
    fn fault(&mut self, page: PageId) -> Result<FrameId> {
        let frame = page.identity_frame();

        self.store.read_page(page, &mut self.page_buf)?;
        self.frames.load_if_absent(frame, &self.page_buf)?;
        self.page_table.insert(page, frame)?;
        self.cache(page, frame);

        debug!("page fault: loaded page {} into frame {}", page, frame);
        Ok(frame)
    }

    fn cache(&mut self, page: PageId, frame: FrameId) {
        if let Some(evicted) = self.tlb.insert(page, frame) {
            debug!(
                "tlb: evicted page {} (frame {}) for page {}",
                evicted.page, evicted.frame, page
            );
        }
        debug_assert!(self.page_table.frame(page).ok() == Some(frame));
    }
}

impl<B> fmt::Debug for Translator<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Translator")
            .field("decoder", &self.decoder)
            .field("tlb_entries", &self.tlb.len())
            .field("resident_pages", &self.page_table.len())
            .field("translations", &self.translations)
            .finish()
    }
}
