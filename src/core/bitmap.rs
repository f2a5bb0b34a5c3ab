/// Bitmap Range Allocator
///
/// Tracks which indices in `[0, len)` are allocated, one bit per index.
/// The record store uses one bit per 8-byte chunk of its data region.
///
/// Allocation is a first-fit linear scan: the lowest run of clear bits that is
/// long enough wins. Allocation order is observable through record offsets, so
/// the scan must stay first-fit.

const BITS_PER_WORD: usize = u64::BITS as usize;

#[derive(Debug, Clone, Default)]
pub struct RangeBitmap {
    words: Vec<u64>,
    len: usize,
}

impl RangeBitmap {
    /// Returned by `allocate_range` when no run is large enough.
    pub const INVALID: usize = usize::MAX;

    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; word_count(len)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Change the bit count. Bits below both the old and new length keep their
    /// value, everything past the old length starts clear.
    pub fn resize(&mut self, len: usize) {
        self.words.resize(word_count(len), 0);
        self.len = len;
        self.mask_tail();
    }

    /// Change the bit count and clear every bit.
    pub fn resize_and_clear(&mut self, len: usize) {
        self.words.clear();
        self.words.resize(word_count(len), 0);
        self.len = len;
    }

    /// Release all storage.
    pub fn clear(&mut self) {
        self.words = Vec::new();
        self.len = 0;
    }

    pub fn test(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {} is out of bounds ({})", index, self.len);
        self.words[index / BITS_PER_WORD] & (1 << (index % BITS_PER_WORD)) != 0
    }

    /// Mark `[lo, hi)` allocated.
    pub fn set_range(&mut self, lo: usize, hi: usize) {
        self.apply_range(lo, hi, |word, mask| *word |= mask);
    }

    /// Mark `[lo, hi)` free.
    pub fn clear_range(&mut self, lo: usize, hi: usize) {
        self.apply_range(lo, hi, |word, mask| *word &= !mask);
    }

    /// Find the first run of `count` clear bits, mark it allocated and return
    /// its start. Returns `INVALID` without touching anything when there is no
    /// such run.
    pub fn allocate_range(&mut self, count: usize) -> usize {
        if count == 0 || count > self.len {
            return Self::INVALID;
        }

        let mut start = 0;
        let mut run = 0;

        for i in 0..self.len {
            if self.test(i) {
                run = 0;
                continue;
            }

            if run == 0 {
                start = i;
            }
            run += 1;

            if run == count {
                self.set_range(start, start + count);
                return start;
            }
        }

        Self::INVALID
    }

    /// Number of set bits.
    pub fn popcount(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of clear bits.
    pub fn freecount(&self) -> usize {
        self.len - self.popcount()
    }

    fn apply_range(&mut self, lo: usize, hi: usize, op: impl Fn(&mut u64, u64)) {
        assert!(
            lo <= hi && hi <= self.len,
            "range [{}, {}) is out of bounds ({})",
            lo,
            hi,
            self.len
        );

        let mut i = lo;
        while i < hi {
            let bit = i % BITS_PER_WORD;
            let span = (BITS_PER_WORD - bit).min(hi - i);
            let mask = if span == BITS_PER_WORD {
                u64::MAX
            } else {
                ((1u64 << span) - 1) << bit
            };
            op(&mut self.words[i / BITS_PER_WORD], mask);
            i += span;
        }
    }

    // Keeps bits past `len` clear so popcount stays exact after a shrink.
    fn mask_tail(&mut self) {
        let bit = self.len % BITS_PER_WORD;
        if bit != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << bit) - 1;
            }
        }
    }
}

fn word_count(len: usize) -> usize {
    (len + BITS_PER_WORD - 1) / BITS_PER_WORD
}
