use super::tree::{END_OF_STREAM, SYMBOL_LIMIT};

/// Symbol occurrence counts over the 257-slot alphabet
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_LIMIT],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; SYMBOL_LIMIT] }
    }

    /// Count every byte of `data`
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count_bytes(data);
        table
    }

    /// Add the bytes of `data` to the running counts
    pub fn count_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Reserve one occurrence of the end-of-stream sentinel
    pub fn count_end_of_stream(&mut self) {
        if self.counts[END_OF_STREAM as usize] == 0 {
            self.counts[END_OF_STREAM as usize] = 1;
        }
    }

    /// Count for `symbol`; 0 for out-of-range symbols
    #[inline]
    pub fn get(&self, symbol: u16) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    /// `(symbol, count)` for each symbol that occurs
    pub fn iter(&self) -> impl Iterator<Item = (u16, u64)> + '_ {
        self.counts.iter().enumerate().filter(|&(_, &c)| c > 0).map(|(sym, &c)| (sym as u16, c))
    }

    /// Number of distinct symbols that occur
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    /// Total occurrences across all symbols
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bytes() {
        let freq = FrequencyTable::from_bytes(b"aaab");
        assert_eq!(freq.get(b'a' as u16), 3);
        assert_eq!(freq.get(b'b' as u16), 1);
        assert_eq!(freq.get(b'c' as u16), 0);
        assert_eq!(freq.distinct(), 2);
        assert_eq!(freq.total(), 4);

        let pairs: Vec<(u16, u64)> = freq.iter().collect();
        assert_eq!(pairs, vec![(97, 3), (98, 1)]);
    }

    #[test]
    fn test_empty_input() {
        let freq = FrequencyTable::from_bytes(b"");
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }

    #[test]
    fn test_end_of_stream_counted_once() {
        let mut freq = FrequencyTable::from_bytes(b"xy");
        freq.count_end_of_stream();
        freq.count_end_of_stream();
        assert_eq!(freq.get(END_OF_STREAM), 1);
        assert_eq!(freq.distinct(), 3);
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).collect();
        let freq = FrequencyTable::from_bytes(&data);
        assert_eq!(freq.distinct(), 256);
        assert_eq!(freq.get(END_OF_STREAM), 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let freq = FrequencyTable::from_bytes(b"zz");
        assert_eq!(freq.get(b'z' as u16), 2);
        assert_eq!(freq.get(SYMBOL_LIMIT as u16), 0);
        assert_eq!(freq.get(u16::MAX), 0);
    }
}
