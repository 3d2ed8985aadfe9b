//! The per-label 2:1:1 split law.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of entries a group of `n` files contributes to each split.
///
/// `train = n/2`, `val = 3n/4 - n/2`, `test = n - 3n/4` with floor division;
/// any remainder lands in val/test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSizes {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl SplitSizes {
    #[must_use]
    pub fn for_len(n: usize) -> Self {
        let (b1, b2) = boundaries(n);
        Self { train: b1, val: b2 - b1, test: n - b2 }
    }

    #[must_use]
    pub fn get(&self, split: Split) -> usize {
        match split {
            Split::Train => self.train,
            Split::Val => self.val,
            Split::Test => self.test,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }

    pub fn add(&mut self, other: &Self) {
        self.train += other.train;
        self.val += other.val;
        self.test += other.test;
    }
}

fn boundaries(n: usize) -> (usize, usize) {
    (n / 2, n * 3 / 4)
}

/// Slice `files` into `(train, val, test)`.
#[must_use]
pub fn split_slices<T>(files: &[T]) -> (&[T], &[T], &[T]) {
    let (b1, b2) = boundaries(files.len());
    (&files[..b1], &files[b1..b2], &files[b2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_law() {
        for n in 0..200 {
            let sizes = SplitSizes::for_len(n);
            assert_eq!(sizes.train, n / 2, "n={n}");
            assert_eq!(sizes.val, n * 3 / 4 - n / 2, "n={n}");
            assert_eq!(sizes.test, n - n * 3 / 4, "n={n}");
            assert_eq!(sizes.total(), n, "n={n}");
        }
    }

    #[test]
    fn test_small_groups() {
        assert_eq!(SplitSizes::for_len(0), SplitSizes { train: 0, val: 0, test: 0 });
        assert_eq!(SplitSizes::for_len(1), SplitSizes { train: 0, val: 0, test: 1 });
        assert_eq!(SplitSizes::for_len(2), SplitSizes { train: 1, val: 0, test: 1 });
        assert_eq!(SplitSizes::for_len(3), SplitSizes { train: 1, val: 1, test: 1 });
        assert_eq!(SplitSizes::for_len(4), SplitSizes { train: 2, val: 1, test: 1 });
    }

    #[test]
    fn test_split_slices_partition_input() {
        let files: Vec<u32> = (0..11).collect();
        let (train, val, test) = split_slices(&files);
        assert_eq!(train, &[0, 1, 2, 3, 4]);
        assert_eq!(val, &[5, 6, 7]);
        assert_eq!(test, &[8, 9, 10]);
    }
}
