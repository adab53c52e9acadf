// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-size set of indices, packed into 64-bit words.

/// Membership set over the indices `0..size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitSet {
    /// Number of addressable bits.
    size: usize,
    /// Packed bits, least significant bit first.
    words: Vec<u64>,
}

impl BitSet {
    /// Returns an empty set over `0..size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            words: vec![0; size.div_ceil(64)],
        }
    }

    /// Marks the given index as present.
    pub fn set(&mut self, i: usize) {
        assert!(
            i < self.size,
            "Index {i} out of bounds for a bit set of size {}",
            self.size
        );
        self.words[i / 64] |= 1 << (i % 64);
    }

    /// Returns true if the given index was marked as present.
    pub fn is_set(&self, i: usize) -> bool {
        i < self.size && self.words[i / 64] & (1 << (i % 64)) != 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty() {
        let set = BitSet::new(0);
        assert!(set.words.is_empty());
        assert!(!set.is_set(0));
        assert!(!set.is_set(1000));
    }

    #[test]
    fn test_word_boundaries() {
        let mut set = BitSet::new(129);
        assert_eq!(set.words.len(), 3);
        for i in [0, 63, 64, 127, 128] {
            set.set(i);
        }
        for i in 0..129 {
            assert_eq!(set.is_set(i), [0, 63, 64, 127, 128].contains(&i), "{i}");
        }
        assert!(!set.is_set(129));
    }

    #[test]
    #[should_panic(expected = "Index 10 out of bounds for a bit set of size 10")]
    fn test_set_out_of_bounds() {
        BitSet::new(10).set(10);
    }

    #[test]
    fn test_random_membership() {
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let size = Uniform::from(1..12345).sample(&mut rng);
            let count = Uniform::from(0..100).sample(&mut rng);
            let index_dist = Uniform::from(0..size);
            let values = (0..count)
                .map(|_| index_dist.sample(&mut rng))
                .collect::<Vec<usize>>();

            let mut set = BitSet::new(size);
            for &v in &values {
                set.set(v);
            }
            for i in 0..size {
                assert_eq!(
                    set.is_set(i),
                    values.contains(&i),
                    "Mismatch at index {i} (seed {seed})"
                );
            }
        }
    }
}
