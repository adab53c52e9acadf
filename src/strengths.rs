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

//! Module to compute the strongest paths between choices, based on the
//! pairwise preferences of the voters.

use crate::duels::Duels;
use crate::preferences::Preferences;
use crate::types::ElectionResult;
use log::Level::Trace;
use log::{debug, log_enabled, trace};
use rayon::prelude::*;
use std::time::Instant;

/// Strategy to parallelize the computation of strongest paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallel {
    /// Relax all the paths on the calling thread.
    #[default]
    No,
    /// Relax the rows of the matrix in parallel, based on the rayon crate.
    Rayon,
}

/// Strength of the strongest path between each ordered pair of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strengths {
    /// Number of choices.
    num_choices: usize,
    /// Row-major matrix of path strengths.
    values: Vec<u64>,
}

impl Strengths {
    /// Computes the strongest paths for the given preferences.
    pub fn compute(preferences: &Preferences, parallel: Parallel) -> Self {
        let n = preferences.num_choices();
        let counts = preferences.as_slice();
        debug!("Computing strongest paths between {n} choices ({parallel:?})");
        let beginning = Instant::now();

        // Only keep the direct comparisons won by a majority.
        let mut values = vec![0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let c = counts[i * n + j];
                    if c > counts[j * n + i] {
                        values[i * n + j] = c;
                    }
                }
            }
        }

        let mut strengths = Strengths {
            num_choices: n,
            values,
        };
        match parallel {
            Parallel::No => strengths.relax_serial(),
            Parallel::Rayon => strengths.relax_rayon(),
        }

        debug!(
            "Computed strongest paths in {:?}",
            Instant::now().duration_since(beginning)
        );
        strengths.trace_values();
        strengths
    }

    /// Returns the number of choices.
    pub fn num_choices(&self) -> usize {
        self.num_choices
    }

    /// Returns the strength of the strongest path from choice `i` to choice
    /// `j`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.values[i * self.num_choices + j]
    }

    /// Returns the row-major matrix of strengths.
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Ranks the given choices, consuming these strengths so that the result
    /// can later enumerate the duels.
    pub fn results<C: Clone>(self, choices: &[C]) -> ElectionResult<C> {
        ElectionResult::new(choices.to_vec(), self)
    }

    /// Enumerates the pairwise duels between the given choices.
    pub fn duels<'a, C>(&'a self, choices: &'a [C]) -> Duels<'a, C> {
        Duels::new(choices, self)
    }

    /// Floyd-Warshall relaxation over (max, min), on the calling thread.
    fn relax_serial(&mut self) {
        let n = self.num_choices;
        let mut through = vec![0; n];
        for k in 0..n {
            through.copy_from_slice(&self.values[k * n..(k + 1) * n]);
            for (i, row) in self.values.chunks_exact_mut(n).enumerate() {
                if i != k {
                    relax_row(row, i, k, &through);
                }
            }
        }
    }

    /// Floyd-Warshall relaxation over (max, min), with rows processed in
    /// parallel for each intermediate choice.
    fn relax_rayon(&mut self) {
        let n = self.num_choices;
        let mut through = vec![0; n];
        for k in 0..n {
            through.copy_from_slice(&self.values[k * n..(k + 1) * n]);
            let through = &through;
            self.values
                .par_chunks_exact_mut(n)
                .enumerate()
                .for_each(|(i, row)| {
                    if i != k {
                        relax_row(row, i, k, through);
                    }
                });
        }
    }

    fn trace_values(&self) {
        if !log_enabled!(Trace) {
            return;
        }

        trace!("Strongest paths:");
        for (i, row) in self.values.chunks_exact(self.num_choices.max(1)).enumerate() {
            trace!("    [{i}] {row:?}");
        }
    }
}

/// Relaxes the paths starting at choice `i` through choice `k`, given the
/// row of strengths starting at `k`.
///
/// Row `k` and column `k` are left unchanged by this relaxation, so all the
/// other rows can be processed independently.
#[inline(always)]
fn relax_row(row: &mut [u64], i: usize, k: usize, through: &[u64]) {
    let ik = row[k];
    if ik == 0 {
        return;
    }
    for (j, (ij, &kj)) in row.iter_mut().zip(through).enumerate() {
        if j != i && j != k {
            *ij = (*ij).max(ik.min(kj));
        }
    }
}
