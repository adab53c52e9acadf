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

//! Matrix of pairwise preferences, the only mutable state of an election.

use crate::choices::Choices;
use crate::error::Error;
use crate::strengths::{Parallel, Strengths};
use crate::types::{Ballot, ElectionResult, Ranking, Record};
use log::Level::Trace;
use log::{debug, log_enabled, trace};
use std::fmt::Debug;
use std::hash::Hash;

/// Number of ballots preferring a choice over another one.
///
/// The off-diagonal cell `(i, j)` counts the ballots ranking choice `i`
/// strictly above choice `j`. The diagonal cell `(i, i)` counts the ballots
/// that explicitly ranked choice `i`, which is needed to score choices added
/// to the election after some ballots were cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Number of choices.
    num_choices: usize,
    /// Row-major matrix of counts.
    counts: Vec<u64>,
}

impl Preferences {
    /// Returns an empty matrix for the given number of choices.
    pub fn new(num_choices: usize) -> Self {
        Self {
            num_choices,
            counts: vec![0; num_choices * num_choices],
        }
    }

    /// Constructs a matrix from its rows, as obtained with
    /// [`Self::to_matrix()`].
    ///
    /// The diagonal is part of the format: each diagonal cell must be at
    /// least as large as every other cell of its row, since a ballot ranking
    /// a choice above another one ranked it explicitly.
    pub fn from_matrix<C: Debug>(
        num_choices: usize,
        matrix: &[Vec<u64>],
    ) -> Result<Self, Error<C>> {
        if matrix.len() != num_choices {
            return Err(Error::InvalidMatrixLength {
                expected: num_choices,
                found: matrix.len(),
            });
        }
        let mut counts = Vec::with_capacity(num_choices * num_choices);
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != num_choices {
                return Err(Error::InvalidRowLength {
                    row,
                    expected: num_choices,
                    found: values.len(),
                });
            }
            counts.extend_from_slice(values);
        }
        for (row, values) in matrix.iter().enumerate() {
            let minimum = values.iter().copied().max().unwrap_or_default();
            if values[row] < minimum {
                return Err(Error::InvalidDiagonal {
                    row,
                    minimum,
                    found: values[row],
                });
            }
        }
        Ok(Self {
            num_choices,
            counts,
        })
    }

    /// Returns a copy of the matrix, one [`Vec`] per row. The diagonal cell
    /// of each row counts the ballots that ranked its choice.
    pub fn to_matrix(&self) -> Vec<Vec<u64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Returns the number of choices.
    pub fn num_choices(&self) -> usize {
        self.num_choices
    }

    /// Returns the number of ballots ranking choice `i` above choice `j`.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.counts[i * self.num_choices + j]
    }

    /// Returns the row-major matrix of counts.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// Applies a ballot, and returns the record needed to revert it with
    /// [`Self::unvote()`]. The matrix is left untouched if the ballot is
    /// invalid.
    pub fn vote<C>(
        &mut self,
        choices: &Choices<C>,
        ballot: &Ballot<C>,
    ) -> Result<Record<C>, Error<C>>
    where
        C: Eq + Hash + Clone + Debug,
    {
        self.check_choices(choices);
        let ranking = Ranking::new(choices, ballot)?;
        trace!("Vote: {:?}", ranking.tiers().collect::<Vec<_>>());
        self.apply(&ranking, |count| *count += 1);
        Ok(ranking.to_record(choices))
    }

    /// Reverts a ballot previously applied with [`Self::vote()`], possibly
    /// before the choices were updated with [`Self::set_choices()`].
    ///
    /// Choices of the record that were since removed are ignored, and choices
    /// added since are considered as unranked by the ballot.
    pub fn unvote<C>(&mut self, choices: &Choices<C>, record: &Record<C>)
    where
        C: Eq + Hash + Clone,
    {
        self.check_choices(choices);
        let ranking = Ranking::from_record(choices, record);
        trace!("Unvote: {:?}", ranking.tiers().collect::<Vec<_>>());
        self.apply(&ranking, |count| {
            debug_assert!(*count > 0, "Reverted a ballot that wasn't applied");
            *count = count.saturating_sub(1);
        });
    }

    /// Returns the matrix for an updated sequence of choices, keeping all the
    /// counts between choices present in both sequences, together with the
    /// updated choices to use from now on.
    ///
    /// New choices are scored as if every ballot applied so far had left them
    /// unranked: they lose against each choice that a ballot ranked, and tie
    /// with the rest. This includes choices that were removed before and are
    /// added back: records of earlier ballots no longer rank them.
    pub fn set_choices<C>(
        &self,
        current: &Choices<C>,
        updated: impl Into<Vec<C>>,
    ) -> (Preferences, Choices<C>)
    where
        C: Eq + Hash + Clone,
    {
        self.check_choices(current);
        let updated = current.update(updated);

        // Index in the current matrix of each updated choice. Duplicates
        // can't be ranked, so they are treated as new choices.
        let previous = (0..updated.len())
            .map(|i| {
                updated
                    .addressable(i)
                    .and_then(|choice| current.index_of(choice))
            })
            .collect::<Vec<Option<usize>>>();
        let added = previous.iter().filter(|p| p.is_none()).count();
        let removed = (0..current.len())
            .filter(|&i| {
                current
                    .addressable(i)
                    .is_some_and(|choice| updated.index_of(choice).is_none())
            })
            .count();
        debug!(
            "Remapping preferences from {} to {} choices: {added} added, {removed} removed",
            current.len(),
            updated.len()
        );

        let n = updated.len();
        let mut remapped = Preferences::new(n);
        for (i, row) in remapped.counts.chunks_exact_mut(n.max(1)).enumerate() {
            let Some(pi) = previous[i] else {
                continue;
            };
            for (j, count) in row.iter_mut().enumerate() {
                *count = match previous[j] {
                    Some(pj) => self.get(pi, pj),
                    None => self.get(pi, pi),
                };
            }
        }

        remapped.trace_counts("Remapped preferences");
        (remapped, updated)
    }

    /// Computes the strongest paths between choices.
    pub fn strengths(&self, parallel: Parallel) -> Strengths {
        Strengths::compute(self, parallel)
    }

    /// Computes the results of the election.
    pub fn compute<C>(&self, choices: &Choices<C>, parallel: Parallel) -> ElectionResult<C>
    where
        C: Clone,
    {
        self.check_choices(choices);
        self.strengths(parallel).results(choices.as_slice())
    }

    /// Updates the counts for each pair of choices ordered by the given
    /// ranking, and the count of ranked choices on the diagonal.
    fn apply(&mut self, ranking: &Ranking, update: impl Fn(&mut u64)) {
        let n = self.num_choices;
        let tiers = ranking.tiers().collect::<Vec<&[usize]>>();
        for (t, &preferred) in tiers.iter().enumerate() {
            for &i in preferred {
                let row = &mut self.counts[i * n..(i + 1) * n];
                for &j in tiers[t + 1..].iter().copied().flatten() {
                    update(&mut row[j]);
                }
            }
        }
        for &i in ranking.ranked().iter().flatten() {
            update(&mut self.counts[i * n + i]);
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        // Chunk size must be non-zero, but there are no rows anyway when there
        // are no choices.
        self.counts.chunks_exact(self.num_choices.max(1))
    }

    fn check_choices<C>(&self, choices: &Choices<C>) {
        assert_eq!(
            choices.len(),
            self.num_choices,
            "Mismatch between the number of choices and the preferences matrix"
        );
    }

    fn trace_counts(&self, title: &str) {
        if !log_enabled!(Trace) {
            return;
        }

        trace!("{title}:");
        for (i, row) in self.rows().enumerate() {
            trace!("    [{i}] {row:?}");
        }
    }
}

#[cfg(test)]
impl Preferences {
    /// Constructs a matrix from row-major counts, raising each diagonal cell
    /// to the largest count of its row.
    pub(crate) fn from_counts(num_choices: usize, counts: &[u64]) -> Self {
        assert_eq!(counts.len(), num_choices * num_choices);
        let mut preferences = Self {
            num_choices,
            counts: counts.to_vec(),
        };
        for i in 0..num_choices {
            let row = &mut preferences.counts[i * num_choices..(i + 1) * num_choices];
            let max = row.iter().copied().max().unwrap_or_default();
            row[i] = max;
        }
        preferences
    }
}
