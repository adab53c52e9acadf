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

//! Types to represent ballots and election results.

mod ballot;

use crate::duels::Duels;
use crate::strengths::Strengths;
pub(crate) use ballot::Ranking;
pub use ballot::{Ballot, Record};
use log::{debug, trace};
use std::cmp::Reverse;

/// Outcome of the election for a single choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResult<C> {
    /// The choice.
    pub choice: C,
    /// Index of the choice in the election.
    pub index: usize,
    /// Number of other choices that this choice beats.
    pub wins: usize,
    /// Sum of the strongest paths to the beaten choices.
    pub strength: u64,
    /// Sum of the margins over the beaten choices.
    pub advantage: u64,
}

/// An election result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionResult<C> {
    /// All the choices, from winner to loser.
    pub results: Vec<ChoiceResult<C>>,
    /// Whether the two best choices have the same number of wins.
    pub tie: bool,
    /// Choices of the election, in order.
    choices: Vec<C>,
    /// Strongest paths between choices, from which the duels are derived.
    strengths: Strengths,
}

impl<C> ElectionResult<C>
where
    C: Clone,
{
    /// Ranks the choices based on the strongest paths between them.
    pub(crate) fn new(choices: Vec<C>, strengths: Strengths) -> Self {
        let n = choices.len();
        assert_eq!(
            n,
            strengths.num_choices(),
            "Mismatch between the number of choices and the strengths matrix"
        );

        let mut results = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let mut result = ChoiceResult {
                    choice: choice.clone(),
                    index: i,
                    wins: 0,
                    strength: 0,
                    advantage: 0,
                };
                for j in (0..n).filter(|&j| j != i) {
                    let (ij, ji) = (strengths.get(i, j), strengths.get(j, i));
                    if ij > ji {
                        result.wins += 1;
                        result.strength += ij;
                        result.advantage += ij - ji;
                    }
                }
                result
            })
            .collect::<Vec<_>>();
        results.sort_by_key(|r| (Reverse(r.wins), Reverse(r.strength), r.index));

        let tie = results.len() >= 2 && results[0].wins == results[1].wins;
        debug!("Ranked {n} choices (tie = {tie})");
        for r in &results {
            trace!(
                "    [{}] wins = {}, strength = {}, advantage = {}",
                r.index,
                r.wins,
                r.strength,
                r.advantage
            );
        }

        Self {
            results,
            tie,
            choices,
            strengths,
        }
    }
}

impl<C> ElectionResult<C> {
    /// Returns the best choices, i.e. those sharing the highest number of
    /// wins. There is more than one only in case of a tie.
    pub fn winners(&self) -> &[ChoiceResult<C>] {
        let Some(first) = self.results.first() else {
            return &[];
        };
        let count = self
            .results
            .iter()
            .take_while(|r| r.wins == first.wins)
            .count();
        &self.results[..count]
    }

    /// Enumerates the pairwise duels between all the choices.
    pub fn duels(&self) -> Duels<'_, C> {
        self.strengths.duels(&self.choices)
    }

    /// Returns the strongest paths between choices.
    pub fn strengths(&self) -> &Strengths {
        &self.strengths
    }
}
