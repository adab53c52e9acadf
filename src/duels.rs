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

//! Pairwise comparisons between choices, derived from strongest paths.

use crate::strengths::Strengths;
use std::iter::FusedIterator;

/// One side of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceStrength<'a, C> {
    /// The choice.
    pub choice: &'a C,
    /// Index of the choice in the election.
    pub index: usize,
    /// Strength of the strongest path from this choice to the opponent.
    pub strength: u64,
}

/// Comparison of the strongest paths between two choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duel<'a, C> {
    /// Choice with the lower index.
    pub left: ChoiceStrength<'a, C>,
    /// Choice with the higher index.
    pub right: ChoiceStrength<'a, C>,
}

impl<'a, C> Duel<'a, C> {
    /// Returns the winner and the defeated choice of this duel, or `None` if
    /// both paths are equally strong.
    pub fn outcome(&self) -> Option<(&ChoiceStrength<'a, C>, &ChoiceStrength<'a, C>)> {
        match self.left.strength.cmp(&self.right.strength) {
            std::cmp::Ordering::Greater => Some((&self.left, &self.right)),
            std::cmp::Ordering::Less => Some((&self.right, &self.left)),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Lazy iterator over all the duels of an election, i.e. over all pairs of
/// choices `(i, j)` with `i < j` in row-major order.
#[derive(Debug, Clone)]
pub struct Duels<'a, C> {
    choices: &'a [C],
    strengths: &'a Strengths,
    /// Next pair to yield.
    i: usize,
    j: usize,
}

impl<'a, C> Duels<'a, C> {
    pub(crate) fn new(choices: &'a [C], strengths: &'a Strengths) -> Self {
        assert_eq!(
            choices.len(),
            strengths.num_choices(),
            "Mismatch between the number of choices and the strengths matrix"
        );
        Self {
            choices,
            strengths,
            i: 0,
            j: 1,
        }
    }

    fn side(&self, index: usize, opponent: usize) -> ChoiceStrength<'a, C> {
        ChoiceStrength {
            choice: &self.choices[index],
            index,
            strength: self.strengths.get(index, opponent),
        }
    }

    fn remaining(&self) -> usize {
        let n = self.choices.len();
        if self.i + 1 >= n {
            return 0;
        }
        // Rest of the current row, then all the following rows.
        let rest = n - self.j;
        let below = n - self.i - 1;
        rest + below * (below - 1) / 2
    }
}

impl<'a, C> Iterator for Duels<'a, C> {
    type Item = Duel<'a, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.choices.len();
        if self.i + 1 >= n {
            return None;
        }

        let (i, j) = (self.i, self.j);
        self.j += 1;
        if self.j == n {
            self.i += 1;
            self.j = self.i + 1;
        }

        Some(Duel {
            left: self.side(i, j),
            right: self.side(j, i),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<C> ExactSizeIterator for Duels<'_, C> {}

impl<C> FusedIterator for Duels<'_, C> {}
