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

//! Election state owning its choices and preferences.

use crate::choices::Choices;
use crate::error::Error;
use crate::preferences::Preferences;
use crate::strengths::Parallel;
use crate::types::{Ballot, ElectionResult, Record};
use log::{debug, info};
use std::fmt::Debug;
use std::hash::Hash;

/// Voting holds the state of an election in memory, and provides methods to
/// vote, to update the choices and to compute the winner with the Schulze
/// method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voting<C> {
    choices: Choices<C>,
    preferences: Preferences,
    parallel: Parallel,
}

impl<C> Voting<C>
where
    C: Eq + Hash + Clone + Debug,
{
    /// Starts a new election between the given choices, without any vote.
    pub fn new(choices: impl Into<Vec<C>>) -> Self {
        let choices = Choices::new(choices);
        let preferences = Preferences::new(choices.len());
        Self {
            choices,
            preferences,
            parallel: Parallel::default(),
        }
    }

    /// Returns a new builder.
    pub fn builder() -> VotingBuilder<C> {
        VotingBuilder::default()
    }

    /// Returns the choices of the election, in order.
    pub fn choices(&self) -> &[C] {
        self.choices.as_slice()
    }

    /// Returns a copy of the current preferences.
    pub fn preferences(&self) -> Preferences {
        self.preferences.clone()
    }

    /// Casts a ballot. The returned record can later be passed to
    /// [`Self::unvote()`] to revert it.
    pub fn vote(&mut self, ballot: &Ballot<C>) -> Result<Record<C>, Error<C>> {
        let record = self.preferences.vote(&self.choices, ballot)?;
        debug!(
            "Applied a ballot ranking {} of {} choices",
            ballot.len(),
            self.choices.len()
        );
        Ok(record)
    }

    /// Reverts a ballot cast with [`Self::vote()`].
    pub fn unvote(&mut self, record: &Record<C>) {
        self.preferences.unvote(&self.choices, record);
        debug!("Reverted a ballot with {} ranked tiers", record.ranked().len());
    }

    /// Computes the results of the election.
    pub fn compute(&self) -> ElectionResult<C> {
        self.preferences.compute(&self.choices, self.parallel)
    }

    /// Replaces the choices of the election, keeping the preferences between
    /// choices that remain. Records of previous votes remain valid, and no
    /// longer rank a choice that was removed, even if it is added back later.
    pub fn set_choices(&mut self, updated: impl Into<Vec<C>>) {
        (self.preferences, self.choices) = self.preferences.set_choices(&self.choices, updated);
    }

    /// Exports the preferences, one row per choice.
    ///
    /// Cell `(i, j)` counts the ballots ranking choice `i` above choice `j`,
    /// and the diagonal cell `(i, i)` counts the ballots that ranked choice
    /// `i`. The diagonal is needed to score choices added later on.
    pub fn export(&self) -> Vec<Vec<u64>> {
        self.preferences.to_matrix()
    }

    /// Replaces the preferences with a matrix previously obtained with
    /// [`Self::export()`], diagonal included. The election is left untouched
    /// if the matrix doesn't match the number of choices, or if a diagonal
    /// cell is lower than another cell of its row.
    pub fn import(&mut self, matrix: &[Vec<u64>]) -> Result<(), Error<C>> {
        self.preferences = Preferences::from_matrix(self.choices.len(), matrix)?;
        debug!("Imported preferences for {} choices", self.choices.len());
        Ok(())
    }
}

/// Builder for the [`Voting`] type.
pub struct VotingBuilder<C> {
    choices: Vec<C>,
    parallel: Parallel,
    matrix: Option<Vec<Vec<u64>>>,
}

impl<C> Default for VotingBuilder<C> {
    fn default() -> Self {
        Self {
            choices: Vec::new(),
            parallel: Parallel::default(),
            matrix: None,
        }
    }
}

impl<C> VotingBuilder<C>
where
    C: Eq + Hash + Clone + Debug,
{
    /// Build the [`Voting`] object.
    pub fn build(self) -> Result<Voting<C>, Error<C>> {
        let choices = Choices::new(self.choices);
        let preferences = match self.matrix {
            Some(matrix) => Preferences::from_matrix(choices.len(), &matrix)?,
            None => Preferences::new(choices.len()),
        };
        match self.parallel {
            Parallel::No => info!("Parallel strength computation is disabled"),
            Parallel::Rayon => info!("Parallel strength computation is enabled (rayon)"),
        }
        Ok(Voting {
            choices,
            preferences,
            parallel: self.parallel,
        })
    }

    /// Sets the choices of the election.
    pub fn choices(mut self, choices: impl Into<Vec<C>>) -> Self {
        self.choices = choices.into();
        self
    }

    /// Sets the strategy to compute the strongest paths.
    pub fn parallel(mut self, parallel: Parallel) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the initial preferences, as obtained with [`Voting::export()`].
    pub fn matrix(mut self, matrix: impl Into<Vec<Vec<u64>>>) -> Self {
        self.matrix = Some(matrix.into());
        self
    }
}
