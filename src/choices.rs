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

//! Ordered sequence of choices, with a lookup from choice to index.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

/// Ordered sequence of choices in an election. All the other components
/// address choices by their index in this sequence.
///
/// Duplicate values are kept in place, but only the first occurrence of a
/// value can be looked up.
///
/// Each choice also carries the generation at which it joined the election.
/// A value that is removed and later added back gets a new generation, so
/// that records of ballots cast before its removal no longer refer to it.
#[derive(Debug, Clone)]
pub struct Choices<C> {
    /// Choices, in order.
    values: Vec<C>,
    /// Index of the first occurrence of each choice.
    indices: HashMap<C, usize>,
    /// Generation of each choice, by position.
    generations: Vec<u64>,
    /// Generation given to the choices added by the next update.
    next_generation: u64,
}

impl<C> Choices<C>
where
    C: Eq + Hash + Clone,
{
    /// Constructs a new sequence of choices.
    pub fn new(values: impl Into<Vec<C>>) -> Self {
        let values = values.into();
        let mut indices = HashMap::with_capacity(values.len());
        for (i, c) in values.iter().enumerate() {
            indices.entry(c.clone()).or_insert(i);
        }
        Self {
            generations: vec![0; values.len()],
            values,
            indices,
            next_generation: 1,
        }
    }

    /// Returns a new sequence of choices following this one. Choices present
    /// in both sequences keep their generation, the others start a new one.
    pub(crate) fn update(&self, values: impl Into<Vec<C>>) -> Self {
        let mut updated = Self::new(values);
        let fresh = self.next_generation;
        updated.generations = updated
            .iter()
            .map(|c| match self.index_of(c) {
                Some(i) => self.generations[i],
                None => fresh,
            })
            .collect();
        updated.next_generation = fresh + 1;
        updated
    }

    /// Returns the index of the given choice, if present.
    pub fn index_of(&self, choice: &C) -> Option<usize> {
        self.indices.get(choice).copied()
    }

    /// Returns the choice at the given position if it is the first
    /// occurrence of its value, i.e. if a ballot can address it.
    pub(crate) fn addressable(&self, i: usize) -> Option<&C> {
        let c = &self.values[i];
        (self.index_of(c) == Some(i)).then_some(c)
    }
}

impl<C> Choices<C> {
    /// Number of choices, duplicates included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there is no choice.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the choices, in order.
    pub fn as_slice(&self) -> &[C] {
        &self.values
    }

    /// Iterates over the choices, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.values.iter()
    }

    /// Generation of the choice at the given position.
    pub(crate) fn generation(&self, i: usize) -> u64 {
        self.generations[i]
    }
}

impl<C> Index<usize> for Choices<C> {
    type Output = C;

    fn index(&self, i: usize) -> &C {
        &self.values[i]
    }
}

impl<C> PartialEq for Choices<C>
where
    C: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<C> Eq for Choices<C> where C: Eq {}
