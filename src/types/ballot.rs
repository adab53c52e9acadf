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

//! Types to represent ballots, and their normalized order of choices.

use crate::bitset::BitSet;
use crate::choices::Choices;
use crate::error::Error;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Ballot cast in the election, mapping choices to ranks. The lowest number
/// represents the highest rank. Not all choices have to be ranked, multiple
/// choices can share a rank, and ranks don't have to be consecutive.
pub type Ballot<C> = HashMap<C, i64>;

/// Order of choices in a ballot, resolved to indices in a sequence of
/// choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ranking {
    /// Explicitly ranked choices, from most preferred to least preferred.
    /// Each inner [`Vec`] contains the choices ranked equally, by increasing
    /// index.
    ranked: Vec<Vec<usize>>,
    /// Choices that the ballot didn't mention, by increasing index.
    unranked: Vec<usize>,
}

impl Ranking {
    /// Resolves the given ballot against the given choices. Fails if the
    /// ballot mentions a choice that isn't part of the sequence.
    pub fn new<C>(choices: &Choices<C>, ballot: &Ballot<C>) -> Result<Self, Error<C>>
    where
        C: Eq + Hash + Clone + Debug,
    {
        let mut ranks: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut seen = BitSet::new(choices.len());
        for (choice, &rank) in ballot {
            let i = choices
                .index_of(choice)
                .ok_or_else(|| Error::UnknownChoice(choice.clone()))?;
            ranks.entry(rank).or_default().push(i);
            seen.set(i);
        }

        let ranked = ranks
            .into_values()
            .map(|mut tier| {
                tier.sort_unstable();
                tier
            })
            .collect();

        let unranked = if ballot.len() < choices.len() {
            (0..choices.len()).filter(|&i| !seen.is_set(i)).collect()
        } else {
            Vec::new()
        };

        Ok(Self { ranked, unranked })
    }

    /// Re-resolves a record against the given choices. Choices that are no
    /// longer present are skipped, and every choice that the record doesn't
    /// rank is considered unranked, including choices added after the record
    /// was created.
    ///
    /// A choice that was removed and then added back belongs to a newer
    /// generation than the one the record ranked, so it is skipped as well.
    pub fn from_record<C>(choices: &Choices<C>, record: &Record<C>) -> Self
    where
        C: Eq + Hash + Clone,
    {
        let mut seen = BitSet::new(choices.len());
        let ranked = record
            .ranked
            .iter()
            .zip(&record.generations)
            .map(|(tier, generations)| {
                tier.iter()
                    .zip(generations)
                    .filter_map(|(c, &generation)| {
                        choices
                            .index_of(c)
                            .filter(|&i| choices.generation(i) == generation)
                    })
                    .inspect(|&i| seen.set(i))
                    .collect::<Vec<usize>>()
            })
            .filter(|tier| !tier.is_empty())
            .collect();
        let unranked = (0..choices.len()).filter(|&i| !seen.is_set(i)).collect();
        Self { ranked, unranked }
    }

    /// Returns the explicitly ranked tiers.
    pub fn ranked(&self) -> &[Vec<usize>] {
        &self.ranked
    }

    /// Returns all the tiers, from most preferred to least preferred. The
    /// unranked choices form the last tier, if there are any.
    pub fn tiers(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.ranked
            .iter()
            .map(|tier| tier.as_slice())
            .chain((!self.unranked.is_empty()).then_some(self.unranked.as_slice()))
    }

    /// Converts this ranking back to choice values.
    pub fn to_record<C>(&self, choices: &Choices<C>) -> Record<C>
    where
        C: Clone,
    {
        let resolve =
            |tier: &[usize]| -> Vec<C> { tier.iter().map(|&i| choices[i].clone()).collect() };
        Record {
            ranked: self.ranked.iter().map(|tier| resolve(tier)).collect(),
            generations: self
                .ranked
                .iter()
                .map(|tier| tier.iter().map(|&i| choices.generation(i)).collect())
                .collect(),
            unranked: resolve(&self.unranked),
        }
    }
}

/// Normalized order of choices of a ballot that was applied to an election.
///
/// A record refers to choices by value rather than by index, so that it
/// remains valid after the sequence of choices changed. It is the only way to
/// later revert a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<C> {
    ranked: Vec<Vec<C>>,
    /// Generation of each ranked choice when the ballot was cast.
    generations: Vec<Vec<u64>>,
    unranked: Vec<C>,
}

impl<C> Record<C> {
    /// Explicitly ranked choices, from most preferred to least preferred.
    /// Each inner [`Vec`] contains choices ranked equally.
    pub fn ranked(&self) -> &[Vec<C>] {
        &self.ranked
    }

    /// Choices that were part of the election but that the ballot didn't
    /// rank.
    pub fn unranked(&self) -> &[C] {
        &self.unranked
    }

    /// Returns all the tiers, the unranked choices forming the last one if
    /// there are any.
    pub fn tiers(&self) -> impl Iterator<Item = &[C]> + '_ {
        self.ranked
            .iter()
            .map(|tier| tier.as_slice())
            .chain((!self.unranked.is_empty()).then_some(self.unranked.as_slice()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ballot<const N: usize>(entries: [(&'static str, i64); N]) -> Ballot<&'static str> {
        entries.into_iter().collect()
    }

    fn fruits() -> Choices<&'static str> {
        Choices::new(["apple", "banana", "cherry", "date"])
    }

    #[test]
    fn test_ranking_tiers() {
        let choices = fruits();
        let ranking = Ranking::new(
            &choices,
            &ballot([("cherry", 1), ("apple", 1), ("banana", 30)]),
        )
        .unwrap();
        assert_eq!(ranking.ranked(), &[vec![0, 2], vec![1]]);
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[0, 2][..], &[1][..], &[3][..]]
        );
    }

    #[test]
    fn test_ranking_negative_ranks() {
        let choices = fruits();
        let ranking = Ranking::new(&choices, &ballot([("date", -5), ("banana", 0)])).unwrap();
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[3][..], &[1][..], &[0, 2][..]]
        );
    }

    #[test]
    fn test_ranking_complete() {
        let choices = fruits();
        let ranking = Ranking::new(
            &choices,
            &ballot([("apple", 4), ("banana", 3), ("cherry", 2), ("date", 1)]),
        )
        .unwrap();
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[3][..], &[2][..], &[1][..], &[0][..]]
        );
    }

    #[test]
    fn test_ranking_empty_ballot() {
        let choices = fruits();
        let ranking = Ranking::new(&choices, &Ballot::new()).unwrap();
        assert!(ranking.ranked().is_empty());
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[0, 1, 2, 3][..]]
        );
    }

    #[test]
    fn test_ranking_no_choices() {
        let choices = Choices::<&str>::new([]);
        let ranking = Ranking::new(&choices, &Ballot::new()).unwrap();
        assert_eq!(ranking.tiers().count(), 0);
    }

    #[test]
    fn test_ranking_duplicate_choices() {
        let choices = Choices::new(["apple", "banana", "banana"]);
        let ranking = Ranking::new(&choices, &ballot([("apple", 1), ("banana", 2)])).unwrap();
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[0][..], &[1][..], &[2][..]]
        );
    }

    #[test]
    fn test_ranking_unknown_choice() {
        let choices = fruits();
        let error = Ranking::new(&choices, &ballot([("apple", 1), ("zucchini", 2)])).unwrap_err();
        assert_eq!(error, Error::UnknownChoice("zucchini"));
    }

    #[test]
    fn test_record() {
        let choices = fruits();
        let ranking = Ranking::new(&choices, &ballot([("date", 1), ("banana", 2)])).unwrap();
        let record = ranking.to_record(&choices);
        assert_eq!(record.ranked(), &[vec!["date"], vec!["banana"]]);
        assert_eq!(record.unranked(), &["apple", "cherry"]);
        assert_eq!(
            record.tiers().collect::<Vec<_>>(),
            vec![&["date"][..], &["banana"][..], &["apple", "cherry"][..]]
        );
        assert_eq!(Ranking::from_record(&choices, &record), ranking);
    }

    #[test]
    fn test_record_after_choices_changed() {
        let choices = fruits();
        let record = Ranking::new(
            &choices,
            &ballot([("apple", 1), ("cherry", 1), ("date", 2), ("banana", 3)]),
        )
        .unwrap()
        .to_record(&choices);
        assert!(record.unranked().is_empty());

        // Removed, reordered and added choices.
        let updated = Choices::new(["eggplant", "cherry", "banana", "fig", "apple"]);
        let ranking = Ranking::from_record(&updated, &record);
        assert_eq!(ranking.ranked(), &[vec![4, 1], vec![2]]);
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[4, 1][..], &[2][..], &[0, 3][..]]
        );
    }

    #[test]
    fn test_record_choice_added_back() {
        let choices = fruits();
        let record = Ranking::new(&choices, &ballot([("apple", 1), ("cherry", 2)]))
            .unwrap()
            .to_record(&choices);

        let removed = choices.update(["banana", "cherry", "date"]);
        let ranking = Ranking::from_record(&removed, &record);
        assert_eq!(ranking.ranked(), &[vec![1]]);

        // The new apple isn't the one that the ballot ranked.
        let added_back = removed.update(["apple", "banana", "cherry", "date"]);
        let ranking = Ranking::from_record(&added_back, &record);
        assert_eq!(
            ranking.tiers().collect::<Vec<_>>(),
            vec![&[2][..], &[0, 1, 3][..]]
        );

        // Records of ballots cast after the update rank it again.
        let record = Ranking::new(&added_back, &ballot([("apple", 1), ("cherry", 2)]))
            .unwrap()
            .to_record(&added_back);
        let ranking = Ranking::from_record(&added_back, &record);
        assert_eq!(ranking.ranked(), &[vec![0], vec![2]]);
    }
}
