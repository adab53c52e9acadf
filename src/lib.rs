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

//! Implementation of the [Schulze method](https://en.wikipedia.org/wiki/Schulze_method)
//! to compute the winner of a preferential election.
//!
//! Ballots are tallied into a matrix of pairwise preferences, which can be
//! updated incrementally: votes can be reverted, and the choices can be
//! updated without replaying the ballots cast so far.
//!
//! ```
//! use schulze_rs::{Ballot, Voting};
//!
//! let mut voting = Voting::new(["apple", "banana", "cherry"]);
//! voting.vote(&Ballot::from([("apple", 1), ("banana", 2)])).unwrap();
//! let record = voting.vote(&Ballot::from([("cherry", 1)])).unwrap();
//! voting.vote(&Ballot::from([("banana", 1), ("apple", 2)])).unwrap();
//! voting.unvote(&record);
//!
//! let result = voting.compute();
//! assert!(result.tie);
//! assert_eq!(result.results[0].choice, "apple");
//! assert_eq!(result.results[2].choice, "cherry");
//!
//! for duel in result.duels() {
//!     if let Some((winner, defeated)) = duel.outcome() {
//!         println!("{} beats {}", winner.choice, defeated.choice);
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod bitset;
pub mod choices;
pub mod duels;
pub mod error;
pub mod preferences;
pub mod strengths;
pub mod types;
mod util;
pub mod voting;

pub use choices::Choices;
pub use duels::{ChoiceStrength, Duel, Duels};
pub use error::Error;
pub use preferences::Preferences;
pub use strengths::{Parallel, Strengths};
pub use types::{Ballot, ChoiceResult, ElectionResult, Record};
pub use voting::{Voting, VotingBuilder};

/// Computes the results of an election from its preferences.
pub fn compute<C: Clone>(
    preferences: &Preferences,
    choices: &Choices<C>,
    parallel: Parallel,
) -> ElectionResult<C> {
    preferences.compute(choices, parallel)
}
