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

//! Errors reported to callers of the election engine.

use std::fmt::Debug;

/// Recoverable errors, caused by invalid input data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error<C: Debug> {
    /// A ballot ranks a choice that is not part of the election.
    #[error("unknown choice {0:?}")]
    UnknownChoice(C),
    /// An imported matrix doesn't have one row per choice.
    #[error("incorrect matrix length {found}, expected {expected}")]
    InvalidMatrixLength {
        /// Number of choices in the election.
        expected: usize,
        /// Number of rows in the matrix.
        found: usize,
    },
    /// A row of an imported matrix doesn't have one column per choice.
    #[error("incorrect length {found} of row {row}, expected {expected}")]
    InvalidRowLength {
        /// Index of the offending row.
        row: usize,
        /// Number of choices in the election.
        expected: usize,
        /// Number of columns in this row.
        found: usize,
    },
    /// The diagonal cell of a row of an imported matrix, which counts the
    /// ballots ranking its choice, is lower than another cell of the row.
    #[error("incorrect diagonal count {found} of row {row}, expected at least {minimum}")]
    InvalidDiagonal {
        /// Index of the offending row.
        row: usize,
        /// Largest count in this row.
        minimum: u64,
        /// Diagonal count of this row.
        found: u64,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_unknown_choice() {
        let error = Error::UnknownChoice(20);
        assert_eq!(error.to_string(), "unknown choice 20");

        let error = Error::UnknownChoice("zucchini");
        assert_eq!(error.to_string(), "unknown choice \"zucchini\"");
    }

    #[test]
    fn test_display_invalid_matrix() {
        let error = Error::<u8>::InvalidMatrixLength {
            expected: 3,
            found: 2,
        };
        assert_eq!(error.to_string(), "incorrect matrix length 2, expected 3");

        let error = Error::<u8>::InvalidRowLength {
            row: 1,
            expected: 3,
            found: 4,
        };
        assert_eq!(error.to_string(), "incorrect length 4 of row 1, expected 3");

        let error = Error::<u8>::InvalidDiagonal {
            row: 2,
            minimum: 5,
            found: 0,
        };
        assert_eq!(
            error.to_string(),
            "incorrect diagonal count 0 of row 2, expected at least 5"
        );
    }

    #[test]
    fn test_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(Error::UnknownChoice(7u32));
        assert_eq!(error.to_string(), "unknown choice 7");
    }
}
