//! Wavefront Longest Common Subsequence
//!
//! This crate computes the LCS of two sequences with the classic dynamic
//! program, reordered into anti-diagonal *lines* so that every cell of a
//! line can be evaluated independently, and spread over a group of
//! cooperating processes that each run a thread pool.
//!
//! ## Core idea
//! 1. Normalize the input so the longer sequence is *dominant* (rows) and
//!    remember whether the inputs were swapped.
//! 2. Store the DP table as a [`FoldedTable`](table::FoldedTable): one
//!    contiguous arena indexed by line, with the mirrored
//!    grow/plateau/shrink capacity profile of a rectangle's anti-diagonals.
//! 3. Let [`WavefrontEngine`] walk the lines in order. Long lines are split
//!    across the [`Collective`](group::Collective) group with a balanced
//!    block partition: the coordinator broadcasts the two previous lines,
//!    each rank fills its block, and the blocks are gathered back.
//! 4. Backtrack once on the coordinator to recover one LCS, in the original
//!    input orientation.
//!
//! ## Quick start
//! ```
//! use wavefront_lcs::WavefrontEngine;
//!
//! let engine = WavefrontEngine::new();
//! let lcs = engine.solve_distributed(b"ACCGGTCGAGTGCG", b"GTCGTTCGGA", 3).unwrap();
//! assert_eq!(lcs.length, 7);
//! assert_eq!(lcs.length, lcs.subsequence.len());
//! ```
//!
//! ## Process groups
//! - [`SoloGroup`]: a single process.
//! - [`LocalGroup`]: N ranks as threads of this process.
//! - `MpiGroup` (feature `mpi`): one rank per MPI process.

pub mod backtrack;
pub mod builder;
pub mod error;
pub mod executor;
pub mod group;
pub mod partition;
pub mod recurrence;
pub mod reference;
pub mod sequence;
pub mod shape;
pub mod table;
pub mod utils;
pub mod wavefront;

pub use crate::backtrack::Lcs;
pub use crate::builder::{WavefrontBuilder, WavefrontConfig};
pub use crate::error::LcsError;
pub use crate::group::{Collective, LocalGroup, SoloGroup};
pub use crate::sequence::SequencePair;
pub use crate::wavefront::WavefrontEngine;
