//! An ordered symbol table built on a binary search tree.
//!
//! This crate provides [`BstMap`], a map from unique keys to values that, besides the usual
//! lookup, insertion and deletion, answers order-statistic queries by caching the size of
//! every subtree in its root node:
//!
//! - [`rank`](BstMap::rank) - Number of keys strictly less than a key
//! - [`select`](BstMap::select) - Key at a given sorted position
//! - [`floor`](BstMap::floor) / [`ceiling`](BstMap::ceiling) - Nearest key at or below / above
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the value of the smallest key
//!
//! # Example
//!
//! ```
//! use ordered_bst::{BstMap, Rank};
//!
//! let mut scores = BstMap::new();
//! scores.add("Alice", 100);
//! scores.add("Bob", 85);
//! scores.add("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.size(), 3);
//!
//! // Order-statistic operations (O(depth))
//! assert_eq!(scores.select(1), Some(&"Bob"));
//! assert_eq!(scores.rank(&"Carol"), 2);
//! assert_eq!(scores.floor(&"Bz"), Some(&85));
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **`tracing`** - Optional trace events for structural mutations
//!
//! # Implementation
//!
//! The tree is a plain, unbalanced BST. Each node owns its two children and caches the number
//! of nodes in its subtree, so every operation costs O(depth). There is no rebalancing: keys
//! added in sorted order degrade the tree to a list and every operation to O(n).

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod bst_map;

pub use bst_map::BstMap;
pub use error::TreeError;
pub use order_statistic::Rank;
