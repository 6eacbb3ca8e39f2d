//! Algorithms over a built [`crate::Graph`].
//!
//! Every operation takes the graph by shared reference, allocates its own
//! working state and returns a value object; nothing here mutates a graph
//! or keeps state between calls.

pub mod cycles;
pub mod dijkstra;
pub mod follow;
mod heap;
pub mod hierarchy;
pub mod linearize;
pub mod shortest_cycle;

pub use cycles::{CycleGroup, Cycles};
pub use follow::{follow, follow_all};
pub use hierarchy::Hierarchy;
pub use linearize::{LinearizationMode, Linearization, linearize};
pub use shortest_cycle::{Cycle, shortest_cycle};
