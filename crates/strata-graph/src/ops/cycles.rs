//! Irreducible cycle groups reported by the decomposition.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexSet;

use super::hierarchy::render_group;
use super::shortest_cycle::Cycle;
use crate::graph::{Graph, Vertex};

/// One strongly connected group of at least two vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleGroup {
    vertices: IndexSet<Vertex>,
    shortest: Option<Cycle>,
}

impl CycleGroup {
    #[must_use]
    pub const fn new(vertices: IndexSet<Vertex>, shortest: Option<Cycle>) -> Self {
        Self { vertices, shortest }
    }

    /// Number of member vertices.
    #[must_use]
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub const fn vertices(&self) -> &IndexSet<Vertex> {
        &self.vertices
    }

    /// Cheapest cycle of three or more vertices through the group's first
    /// member, when one was computed and exists.
    #[must_use]
    pub const fn shortest(&self) -> Option<&Cycle> {
        self.shortest.as_ref()
    }

    #[must_use]
    pub fn contains(&self, vertex: Vertex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Smallest member payload under `compare`.
    #[must_use]
    pub fn first<'g, T, F>(&self, graph: &'g Graph<T>, mut compare: F) -> Option<&'g T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.vertices
            .iter()
            .map(|v| graph.payload(*v))
            .min_by(|a, b| compare(a, b))
    }

    /// Member payloads sorted with `compare`.
    #[must_use]
    pub fn sorted_payloads<'g, T, F>(&self, graph: &'g Graph<T>, mut compare: F) -> Vec<&'g T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut payloads: Vec<&T> = self.vertices.iter().map(|v| graph.payload(*v)).collect();
        payloads.sort_by(|a, b| compare(a, b));
        payloads
    }

    /// `"[a, b, c]"`, sorted by rendering.
    #[must_use]
    pub fn render<T: fmt::Display>(&self, graph: &Graph<T>) -> String {
        render_group(graph, &self.vertices)
    }
}

/// Disjoint cycle groups. No vertex belongs to two groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cycles {
    groups: Vec<CycleGroup>,
}

impl Cycles {
    #[must_use]
    pub const fn new(groups: Vec<CycleGroup>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CycleGroup> {
        self.groups.iter()
    }

    /// Size of the largest group, 0 when there are none.
    #[must_use]
    pub fn max_cycle_size(&self) -> usize {
        self.groups.iter().map(CycleGroup::size).max().unwrap_or(0)
    }

    /// Total number of vertices over all groups.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.groups.iter().map(CycleGroup::size).sum()
    }

    /// The group holding `vertex`, if any.
    #[must_use]
    pub fn group_of(&self, vertex: Vertex) -> Option<&CycleGroup> {
        self.groups.iter().find(|group| group.contains(vertex))
    }

    /// Each group's sorted payloads; larger groups first, equal sizes
    /// ordered by their smallest member.
    #[must_use]
    pub fn sorted_payloads<'g, T, F>(&self, graph: &'g Graph<T>, mut compare: F) -> Vec<Vec<&'g T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut sorted: Vec<Vec<&T>> = self
            .groups
            .iter()
            .map(|group| group.sorted_payloads(graph, &mut compare))
            .collect();
        sorted.sort_by(|a, b| {
            b.len().cmp(&a.len()).then_with(|| match (a.first(), b.first()) {
                (Some(x), Some(y)) => compare(*x, *y),
                _ => Ordering::Equal,
            })
        });
        sorted
    }

    /// `"[a, b, c]; [d, e]"`: larger groups first, then by rendering.
    #[must_use]
    pub fn render<T: fmt::Display>(&self, graph: &Graph<T>) -> String {
        let mut rendered: Vec<(usize, String)> = self
            .groups
            .iter()
            .map(|group| (group.size(), group.render(graph)))
            .collect();
        rendered.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        rendered
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<'a> IntoIterator for &'a Cycles {
    type Item = &'a CycleGroup;
    type IntoIter = std::slice::Iter<'a, CycleGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
