//! Ordered layers of vertices, leaves first.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexSet;

use crate::graph::{Graph, Vertex};

/// An ordered sequence of disjoint, non-empty vertex layers.
///
/// Layer `k` only depends on layers `< k`; layer 0 holds the leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    layers: Vec<IndexSet<Vertex>>,
}

impl Hierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap pre-computed layers. Empty layers are dropped.
    #[must_use]
    pub fn from_layers(layers: Vec<IndexSet<Vertex>>) -> Self {
        let mut hierarchy = Self::new();
        for layer in layers {
            hierarchy.push_layer(layer);
        }
        hierarchy
    }

    #[must_use]
    pub fn layers(&self) -> &[IndexSet<Vertex>] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Add a layer on top. Empty layers are ignored.
    pub fn push_layer(&mut self, layer: IndexSet<Vertex>) {
        if !layer.is_empty() {
            self.layers.push(layer);
        }
    }

    /// Stack all layers of `other` on top of this hierarchy.
    pub fn append(&mut self, other: Self) {
        self.layers.extend(other.layers);
    }

    /// Same layers, top first.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            layers: self.layers.iter().rev().cloned().collect(),
        }
    }

    /// Total number of vertices over all layers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.layers.iter().map(IndexSet::len).sum()
    }

    #[must_use]
    pub fn contains(&self, vertex: Vertex) -> bool {
        self.layer_of(vertex).is_some()
    }

    /// Index of the layer holding `vertex`.
    #[must_use]
    pub fn layer_of(&self, vertex: Vertex) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains(&vertex))
    }

    /// Every vertex in the hierarchy, layer by layer.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.layers.iter().flat_map(|layer| layer.iter().copied())
    }

    /// Payloads layer by layer, sorted with `compare` inside each layer.
    #[must_use]
    pub fn sorted_payloads<'g, T, F>(&self, graph: &'g Graph<T>, mut compare: F) -> Vec<&'g T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sorted_groups(graph, &mut compare)
            .into_iter()
            .map(|(_, payload)| payload)
            .collect()
    }

    /// Like [`Hierarchy::sorted_payloads`], paired with the layer number.
    #[must_use]
    pub fn sorted_groups<'g, T, F>(&self, graph: &'g Graph<T>, mut compare: F) -> Vec<(usize, &'g T)>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut out = Vec::with_capacity(self.vertex_count());
        for (index, layer) in self.layers.iter().enumerate() {
            let mut payloads: Vec<&T> = layer.iter().map(|v| graph.payload(*v)).collect();
            payloads.sort_by(|a, b| compare(a, b));
            out.extend(payloads.into_iter().map(|payload| (index, payload)));
        }
        out
    }

    /// `"[a, b]; [c]"`: layers in order, payloads sorted by their rendering
    /// inside a layer.
    #[must_use]
    pub fn render<T: fmt::Display>(&self, graph: &Graph<T>) -> String {
        self.layers
            .iter()
            .map(|layer| render_group(graph, layer))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// `"[a, b, c]"` with payloads sorted by their rendering.
pub(crate) fn render_group<T: fmt::Display>(graph: &Graph<T>, group: &IndexSet<Vertex>) -> String {
    let mut names: Vec<String> = group.iter().map(|v| graph.payload(*v).to_string()).collect();
    names.sort_unstable();
    format!("[{}]", names.join(", "))
}
