//! Derived views cached on [`Network`](super::Network).
//!
//! Nothing recomputes on its own: a mutation that can change a view drops it, and the next
//! call through the network's accessor rebuilds it.

#[derive(Debug, Clone)]
pub(in crate::network) struct Cached<T> {
    value: Option<T>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Cached<T> {
    pub(in crate::network) fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub(in crate::network) fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub(in crate::network) fn set(&mut self, value: T) -> &T {
        self.value.insert(value)
    }

    pub(in crate::network) fn invalidate(&mut self) {
        self.value = None;
    }
}

/// Minimum and maximum assigned layer, plus whether every vertex carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::network) struct LayerBounds {
    pub(in crate::network) range: Option<super::LayerRange>,
    pub(in crate::network) complete: bool,
}
