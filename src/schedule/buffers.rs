use crate::foundation::core::{Category, Point3};

/// Render-ready placement of one instance: translation plus uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct InstanceTransform {
    pub position: Point3,
    pub scale: f64,
}

impl InstanceTransform {
    /// Inert slot: collapsed to a point at the origin.
    pub const HIDDEN: Self = Self {
        position: Point3::ORIGIN,
        scale: 0.0,
    };

    pub fn is_hidden(&self) -> bool {
        *self == Self::HIDDEN
    }
}

/// Fixed-capacity per-category instance slots consumed by the renderer.
///
/// Slots `[0, count)` of a category are valid; everything after is inert.
#[derive(Clone, Debug)]
pub struct InstanceBuffers {
    capacity: usize,
    slots: [Vec<InstanceTransform>; Category::COUNT],
    counts: [usize; Category::COUNT],
}

impl InstanceBuffers {
    /// Allocate `capacity` hidden slots for every category.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: std::array::from_fn(|_| vec![InstanceTransform::HIDDEN; capacity]),
            counts: [0; Category::COUNT],
        }
    }

    /// Slots per category.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of valid slots for `category`.
    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    /// Valid slots of `category`.
    pub fn visible(&self, category: Category) -> &[InstanceTransform] {
        let i = category.index();
        &self.slots[i][..self.counts[i]]
    }

    /// Every slot of `category`, valid or not.
    pub fn slots(&self, category: Category) -> &[InstanceTransform] {
        &self.slots[category.index()]
    }

    pub fn total_visible(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Append after the last valid slot. Returns `false` (and writes nothing) when full.
    pub(crate) fn push(&mut self, category: Category, t: InstanceTransform) -> bool {
        let i = category.index();
        let idx = self.counts[i];
        if idx >= self.capacity {
            return false;
        }
        self.slots[i][idx] = t;
        self.counts[i] = idx + 1;
        true
    }

    pub(crate) fn write(&mut self, category: Category, idx: usize, t: InstanceTransform) {
        self.slots[category.index()][idx] = t;
    }

    pub(crate) fn set_count(&mut self, category: Category, count: usize) {
        self.counts[category.index()] = count.min(self.capacity);
    }

    /// Hide slots `[from, capacity)` of `category`.
    pub(crate) fn hide_from(&mut self, category: Category, from: usize) {
        let slots = &mut self.slots[category.index()];
        let from = from.min(slots.len());
        slots[from..].fill(InstanceTransform::HIDDEN);
    }

    /// Hide everything and zero all counts.
    pub(crate) fn clear(&mut self) {
        for c in Category::ALL {
            self.hide_from(c, 0);
            self.counts[c.index()] = 0;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/buffers.rs"]
mod tests;
