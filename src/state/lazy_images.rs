//! Deferred image loading

use std::collections::BTreeMap;

/// Rows around the viewport within which an image starts loading
pub const LOAD_MARGIN: u16 = 2;

/// Watches deferred images and loads each one the first time it nears the
/// viewport
#[derive(Debug, Clone, Default)]
pub struct LazyImageLoader {
    /// Image id to (top row, height) for images still waiting
    observed: BTreeMap<usize, (u16, u16)>,
    loaded: Vec<usize>,
}

impl LazyImageLoader {
    /// Start watching an image; loaded images are never observed again
    pub fn observe(&mut self, id: usize, top: u16, height: u16) {
        if !self.is_loaded(id) {
            self.observed.insert(id, (top, height));
        }
    }

    pub fn is_loaded(&self, id: usize) -> bool {
        self.loaded.contains(&id)
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Check observed images against the viewport
    ///
    /// Returns the ids that were loaded by this call, in page order.
    pub fn update(&mut self, viewport_top: u16, viewport_height: u16) -> Vec<usize> {
        let near_top = viewport_top.saturating_sub(LOAD_MARGIN);
        let near_bottom = viewport_top
            .saturating_add(viewport_height)
            .saturating_add(LOAD_MARGIN);

        let intersecting: Vec<usize> = self
            .observed
            .iter()
            .filter(|(_, (top, height))| {
                let bottom = top.saturating_add(*height);
                *top < near_bottom && bottom > near_top
            })
            .map(|(id, _)| *id)
            .collect();

        for id in &intersecting {
            self.observed.remove(id);
            self.loaded.push(*id);
            tracing::debug!(image = id, "Image loaded");
        }
        intersecting
    }
}
