use crate::geom::EPS;

/// Tunables of a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// A point hits a shape when its outline distance is strictly below this.
    pub hit_tolerance: f64,
    /// Fewest members a group may be created with. Values below 1 act as 1.
    pub min_group_members: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: EPS,
            min_group_members: 1,
        }
    }
}

impl SceneConfig {
    pub fn with_hit_tolerance(mut self, hit_tolerance: f64) -> Self {
        self.hit_tolerance = hit_tolerance;
        self
    }

    pub fn with_min_group_members(mut self, min_group_members: usize) -> Self {
        self.min_group_members = min_group_members;
        self
    }

    pub(crate) fn required_members(&self) -> usize {
        self.min_group_members.max(1)
    }
}
