//! What the border cycle needs from the server it runs in.

use crate::events::Completion;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccupantId(pub SlotKey);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub id: OccupantId,
    pub location: Location,
}

/// A square border, `size` wide along both horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderState {
    pub size: f64,
    pub center: (f64, f64),
    pub damage_amount: f64,
}
impl BorderState {
    pub fn half_size(&self) -> f64 {
        self.size / 2.0
    }
    /// Points on the edge count as inside.
    pub fn contains(&self, x: f64, z: f64) -> bool {
        let half = self.half_size();
        (x - self.center.0).abs() <= half && (z - self.center.1).abs() <= half
    }
}

/// The game server. Every call happens on the tick thread.
pub trait Host {
    fn world_named(&self, name: &str) -> Option<WorldId>;
    /// Loaded worlds, in load order.
    fn worlds(&self) -> Vec<WorldId>;

    fn border(&self, world: WorldId) -> BorderState;
    fn set_border_damage(&mut self, world: WorldId, amount: f64);
    /// Starts animating the border from its current size towards `target`.
    fn resize_border(&mut self, world: WorldId, target: f64, duration: Ticks) -> Result<(), HostError>;

    fn occupants(&self, world: WorldId) -> Vec<Occupant>;
    /// Starts moving an occupant. The outcome arrives later through `done`,
    /// possibly from another thread.
    fn relocate(&mut self, occupant: OccupantId, target: Location, done: Completion);
    fn is_online(&self, occupant: OccupantId) -> bool;
    fn location(&self, occupant: OccupantId) -> Option<Location>;
    fn online(&self) -> Vec<OccupantId>;
    fn send(&mut self, occupant: OccupantId, feedback: Feedback);
    fn broadcast(&mut self, message: Text);

    /// Topmost solid block of a column.
    fn highest_block_y(&self, world: WorldId, x: i32, z: i32) -> i32;

    /// Wall clock, in unix millis.
    fn now_millis(&self) -> u64;
}

/// The configured world if it's loaded, else whichever world loaded first.
pub fn resolve_world(host: &impl Host, name: &str) -> Option<WorldId> {
    host.world_named(name).or_else(|| host.worlds().first().copied())
}

/// Sets border damage to zero, skipping the host call when it already is.
pub fn disable_border_damage(host: &mut impl Host, world: WorldId) {
    if host.border(world).damage_amount != 0.0 {
        log::debug!("disabling border damage in {world:?}");
        host.set_border_damage(world, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inside() {
        let border = BorderState { size: 100.0, center: (10.0, -10.0), damage_amount: 0.0 };
        assert!(border.contains(60.0, -10.0));
        assert!(border.contains(-40.0, 40.0));
        assert!(border.contains(60.0, -60.0));
        assert!(!border.contains(60.001, 0.0));
        assert!(!border.contains(0.0, -60.5));
    }
}
