use crate::events::Completion;
use crate::host::{BorderState, Host, Occupant, OccupantId, WorldId};
use crate::prelude::*;
use std::collections::HashMap;

// A stand-in server with no network and no real terrain.
// Worlds are flat at `FLAT_HEIGHT` unless a column is overridden,
// borders animate linearly tick by tick, and players only exist
// as a position plus whatever has been sent to them.

pub const FLAT_HEIGHT: i32 = 64;

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f64,
    to: f64,
    start: u64,
    duration: u64,
}

#[derive(Debug)]
struct World {
    name: String,
    border: BorderState,
    transition: Option<Transition>,
    heights: HashMap<(i32, i32), i32>,
}

#[derive(Debug)]
struct Player {
    name: String,
    world: WorldId,
    location: Location,
    inbox: Vec<Feedback>,
}

#[derive(Debug)]
struct PendingMove {
    target: Location,
    done: Completion,
}

#[derive(Debug)]
pub struct Server {
    worlds: Vec<World>,
    players: SlotMap<Player>,
    tick: u64,
    epoch_millis: u64,
    defer_moves: bool,
    pending_moves: Vec<PendingMove>,
    fail_resizes: bool,
    chat: Vec<Text>,
}

impl Server {
    /// `epoch_millis` is the wall clock at tick 0.
    pub fn new(epoch_millis: u64) -> Self {
        Self {
            worlds: vec![],
            players: SlotMap::new(),
            tick: 0,
            epoch_millis,
            defer_moves: false,
            pending_moves: vec![],
            fail_resizes: false,
            chat: vec![],
        }
    }
    pub fn create_world(&mut self, name: &str, border_size: f64) -> WorldId {
        self.worlds.push(World {
            name: name.to_owned(),
            border: BorderState { size: border_size, center: (0.0, 0.0), damage_amount: 0.2 },
            transition: None,
            heights: HashMap::new(),
        });
        WorldId(self.worlds.len() - 1)
    }
    pub fn set_border_center(&mut self, world: WorldId, x: f64, z: f64) {
        self.worlds[world.0].border.center = (x, z);
    }
    pub fn set_height(&mut self, world: WorldId, x: i32, z: i32, y: i32) {
        self.worlds[world.0].heights.insert((x, z), y);
    }
    /// Relocations finish on the next tick instead of immediately.
    pub fn defer_relocations(&mut self, defer: bool) {
        self.defer_moves = defer;
    }
    pub fn fail_resizes(&mut self, fail: bool) {
        self.fail_resizes = fail;
    }

    pub fn join(&mut self, name: &str, world: WorldId, location: Location) -> OccupantId {
        log::debug!("{name} joined {}", self.worlds[world.0].name);
        OccupantId(self.players.insert(Player {
            name: name.to_owned(),
            world,
            location,
            inbox: vec![],
        }))
    }
    pub fn leave(&mut self, occupant: OccupantId) {
        if let Some(player) = self.players.release(occupant.0) {
            log::debug!("{} left", player.name);
        }
    }
    pub fn take_inbox(&mut self, occupant: OccupantId) -> Vec<Feedback> {
        self.players
            .get_mut(occupant.0)
            .map(|p| core::mem::take(&mut p.inbox))
            .unwrap_or_default()
    }
    pub fn chat(&self) -> &[Text] {
        &self.chat
    }
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn tick_until(&mut self, tickn: u64) {
        while self.tick < tickn {
            self.tick();
        }
    }
    pub fn tick(&mut self) {
        self.tick += 1;
        let now = self.tick;
        for world in &mut self.worlds {
            if let Some(t) = world.transition {
                let progress = (now - t.start) as f64 / t.duration as f64;
                if progress >= 1.0 {
                    world.border.size = t.to;
                    world.transition = None;
                } else {
                    world.border.size = t.from + (t.to - t.from) * progress;
                }
            }
        }
        for PendingMove { target, done } in core::mem::take(&mut self.pending_moves) {
            let moved = self.teleport(done.occupant(), target);
            done.complete(moved);
        }
    }
    fn teleport(&mut self, occupant: OccupantId, target: Location) -> bool {
        match self.players.get_mut(occupant.0) {
            Some(player) => {
                player.location = target;
                true
            }
            None => false,
        }
    }
}

impl Host for Server {
    fn world_named(&self, name: &str) -> Option<WorldId> {
        self.worlds.iter().position(|w| w.name == name).map(WorldId)
    }
    fn worlds(&self) -> Vec<WorldId> {
        (0..self.worlds.len()).map(WorldId).collect()
    }
    fn border(&self, world: WorldId) -> BorderState {
        self.worlds[world.0].border
    }
    fn set_border_damage(&mut self, world: WorldId, amount: f64) {
        self.worlds[world.0].border.damage_amount = amount;
    }
    fn resize_border(&mut self, world: WorldId, target: f64, duration: Ticks) -> Result<(), HostError> {
        if self.fail_resizes {
            return Err(HostError(format!("border of world {} is locked", world.0)));
        }
        let world = self.worlds.get_mut(world.0).ok_or_else(|| HostError(format!("no world {}", world.0)))?;
        world.transition = Some(Transition {
            from: world.border.size,
            to: target,
            start: self.tick,
            duration: duration.0.max(1),
        });
        Ok(())
    }
    fn occupants(&self, world: WorldId) -> Vec<Occupant> {
        self.players
            .iter()
            .filter(|(_, p)| p.world == world)
            .map(|(key, p)| Occupant { id: OccupantId(key), location: p.location })
            .collect()
    }
    fn relocate(&mut self, occupant: OccupantId, target: Location, done: Completion) {
        if self.defer_moves {
            self.pending_moves.push(PendingMove { target, done });
        } else {
            done.complete(self.teleport(occupant, target));
        }
    }
    fn is_online(&self, occupant: OccupantId) -> bool {
        self.players.contains(occupant.0)
    }
    fn location(&self, occupant: OccupantId) -> Option<Location> {
        self.players.get(occupant.0).map(|p| p.location)
    }
    fn online(&self) -> Vec<OccupantId> {
        self.players.iter().map(|(key, _)| OccupantId(key)).collect()
    }
    fn send(&mut self, occupant: OccupantId, feedback: Feedback) {
        if let Some(player) = self.players.get_mut(occupant.0) {
            if let Feedback::Message(text) = &feedback {
                log::info!("[to {}] {}", player.name, text);
            }
            player.inbox.push(feedback);
        }
    }
    fn broadcast(&mut self, message: Text) {
        log::info!("[chat] {message}");
        self.chat.push(message);
    }
    fn highest_block_y(&self, world: WorldId, x: i32, z: i32) -> i32 {
        self.worlds[world.0].heights.get(&(x, z)).copied().unwrap_or(FLAT_HEIGHT)
    }
    fn now_millis(&self) -> u64 {
        self.epoch_millis.saturating_add(Ticks(self.tick).as_millis())
    }
}
