use crate::events::Mailbox;
use crate::host::{BorderState, Host, OccupantId, WorldId};
use crate::prelude::*;

/// Column to put an occupant on: its own position pulled at least one block
/// inside the border on both axes.
pub fn safe_column(border: &BorderState, x: f64, z: f64) -> (i32, i32) {
    let half = border.half_size();
    let (cx, cz) = border.center;
    let clamp = |v: f64, c: f64| v.min(c + half - 1.0).max(c - half + 1.0);
    (clamp(x, cx).floor() as i32, clamp(z, cz).floor() as i32)
}

pub fn safe_location(host: &impl Host, world: WorldId, border: &BorderState, current: Location) -> Location {
    let (x, z) = safe_column(border, current.pos.x, current.pos.z);
    let y = host.highest_block_y(world, x, z);
    Location::at(x as f64 + 0.5, y as f64 + 1.0, z as f64 + 0.5).facing(current.yaw, current.pitch)
}

/// Starts moving every occupant outside the border back in. Returns how
/// many relocations were started.
pub fn enforce(host: &mut impl Host, world: WorldId, mailbox: &Mailbox) -> usize {
    let border = host.border(world);
    let mut moved = 0;
    for occupant in host.occupants(world) {
        let current = occupant.location;
        if border.contains(current.pos.x, current.pos.z) {
            continue;
        }
        let target = safe_location(&*host, world, &border, current);
        log::debug!(
            "moving {:?} from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            occupant.id, current.pos.x, current.pos.z, target.pos.x, target.pos.z
        );
        host.relocate(occupant.id, target, mailbox.completion(occupant.id));
        moved += 1;
    }
    moved
}

/// Tells an occupant it was moved. Skipped if it has left in the meantime.
pub fn notify_corrected(host: &mut impl Host, occupant: OccupantId) {
    if !host.is_online(occupant) {
        return;
    }
    let Some(at) = host.location(occupant) else { return };
    host.send(occupant, Feedback::Message(Text::colored(
        Color::Red,
        "You were outside the world border and have been moved back inside.",
    )));
    host.send(occupant, Feedback::Title {
        title: Text::colored(Color::Red, "Border Warning"),
        subtitle: Text::colored(Color::Yellow, "You were moved back inside"),
        fade_in: Ticks(5),
        stay: Ticks(40),
        fade_out: Ticks(10),
    });
    host.send(occupant, Feedback::Sound {
        sound: Sound::EndermanTeleport,
        at,
        volume: 2.5,
        pitch: 1.0,
    });
    host.send(occupant, Feedback::Particles {
        particle: Particle::Portal,
        at: at.offset(0.0, 1.0, 0.0),
        count: 60,
        spread: V3(0.6, 0.8, 0.6),
        speed: 0.05,
    });
}
