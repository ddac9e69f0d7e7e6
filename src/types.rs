use std::fmt;

pub const TICKS_PER_SECOND: u64 = 20;
pub const MILLIS_PER_TICK: u64 = 1000 / TICKS_PER_SECOND;

/// Game time, in server ticks (20 per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(pub u64);
impl Ticks {
    pub const ZERO: Ticks = Ticks(0);

    pub const fn from_secs(secs: u64) -> Self {
        Ticks(secs.saturating_mul(TICKS_PER_SECOND))
    }
    pub const fn as_secs(self) -> u64 {
        self.0 / TICKS_PER_SECOND
    }
    pub const fn as_millis(self) -> u64 {
        self.0.saturating_mul(MILLIS_PER_TICK)
    }
    pub const fn from_millis(millis: u64) -> Self {
        Ticks(millis / MILLIS_PER_TICK)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct V3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}
#[allow(non_snake_case)]
pub const fn V3<T>(x: T, y: T, z: T) -> V3<T> {
    V3 { x, y, z }
}

/// Where an occupant stands and which way it is facing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location {
    pub pos: V3<f64>,
    pub yaw: f32,
    pub pitch: f32,
}
impl Location {
    pub const fn at(x: f64, y: f64, z: f64) -> Self {
        Self { pos: V3(x, y, z), yaw: 0.0, pitch: 0.0 }
    }
    pub fn facing(self, yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch, ..self }
    }
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            pos: V3(self.pos.x + dx, self.pos.y + dy, self.pos.z + dz),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Gold,
    Yellow,
    Green,
    White,
}

/// A chat component: text with an optional color, followed by `extra` parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub color: Option<Color>,
    pub extra: Vec<Text>,
}
impl Text {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), color: None, extra: vec![] }
    }
    pub fn colored(color: Color, text: impl Into<String>) -> Self {
        Self { color: Some(color), ..Self::plain(text) }
    }
    pub fn then(mut self, next: Text) -> Self {
        self.extra.push(next);
        self
    }
}
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        for part in &self.extra {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    EndermanTeleport,
    EnderDragonGrowl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    Portal,
}

/// Anything the server can show a single player.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Message(Text),
    Title {
        title: Text,
        subtitle: Text,
        fade_in: Ticks,
        stay: Ticks,
        fade_out: Ticks,
    },
    Sound {
        sound: Sound,
        at: Location,
        volume: f32,
        pitch: f32,
    },
    Particles {
        particle: Particle,
        at: Location,
        count: u32,
        spread: V3<f64>,
        speed: f64,
    },
}
