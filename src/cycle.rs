use crate::config::Config;
use crate::enforcer;
use crate::events::{Event, Events, Mailbox};
use crate::host::{self, Host, WorldId};
use crate::notifier::{self, BorderUpdate, Reporter};
use crate::prelude::*;
use crate::sampler;
use crate::scheduler::{Scheduler, TaskHandle};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const RETRY_DELAY: Ticks = Ticks::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Cycle,
    Sweep,
}

/// What the last cycle decided. All zero until the first cycle runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleSnapshot {
    pub target_size: f64,
    pub duration: Ticks,
    /// Unix millis at which the running transition finishes.
    pub ends_at: u64,
    pub debug: bool,
}
impl CycleSnapshot {
    pub fn millis_left(&self, now: u64) -> u64 {
        self.ends_at.saturating_sub(now)
    }
}

/// Resizes the border on a random schedule and keeps everyone inside it.
pub struct BorderCycle {
    config: Config,
    snapshot: CycleSnapshot,
    cycle_task: Option<TaskHandle>,
    sweep_task: Option<TaskHandle>,
    rng: StdRng,
    reporter: Box<dyn Reporter>,
    mailbox: Mailbox,
    events: Events,
}

impl BorderCycle {
    pub fn new(config: Config, reporter: Box<dyn Reporter>, mailbox: Mailbox, events: Events) -> Self {
        Self::with_rng(config, reporter, mailbox, events, StdRng::from_os_rng())
    }
    pub fn with_rng(config: Config, reporter: Box<dyn Reporter>, mailbox: Mailbox, events: Events, rng: StdRng) -> Self {
        Self {
            config,
            snapshot: CycleSnapshot::default(),
            cycle_task: None,
            sweep_task: None,
            rng,
            reporter,
            mailbox,
            events,
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn snapshot(&self) -> &CycleSnapshot {
        &self.snapshot
    }
    pub fn debug(&self) -> bool {
        self.snapshot.debug
    }
    pub fn pending_cycle(&self) -> Option<TaskHandle> {
        self.cycle_task
    }
    pub fn pending_sweep(&self) -> Option<TaskHandle> {
        self.sweep_task
    }
    pub fn world(&self, host: &impl Host) -> Option<WorldId> {
        host::resolve_world(host, &self.config.world.name)
    }

    pub fn enable(&mut self, host: &mut impl Host, sched: &mut impl Scheduler<Task>) -> Result<()> {
        if let Some(world) = self.world(&*host) {
            host::disable_border_damage(host, world);
        }
        let interval = self.config.teleport.check_interval();
        if let Some(old) = self.sweep_task.replace(sched.schedule_repeating(Ticks(1), interval, Task::Sweep)) {
            sched.cancel(old);
        }
        self.run_cycle(host, sched)?;
        log::info!("world border cycle enabled");
        Ok(())
    }

    pub fn disable(&mut self, sched: &mut impl Scheduler<Task>) {
        for handle in [self.cycle_task.take(), self.sweep_task.take()].into_iter().flatten() {
            sched.cancel(handle);
        }
        log::info!("world border cycle disabled");
    }

    /// Runs a task handed out by the scheduler.
    pub fn run(&mut self, task: Task, host: &mut impl Host, sched: &mut impl Scheduler<Task>) -> Result<()> {
        match task {
            Task::Cycle => self.run_cycle(host, sched),
            Task::Sweep => {
                self.sweep(host);
                Ok(())
            }
        }
    }

    pub fn run_cycle(&mut self, host: &mut impl Host, sched: &mut impl Scheduler<Task>) -> Result<()> {
        let debug = self.snapshot.debug;
        let Some(world) = self.world(&*host) else {
            let delay = if debug {
                Ticks::from_secs(sampler::sample_debug_secs(&mut self.rng))
            } else {
                RETRY_DELAY
            };
            log::error!(
                "world {:?} not found and no other world is loaded, retrying in {}",
                self.config.world.name,
                format_duration(delay.as_secs())
            );
            self.rearm(sched, delay);
            return Ok(());
        };

        host::disable_border_damage(host, world);
        let old_size = host.border(world).size;
        let target_size = sampler::sample_border_size(&mut self.rng, debug, &self.config.bounds);
        let duration_secs = sampler::sample_duration_secs(&mut self.rng, debug, &self.config.timing);
        let duration = Ticks::from_secs(duration_secs).max(Ticks(1));

        host.resize_border(world, target_size, duration)?;
        enforcer::enforce(host, world, &self.mailbox);

        self.snapshot = CycleSnapshot {
            target_size,
            duration,
            ends_at: host.now_millis().saturating_add(duration.as_millis()),
            debug,
        };

        self.announce(host, old_size, target_size, duration_secs);
        self.reporter.report(BorderUpdate { old_size, new_size: target_size, duration_secs });

        log::info!(
            "world border update: {old_size:.2} -> {target_size:.2} over {}{}",
            format_duration(duration_secs),
            if debug { " [DEBUG]" } else { "" }
        );
        self.rearm(sched, duration);
        Ok(())
    }

    fn rearm(&mut self, sched: &mut impl Scheduler<Task>, delay: Ticks) {
        if let Some(old) = self.cycle_task.replace(sched.schedule_once(delay, Task::Cycle)) {
            sched.cancel(old);
        }
    }

    pub fn sweep(&mut self, host: &mut impl Host) {
        let Some(world) = self.world(&*host) else {
            log::warn!("world {:?} not found, skipping border sweep", self.config.world.name);
            return;
        };
        if self.config.teleport.disable_damage_each_sweep {
            host::disable_border_damage(host, world);
        }
        let moved = enforcer::enforce(host, world, &self.mailbox);
        if moved > 0 {
            log::debug!("border sweep moved {moved} occupants");
        }
    }

    /// Flips between debug and normal cycles. The running cycle is dropped
    /// and a fresh one starts on the next tick.
    pub fn toggle_debug(&mut self, sched: &mut impl Scheduler<Task>) -> bool {
        self.snapshot.debug = !self.snapshot.debug;
        if let Some(old) = self.cycle_task.take() {
            sched.cancel(old);
        }
        self.cycle_task = Some(sched.schedule_once(Ticks::ZERO, Task::Cycle));
        log::info!("debug mode {}", if self.snapshot.debug { "on" } else { "off" });
        self.snapshot.debug
    }

    /// Handles everything that finished since the last tick.
    pub fn process_events(&mut self, host: &mut impl Host) {
        while let Some(event) = self.events.try_next() {
            match event {
                Event::Relocated { occupant, success: true } => enforcer::notify_corrected(host, occupant),
                Event::Relocated { occupant, success: false } => {
                    log::debug!("relocating {occupant:?} failed, next sweep will retry");
                }
                Event::Reported(outcome) => notifier::log_outcome(&outcome),
            }
        }
    }

    fn announce(&self, host: &mut impl Host, old_size: f64, new_size: f64, duration_secs: u64) {
        let duration = format_duration(duration_secs);
        let suffix = if self.snapshot.debug { " [DEBUG]" } else { "" };
        host.broadcast(Text::colored(
            Color::Gold,
            format!("World border: {old_size:.0} -> {new_size:.0} over {duration}{suffix}"),
        ));
        for occupant in host.online() {
            host.send(occupant, Feedback::Title {
                title: Text::colored(Color::Red, "World Border Updating"),
                subtitle: Text::colored(Color::Yellow, format!("Size {new_size:.0} in {duration}")),
                fade_in: Ticks(10),
                stay: Ticks(100),
                fade_out: Ticks(20),
            });
            if let Some(at) = host.location(occupant) {
                host.send(occupant, Feedback::Sound {
                    sound: Sound::EnderDragonGrowl,
                    at,
                    volume: 10.0,
                    pitch: 0.75,
                });
            }
        }
    }
}

pub fn format_duration(total_secs: u64) -> String {
    if total_secs < 60 {
        return format!("{total_secs}s");
    }
    let (minutes, secs) = (total_secs / 60, total_secs % 60);
    if secs == 0 {
        format!("{minutes}m")
    } else {
        format!("{minutes}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_read_naturally() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(43_200), "720m");
    }

    #[test]
    fn time_left_never_goes_negative() {
        let snapshot = CycleSnapshot { ends_at: 1_000, ..Default::default() };
        assert_eq!(snapshot.millis_left(400), 600);
        assert_eq!(snapshot.millis_left(5_000), 0);
        assert_eq!(CycleSnapshot::default().millis_left(123), 0);
    }
}
