use mcborder::commands::{Command, Sender};
use mcborder::headless::Server;
use mcborder::notifier::HttpNotifier;
use mcborder::types::MILLIS_PER_TICK;
use mcborder::{BorderCycle, Config, TickScheduler};
use std::sync::mpsc;
use std::time::*;

const CONSOLE: Sender = Sender { is_op: true };

fn console() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// How long after startup a tick is due.
fn offset_of_tick(tick: u64) -> Duration {
    Duration::from_millis(MILLIS_PER_TICK.saturating_mul(tick))
}

fn main() -> Result<(), mcborder::BorderError> {
    env_logger::init();
    let config_path = std::env::args_os().nth(1).unwrap_or_else(|| "config.toml".into());
    let config = Config::load_or_default(&config_path)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let (mailbox, events) = mcborder::events::channel();
    let notifier = HttpNotifier::new(&config.api, runtime.handle().clone(), mailbox.clone())?;

    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    let mut server = Server::new(epoch);
    server.create_world(&config.world.name, 59_999_968.0);

    let mut scheduler = TickScheduler::new();
    let mut cycle = BorderCycle::new(config, Box::new(notifier), mailbox, events);
    cycle.enable(&mut server, &mut scheduler)?;

    let commands = console();
    let starttime = Instant::now();
    loop {
        let next_tick_due = starttime + offset_of_tick(server.current_tick() + 1);
        if let Some(wait) = next_tick_due.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }

        server.tick();
        scheduler.advance();
        while let Some(task) = scheduler.poll() {
            if let Err(e) = cycle.run(task, &mut server, &mut scheduler) {
                log::error!("world border cycle failed: {e}");
                cycle.disable(&mut scheduler);
                return Err(e);
            }
        }
        cycle.process_events(&mut server);

        while let Ok(line) = commands.try_recv() {
            if line.trim() == "stop" {
                cycle.disable(&mut scheduler);
                return Ok(());
            }
            match Command::parse(&line) {
                Ok(command) => match cycle.execute(command, CONSOLE, &mut server, &mut scheduler) {
                    Ok(lines) => lines.iter().for_each(|l| println!("{l}")),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_offsets_do_not_wrap() {
        assert_eq!(offset_of_tick(1), Duration::from_millis(50));
        assert_eq!(offset_of_tick(1 << 32), Duration::from_millis(50 << 32));
    }
}
