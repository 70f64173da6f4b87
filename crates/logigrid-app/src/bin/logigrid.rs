//! Logigrid terminal game.
//!
//! Commands are read from stdin on a helper thread; the main loop ticks every
//! 50 ms so background generation and delayed reveals are picked up while
//! the player is thinking.

use std::{
    io::{self, BufRead, Write},
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use clap::Parser;
use logigrid_app::{
    action::{Action, ActionRequestQueue},
    app::App,
    config::Args,
};

const TICK: Duration = Duration::from_millis(50);

fn spawn_stdin_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> io::Result<()> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let mut app = App::new(&args);
    let mut queue = ActionRequestQueue::default();
    let mut stdout = io::stdout().lock();
    let lines = spawn_stdin_reader();

    queue.request(Action::NewGame { theme: None });
    writeln!(stdout, "Type `help` for commands.")?;

    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => match Action::parse(&line?) {
                Ok(Some(action)) => queue.request(action),
                Ok(None) => {}
                Err(err) => writeln!(stdout, "{err}")?,
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => queue.request(Action::Quit),
        }

        let now = Instant::now();
        app.poll(now, &mut queue);
        if app.handle_all(&mut queue, now, &mut stdout)?.is_quit() {
            break;
        }
    }
    Ok(())
}
