// src/runtime.rs

//! Drives an [`App`]: reads interaction input, runs the commands the app
//! asks for, fires timers when they come due, and writes the rendered page
//! after every transition.

use crate::api::ListingsApi;
use crate::app::{Action, App, Command};
use crate::db::KeyValueStore;
use crate::errors::{BrowserError, BrowserResult};
use crate::router::{parse_command, Input};
use crate::sync::fetch_dataset;
use maud::Markup;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Performs one command against the API and returns the action carrying
/// its result.
pub fn execute(api: &dyn ListingsApi, command: Command) -> Action {
    debug!("Executing {command:?}");
    match command {
        Command::FetchListings => Action::ListingsLoaded(fetch_dataset(api)),
        Command::TriggerUpdate => Action::UpdateTriggered(api.trigger_update()),
    }
}

/// Feeds one action through the app, running any commands it produces
/// until the queue drains. The page is written before each command so the
/// in-flight state (loading, disabled buttons) is visible while it runs.
pub fn dispatch<S: KeyValueStore>(
    app: &mut App<S>,
    api: &dyn ListingsApi,
    action: Action,
    output: &Path,
) {
    let mut queue = VecDeque::from([action]);
    drain(app, api, &mut queue, output);
}

/// Fires due timers and runs whatever they schedule.
pub fn tick<S: KeyValueStore>(app: &mut App<S>, api: &dyn ListingsApi, output: &Path) {
    let commands = app.tick(Instant::now());
    let mut queue = VecDeque::new();
    run_commands(app, api, commands, &mut queue, output);
    drain(app, api, &mut queue, output);
}

fn drain<S: KeyValueStore>(
    app: &mut App<S>,
    api: &dyn ListingsApi,
    queue: &mut VecDeque<Action>,
    output: &Path,
) {
    while let Some(action) = queue.pop_front() {
        let commands = app.handle_user_action(action, Instant::now());
        run_commands(app, api, commands, queue, output);
    }
}

fn run_commands<S: KeyValueStore>(
    app: &mut App<S>,
    api: &dyn ListingsApi,
    commands: Vec<Command>,
    queue: &mut VecDeque<Action>,
    output: &Path,
) {
    for command in commands {
        publish(output, &app.render());
        queue.push_back(execute(api, command));
    }
}

/// Main loop. Starts with an initial load and returns when the input
/// channel sends [`Input::Quit`] or closes.
pub fn run<S: KeyValueStore>(
    app: &mut App<S>,
    api: &dyn ListingsApi,
    inputs: Receiver<Input>,
    output: &Path,
) {
    dispatch(app, api, Action::Load, output);
    publish(output, &app.render());

    loop {
        let received = match app.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                inputs.recv_timeout(wait)
            }
            None => inputs.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Input::Action(action)) => dispatch(app, api, action, output),
            Ok(Input::Quit) => break,
            Err(RecvTimeoutError::Timeout) => tick(app, api, output),
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Input closed");
                break;
            }
        }

        publish(output, &app.render());
    }

    info!(
        "Browser session ended with {} apartments shown.",
        app.state().filtered.active.len()
    );
}

/// Reads command lines on a background thread. Unparsable lines are logged
/// and skipped.
pub fn spawn_input_reader<R>(reader: R) -> Receiver<Input>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read input: {e}");
                    break;
                }
            };

            match parse_command(&line) {
                Ok(Some(input)) => {
                    if tx.send(input).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            }
        }
    });

    rx
}

/// Writes the page, keeping the session alive when the file cannot be
/// written. The next transition tries again.
fn publish(output: &Path, page: &Markup) {
    if let Err(e) = write_page(output, page) {
        warn!("{e}");
    }
}

/// Writes the rendered page, replacing the previous one.
fn write_page(path: &Path, page: &Markup) -> BrowserResult<()> {
    std::fs::write(path, &page.0).map_err(|e| {
        BrowserError::Storage(format!("Failed to write {}: {e}", path.display()))
    })
}
