use std::path::PathBuf;
use std::thread;

use chrono::Utc;
use ctrlc::set_handler;
use pico_args::Arguments;
use rustyline::{
    Cmd, ConditionalEventHandler, DefaultEditor, Event, EventContext, EventHandler, KeyEvent,
    error::ReadlineError,
};
use scribe_client::{
    client::HttpBackend,
    dashboard::{Dashboard, DashboardOptions},
    models::repl::UserRequest,
    render,
};
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, warn};

struct InterruptEventHandler;

impl ConditionalEventHandler for InterruptEventHandler {
    fn handle(
        &self,
        _: &Event,
        _: rustyline::RepeatCount,
        _: bool,
        ctx: &EventContext,
    ) -> Option<rustyline::Cmd> {
        if ctx.line().is_empty() {
            Some(Cmd::EndOfFile)
        } else {
            Some(Cmd::Interrupt)
        }
    }
}

/// User REPL loop. Every line is forwarded to the main loop right away so
/// the prompt stays usable while saves and searches are in flight.
fn repl(tx: Sender<UserRequest>) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let interrupt_event_handler = Box::new(InterruptEventHandler);
    rl.bind_sequence(
        KeyEvent::ctrl('c'),
        EventHandler::Conditional(interrupt_event_handler),
    );

    loop {
        let request = match rl.readline(">> ") {
            Ok(input) => {
                if input.trim().is_empty() {
                    continue;
                }
                if let Err(err) = rl.add_history_entry(input.as_str()) {
                    warn!("failed to record history: {err}");
                }
                let Ok(request) = input.parse::<UserRequest>();
                request
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => UserRequest::Quit,
            Err(err) => return Err(err),
        };
        let quit = request == UserRequest::Quit;
        if tx.blocking_send(request).is_err() || quit {
            return Ok(());
        }
    }
}

const HELP: &str = "\
Save and search notes from the terminal

USAGE:
  scribe_client [OPTIONS]

OPTIONS:
  --config  Path to a JSON config file  [default: $SCRIBE_CONFIG_PATH]
  --url     Backend base URL            [default: http://127.0.0.1:6969]
  --token   Bearer token for backend calls

FLAGS:
  -h, --help    Print help information

COMMANDS:
  <text>    Replace the input with <text>
  /save     Save the input as a note
  /search   Search notes similar to the input
  /keep     Save the latest search results as a note
  /show     Show the whole dashboard
  /clear    Clear the input
  /help     Print this help
  /quit     Exit
";

struct Args {
    config: Option<PathBuf>,
    url: Option<String>,
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        println!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        config: pargs.opt_value_from_str("--config")?,
        url: pargs.opt_value_from_str("--url")?,
        token: pargs.opt_value_from_str("--token")?,
    };
    let Args { config, url, token } = args;

    let mut config = scribe_client::init(config)?;
    if let Some(url) = url {
        config.backend.base_url = url;
    }
    if token.is_some() {
        config.token = token;
    }
    if config.token.is_none() {
        debug!("no token configured, backend calls are unauthenticated");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    let options = DashboardOptions::builder()
        .maybe_token(config.token.clone())
        .notice_duration(config.notice_duration())
        .build();
    let backend = HttpBackend::new(config.backend)?;
    let dashboard = Dashboard::new(backend, options);
    let mut updates = dashboard.subscribe();
    let mut shown = updates.borrow_and_update().clone();

    let (user_request_sender, mut user_request_receiver): (
        Sender<UserRequest>,
        Receiver<UserRequest>,
    ) = tokio::sync::mpsc::channel(8);
    thread::spawn(|| repl(user_request_sender));

    println!("{}", render::dashboard(&shown, Utc::now()));

    // Main loop.
    loop {
        tokio::select! {
            request = user_request_receiver.recv() => {
                let Some(request) = request else {
                    break;
                };
                let state = dashboard.state();
                match request {
                    UserRequest::Input(text) => dashboard.set_input(text),
                    UserRequest::Save if state.can_save() => {
                        let dashboard = dashboard.clone();
                        tokio::spawn(async move { dashboard.save().await });
                    }
                    UserRequest::Save => println!("Save Note is disabled"),
                    UserRequest::Search if state.can_search() => {
                        let dashboard = dashboard.clone();
                        tokio::spawn(async move { dashboard.search().await });
                    }
                    UserRequest::Search => println!("Search Note is disabled"),
                    UserRequest::SaveResult if state.visible_results().is_some() => {
                        let dashboard = dashboard.clone();
                        tokio::spawn(async move { dashboard.save_result().await });
                    }
                    UserRequest::SaveResult => println!("No search results to save"),
                    UserRequest::Show => println!("{}", render::dashboard(&state, Utc::now())),
                    UserRequest::Clear => dashboard.set_input(""),
                    UserRequest::Help => println!("{}", HELP),
                    UserRequest::Quit => break,
                    UserRequest::Unknown(command) => {
                        println!("Unknown command {command}, try /help");
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("dashboard state channel closed");
                    break;
                }
                let next = updates.borrow_and_update().clone();
                for line in render::changes(&shown, &next, Utc::now()) {
                    println!("{line}");
                }
                shown = next;
            }
        }
    }

    dashboard.close();
    Ok(())
}
