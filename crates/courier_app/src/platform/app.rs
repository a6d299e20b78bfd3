use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use courier_core::{update, AppState};
use courier_logging::{courier_info, courier_warn};

use super::config::{self, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::input::{parse_line, AppInput, HELP};
use super::{logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = config::load(&config_path)?;
    logging::initialize(&config.log)?;
    courier_info!(
        "courier starting: config={:?} backend={}",
        config_path,
        config.backend_url
    );

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(config.engine_config(), input_tx.clone())
        .context("failed to start download engine")?;
    spawn_stdin_reader(input_tx);

    println!("{HELP}");
    let mut state = AppState::new();
    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    print_view(&ui::render(&state.view(), &ui::timestamp()));
                }
            }
            AppInput::Help => println!("{HELP}"),
            AppInput::Unknown(line) => println!("Unknown command {line:?}; type /help"),
            AppInput::Quit => break,
        }
    }

    courier_info!("courier exiting");
    Ok(())
}

/// Each line is one input event; end of input quits.
fn spawn_stdin_reader(tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    courier_warn!("stdin read failed: {}", err);
                    break;
                }
            };
            if tx.send(parse_line(&line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppInput::Quit);
    });
}

fn print_view(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}
