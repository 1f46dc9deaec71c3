use std::process::ExitCode;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use worldclock::app::{APP_NAME, Reply, WorldClockApp};
use worldclock::{commands, logging, repl};
use worldclock_core::{ClockMetrics, Settings, SettingsStore};
use worldclock_overlay::{NativeClockWindow, OverlayConfig};

/// How often window events (clicks, expose, close) are polled
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _log_guard = logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "World Clock stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let store = SettingsStore::at_default_location();
    let settings = store.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Could not read settings, using defaults");
        Settings::default()
    });

    let metrics = ClockMetrics::new(settings.show_seconds);
    let config = OverlayConfig {
        namespace: APP_NAME.to_string(),
        always_on_top: settings.layout.always_on_top,
        ..OverlayConfig::default()
    };
    let window = NativeClockWindow::new(config, metrics)
        .map_err(|e| format!("Could not create the clock window: {e}"))?;
    let mut app = WorldClockApp::new(window, &settings, store)
        .map_err(|e| format!("Could not create the clocks: {e}"))?;
    app.registry_mut().host_mut().present();

    let mut lines = repl::spawn_reader();
    let mut input_open = true;
    let mut tick = interval(metrics.tick_period());
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut poll = interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{APP_NAME}: type `help` for commands");
    repl::prompt();

    loop {
        tokio::select! {
            _ = tick.tick() => app.tick(),
            _ = poll.tick() => {
                let window = app.registry_mut().host_mut();
                if !window.poll_events() {
                    tracing::info!("Clock window closed");
                    break;
                }
                if let Some((x, y)) = window.take_pending_click() {
                    app.select_at(x, y);
                }
            }
            line = lines.recv(), if input_open => {
                let Some(line) = line else {
                    // Keep showing the clocks without a prompt
                    tracing::info!("Command input closed");
                    input_open = false;
                    continue;
                };

                match commands::parse_line(&line) {
                    Ok(None) => {}
                    Ok(Some(command)) => match app.handle(command) {
                        Ok(Reply::Done) => {}
                        Ok(Reply::Text(text)) => println!("{text}"),
                        Ok(Reply::Exit) => break,
                        Err(err) => return Err(format!("Fatal: {err}")),
                    },
                    Err(err) => println!("{err}"),
                }
                repl::prompt();
            }
        }
        app.registry_mut().host_mut().present();
    }

    drop(app.shutdown());
    tracing::info!("World Clock exited");
    Ok(())
}
