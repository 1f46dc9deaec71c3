//! Line input from stdin
//!
//! Reading stdin blocks, so it happens on a dedicated thread that forwards
//! each line to the event loop.

use std::io::{BufRead, Write};

use tokio::sync::mpsc;

/// Start the reader thread. The channel closes when stdin does.
pub fn spawn_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    let spawned = std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Reading stdin failed");
                        break;
                    }
                }
            }
            tracing::debug!("Stdin reader finished");
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Could not start stdin reader, commands disabled");
    }
    rx
}

pub fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
