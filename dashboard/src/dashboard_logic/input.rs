use lib_common::pipeline::Dashboard;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// What a line typed on stdin asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Quit,
}

impl Command {
    pub fn from_line(line: &str) -> Command {
        match line.trim() {
            "q" | "Q" | "quit" | "exit" => Command::Quit,
            _ => Command::Refresh,
        }
    }
}

/// Reads stdin on a plain thread; the runtime cannot cancel a blocking read.
fn spawn_stdin_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(Command::from_line(&line)).is_err() {
                break;
            }
        }
    });
    rx
}

/// Enter starts a manual refresh; `q` shuts everything down.
pub async fn run(dashboard: Arc<Dashboard>, shutdown_tx: broadcast::Sender<()>) {
    let mut commands = spawn_stdin_reader();
    let mut shutdown = shutdown_tx.subscribe();

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            command = commands.recv() => match command {
                Some(Command::Refresh) => {
                    dashboard.manual_refresh();
                }
                Some(Command::Quit) => {
                    log::info!("Quit requested from keyboard.");
                    let _ = shutdown_tx.send(());
                    break;
                }
                None => {
                    log::info!("stdin closed, manual refresh unavailable.");
                    // Keep running on the timer until a signal arrives
                    let _ = shutdown.recv().await;
                    break;
                }
            }
        }
    }
}
