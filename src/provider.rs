use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::opendota_fetch::LookupSource;
use crate::state::{Delta, ProviderCommand};

pub const RECENT_MATCHES_ERROR: &str = "Error fetching recent matches";

/// Loads the hero catalog once in the background and serves lookup commands
/// until the UI drops its command sender. Lookups never wait on the catalog.
pub fn spawn_provider<S>(source: Arc<S>, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>)
where
    S: LookupSource + 'static,
{
    {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        thread::spawn(move || load_heroes(&*source, &tx));
    }

    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Lookup { seq, account_id } => {
                    let source = Arc::clone(&source);
                    let tx = tx.clone();
                    thread::spawn(move || {
                        run_lookup(&*source, seq, &account_id, &tx);
                    });
                }
            }
        }
    });
}

pub fn load_heroes(source: &dyn LookupSource, tx: &Sender<Delta>) {
    match source.fetch_heroes() {
        Ok(catalog) => {
            let _ = tx.send(Delta::SetHeroes(catalog));
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Hero catalog error: {err:#}")));
        }
    }
}

/// Profile first, then matches. Any failure rolls back the whole lookup.
pub fn run_lookup(source: &dyn LookupSource, seq: u64, account_id: &str, tx: &Sender<Delta>) {
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Lookup #{seq} started for {account_id}"
    )));

    let profile = match source.fetch_player(account_id) {
        Ok(profile) => profile,
        Err(err) => {
            let _ = tx.send(Delta::LookupFailed {
                seq,
                message: err.to_string(),
            });
            return;
        }
    };
    let _ = tx.send(Delta::ProfileLoaded { seq, profile });

    match source.fetch_recent_matches(account_id) {
        Ok(matches) => {
            let _ = tx.send(Delta::LookupSucceeded { seq, matches });
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Recent matches error: {err:#}"
            )));
            let _ = tx.send(Delta::LookupFailed {
                seq,
                message: RECENT_MATCHES_ERROR.to_string(),
            });
        }
    }
}
