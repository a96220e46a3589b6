use std::env;

use loyalty_ledger::catalog::RewardCatalog;
use loyalty_ledger::csv::{read_events, write_balances};
use loyalty_ledger::{Ledger, Tier};
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let events_path = args
        .next()
        .expect("usage: loyalty-ledger <events.csv> [catalog.csv]");

    if !events_path.ends_with(".csv") {
        warn!(path = %events_path, "input file seems to not be a csv file");
    }

    let catalog = match args.next() {
        Some(path) => RewardCatalog::from_csv(&path).expect("failed to load reward catalog"),
        None => RewardCatalog::builtin(),
    };

    let ledger = Ledger::new(catalog);
    let (event_sender, event_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_events(&events_path) {
            match result {
                Ok(event) => {
                    event_sender.send(event).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    ledger.run(ReceiverStream::new(event_receiver)).await;

    write_balances(ledger.accounts().iter().map(|account| {
        (
            account.id(),
            account.current(),
            account.total_earned(),
            Tier::for_lifetime(account.total_earned()),
        )
    }));
}
