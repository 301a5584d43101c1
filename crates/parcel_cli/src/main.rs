//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise the parcel lifecycle end to end against a real database.
//! - Keep output deterministic apart from assigned numbers and timestamps.
//!
//! Usage: `parcel_cli [DB_PATH]`. Without a path an in-memory database is
//! used. Set `PARCEL_LOG_DIR` (absolute) and optionally `PARCEL_LOG_LEVEL`
//! to enable file logging.

use parcel_core::{
    core_version, default_log_level, init_logging, open_db, open_db_in_memory, ParcelService,
    SqliteParcelStore,
};
use std::error::Error;
use std::process::ExitCode;

const DEMO_CLIENT: i64 = 1000;
const DEMO_ADDRESS: &str = "Pushkin st. 10";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("parcel_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("PARCEL_LOG_DIR") {
        let level = std::env::var("PARCEL_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn)?);

    let parcel = service.register(DEMO_CLIENT, DEMO_ADDRESS)?;
    println!(
        "registered number={} client={} status={} created_at={}",
        parcel.number, parcel.client, parcel.status, parcel.created_at
    );

    service.change_address(parcel.number, "Lenin sq. 1")?;
    if let Some(status) = service.next_status(parcel.number)? {
        println!("advanced number={} status={status}", parcel.number);
    }

    for parcel in service.client_parcels(DEMO_CLIENT)? {
        println!(
            "client={} number={} status={} address={}",
            parcel.client, parcel.number, parcel.status, parcel.address
        );
    }

    println!("parcel_core version={}", core_version());
    Ok(())
}
