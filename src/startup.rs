//! Backend startup sequence.
//!
//! Loads credentials, builds the client app, acquires a database handle and
//! announces readiness. Initialization failures are logged as warnings and
//! never abort startup; the returned [`StartupReport`] records what actually
//! came up.

use crate::{client::App, config::ServerConfig, database::Database};
use std::io::Write;

/// Outcome of the startup sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    pub app_initialized: bool,
    pub database_connected: bool,
    pub port: u16,
}

impl StartupReport {
    /// True when every initialization step succeeded
    pub fn is_ready(&self) -> bool {
        self.app_initialized && self.database_connected
    }

    /// The readiness line. It is printed whether or not startup succeeded.
    pub fn ready_line(&self) -> String {
        format!("Server ready on port {} (Placeholder)", self.port)
    }
}

/// Runs the startup sequence, writing status lines to `out`.
///
/// The database handle is released before returning.
pub async fn run<W: Write>(config: &ServerConfig, out: &mut W) -> std::io::Result<StartupReport> {
    writeln!(out, "Starting Fuzzy-Go Backend...")?;

    let mut report = StartupReport {
        app_initialized: false,
        database_connected: false,
        port: config.port,
    };

    let app = match App::new(&config.app_options()).await {
        Ok(app) => {
            report.app_initialized = true;
            writeln!(out, "Client app initialized successfully.")?;
            Some(app)
        }
        Err(err) => {
            tracing::warn!(
                credentials = %config.credentials_file.display(),
                "client app init failed (expected if no key yet): {err}"
            );
            None
        }
    };

    let database = match &app {
        Some(app) => connect(app, out).await?,
        None => {
            tracing::warn!("skipping database client: app is not initialized");
            None
        }
    };
    report.database_connected = database.is_some();

    writeln!(out, "{}", report.ready_line())?;
    if !report.is_ready() {
        tracing::warn!(
            app_initialized = report.app_initialized,
            database_connected = report.database_connected,
            "backend started without a working database"
        );
    }

    if let Some(db) = database {
        db.close();
    }

    Ok(report)
}

async fn connect<W: Write>(app: &App, out: &mut W) -> std::io::Result<Option<Database>> {
    match app.database().await {
        Ok(db) => {
            writeln!(out, "Database client connected.")?;
            tracing::info!(project_id = app.project_id(), "database client connected");
            Ok(Some(db))
        }
        Err(err) => {
            tracing::warn!("could not get database client: {err}");
            Ok(None)
        }
    }
}
