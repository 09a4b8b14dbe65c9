//! Embedded PostgreSQL provisioning.
//!
//! One cluster is shared per test binary. Every test gets its own database
//! cloned from a template that already carries the embedded migrations; the
//! template name includes a hash of `migrations/` so schema changes rebuild
//! it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use gallery::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "gallery_template";
const PROVISION_RETRIES: usize = 5;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending_migrations(&url).map_err(|err| err.to_string())?;
    }

    Ok(template_name)
}

fn provision_attempt(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

/// A fresh, migrated database on the shared cluster.
pub fn provision_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let mut last_error = String::from("no provisioning attempt ran");
    for attempt in 1..=PROVISION_RETRIES {
        match provision_attempt(cluster) {
            Ok(database) => return Ok(database),
            Err(error) => last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error}"),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Drop `table` with `CASCADE` to simulate schema loss.
pub fn drop_table(url: &str, table: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let escaped = table.replace('"', "\"\"");
    client
        .batch_execute(&format!(r#"DROP TABLE IF EXISTS "{escaped}" CASCADE"#))
        .map_err(|err| format_postgres_error(&err))
}
