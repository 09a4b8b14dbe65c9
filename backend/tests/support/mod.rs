//! Shared helpers for the embedded PostgreSQL integration suites.
//!
//! Each file under `backend/tests/` compiles as its own crate, so suites pull
//! these in with `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::{drop_table, provision_database};

/// Render a `postgres` error with its SQLSTATE, detail, and hint.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    for (label, part) in [("detail", db_error.detail()), ("hint", db_error.hint())] {
        if let Some(part) = part {
            summary.push_str(&format!("; {label}: {part}"));
        }
    }
    summary
}

/// `SKIP_TEST_CLUSTER` set to `1`, `true`, or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip the suite when the cluster is opted out, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
