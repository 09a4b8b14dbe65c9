//! Correlation identifier for one request or webhook delivery.
//!
//! The identifier sits in Tokio task-local storage, so [`Error::new`] can
//! stamp it onto payloads without threading it through every port. Spawned
//! tasks do not inherit it; wrap their futures in [`TraceId::scope`].
//!
//! [`Error::new`]: crate::domain::Error::new

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header used to receive and echo the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID correlating log lines and error bodies.
///
/// # Examples
/// ```
/// use gallery::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("uuid");
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `trace_id` in scope.
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn nested_scopes_shadow_and_restore() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            let nested = TraceId::scope(inner, async { TraceId::current() }).await;
            (nested, TraceId::current())
        })
        .await;

        assert_eq!(seen, (Some(inner), Some(outer)));
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_identifier() {
        let id = TraceId::generate();
        let seen = TraceId::scope(id, async {
            tokio::spawn(async { TraceId::current() })
                .await
                .expect("task joins")
        })
        .await;
        assert_eq!(seen, None);
    }

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6", true)]
    #[case("trace-123", false)]
    #[case("", false)]
    fn parses_only_uuids(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(raw.parse::<TraceId>().is_ok(), valid);
    }
}
