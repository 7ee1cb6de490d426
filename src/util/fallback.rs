use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSource {
    Primary,
    Fallback,
}

/// A value tagged with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn primary(value: T) -> Self {
        Self {
            value,
            source: DataSource::Primary,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: DataSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            value: f(self.value),
            source: self.source,
        }
    }
}

/// Awaits `primary`; `Ok(None)` (nothing usable) and `Err` both resolve to
/// `fallback()`. Never fails.
pub async fn fetch_with_fallback<T, E, Fut>(
    label: &str,
    primary: Fut,
    fallback: impl FnOnce() -> T,
) -> Sourced<T>
where
    Fut: Future<Output = Result<Option<T>, E>>,
    E: Display,
{
    match primary.await {
        Ok(Some(value)) => {
            debug!(label, "loaded from primary source");
            Sourced::primary(value)
        }
        Ok(None) => {
            debug!(label, "primary source returned nothing usable; using fallback");
            Sourced::fallback(fallback())
        }
        Err(err) => {
            warn!(label, "primary source failed, using fallback: {err}");
            Sourced::fallback(fallback())
        }
    }
}

/// Treats an empty list as "nothing usable".
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn primary_value_wins() {
        let result =
            fetch_with_fallback("test", async { Ok::<_, String>(Some(3)) }, || 7).await;
        assert_eq!(result, Sourced::primary(3));
    }

    #[tokio::test]
    async fn errors_fall_back() {
        let result =
            fetch_with_fallback("test", async { Err::<Option<u8>, _>("offline") }, || 7).await;
        assert_eq!(result, Sourced::fallback(7));
        assert!(result.is_fallback());
    }

    #[tokio::test]
    async fn unusable_values_fall_back() {
        let result = fetch_with_fallback(
            "test",
            async { Ok::<_, String>(non_empty(Vec::<u8>::new())) },
            || vec![1, 2],
        )
        .await;
        assert_eq!(result.value, vec![1, 2]);
        assert_eq!(result.source, DataSource::Fallback);
    }

    #[test]
    fn map_keeps_the_source() {
        let mapped = Sourced::fallback(2).map(|v| v * 10);
        assert_eq!(mapped, Sourced::fallback(20));
    }
}
