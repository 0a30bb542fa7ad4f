//! The idempotency primitive: look up, create only on miss.
//!
//! Every structural mutation in the engine (workspaces, sheets, columns,
//! reference values) goes through [`get_or_create`]. Re-running a migration
//! therefore reuses what the first run built instead of duplicating it.

use std::future::Future;

/// A handle returned by [`get_or_create`], tagged with how it was obtained.
///
/// The tag lets callers count created vs reused structures without a second
/// lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The lookup found an existing item; it was returned untouched.
    Existing(T),
    /// The lookup missed and the item was freshly created.
    Created(T),
}

impl<T> Fetched<T> {
    /// Unwrap the handle, discarding the tag.
    pub fn into_inner(self) -> T {
        match self {
            Self::Existing(value) | Self::Created(value) => value,
        }
    }

    /// Borrow the handle.
    pub const fn value(&self) -> &T {
        match self {
            Self::Existing(value) | Self::Created(value) => value,
        }
    }

    /// Whether the item was created by this call.
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Run `lookup`; on a miss, run `create`.
///
/// Neither closure is ever retried here — transport-level retry lives in the
/// client resilience policy. Errors from either closure propagate unchanged.
///
/// # Errors
///
/// Returns whatever error the failing closure produced.
pub async fn get_or_create<T, E, L, C, LFut, CFut>(lookup: L, create: C) -> Result<Fetched<T>, E>
where
    L: FnOnce() -> LFut,
    C: FnOnce() -> CFut,
    LFut: Future<Output = Result<Option<T>, E>>,
    CFut: Future<Output = Result<T, E>>,
{
    if let Some(existing) = lookup().await? {
        return Ok(Fetched::Existing(existing));
    }
    Ok(Fetched::Created(create().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[tokio::test]
    async fn hit_skips_create() {
        let created = Cell::new(false);
        let fetched: Fetched<u32> = get_or_create(
            || async { Ok::<_, ()>(Some(7)) },
            || async {
                created.set(true);
                Ok(99)
            },
        )
        .await
        .unwrap();

        assert_eq!(fetched, Fetched::Existing(7));
        assert!(!fetched.was_created());
        assert!(!created.get());
    }

    #[tokio::test]
    async fn miss_creates_exactly_once() {
        let calls = Cell::new(0);
        let fetched: Fetched<u32> = get_or_create(
            || async { Ok::<_, ()>(None) },
            || async {
                calls.set(calls.get() + 1);
                Ok(42)
            },
        )
        .await
        .unwrap();

        assert_eq!(fetched.into_inner(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn lookup_error_propagates_without_creating() {
        let created = Cell::new(false);
        let result: Result<Fetched<u32>, &str> = get_or_create(
            || async { Err("lookup failed") },
            || async {
                created.set(true);
                Ok(1)
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "lookup failed");
        assert!(!created.get());
    }

    #[tokio::test]
    async fn create_error_propagates() {
        let result: Result<Fetched<u32>, &str> =
            get_or_create(|| async { Ok(None) }, || async { Err("create failed") }).await;
        assert_eq!(result.unwrap_err(), "create failed");
    }
}
