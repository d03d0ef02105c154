//! Optimistic local updates with rollback.

use std::future::Future;

use tracing::warn;

use crate::Result;

/// Applies `mutate` to `target` right away, then awaits `commit`.
///
/// If `commit` fails, `target` is restored to the snapshot taken before the
/// mutation and the error is returned, so the local copy never disagrees
/// with the backend after a failed write.
///
/// # Example
///
/// ```
/// # use chirp_core::{optimistic, Error, ValidationError};
/// # tokio_test_block(async {
/// let mut count = 5u64;
/// let result: Result<(), Error> = optimistic::apply(
///     &mut count,
///     |c| *c += 1,
///     async { Err(ValidationError::Empty { field: "x" }.into()) },
/// )
/// .await;
/// assert!(result.is_err());
/// assert_eq!(count, 5);
/// # });
/// # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub async fn apply<T, R, F, Fut>(target: &mut T, mutate: F, commit: Fut) -> Result<R>
where
    T: Clone,
    F: FnOnce(&mut T),
    Fut: Future<Output = Result<R>>,
{
    let snapshot = target.clone();
    mutate(target);

    match commit.await {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(error = %err, "Optimistic update failed, rolling back");
            *target = snapshot;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, Error};

    #[tokio::test]
    async fn keeps_mutation_on_success() {
        let mut value = vec![1, 2];
        let out = apply(&mut value, |v| v.push(3), async { Ok::<_, Error>("done") })
            .await
            .unwrap();
        assert_eq!(out, "done");
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn restores_snapshot_on_failure() {
        let mut value = String::from("before");
        let result: Result<()> = apply(
            &mut value,
            |v| v.push_str(" and after"),
            async { Err(ApiError::new(404, "Not found.").into()) },
        )
        .await;
        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(value, "before");
    }
}
