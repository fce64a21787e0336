//! Postgres database client definitions.

pub mod non_tx;
pub mod tx;

use std::future::Future;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database;

pub use self::{non_tx::NonTx, tx::Tx};

/// Returns the value of the provided `slot`, initializing it with the `init`
/// [`Future`] first, if it's empty.
///
/// # Errors
///
/// If the `init` [`Future`] fails.
async fn get_or_init<T, F>(
    slot: &RwLock<Option<T>>,
    init: impl FnOnce() -> F,
) -> Result<RwLockReadGuard<'_, T>, Traced<database::Error>>
where
    F: Future<Output = Result<T, Traced<database::Error>>>,
{
    let read = slot.read().await;
    let guard = if read.is_none() {
        drop(read);

        let mut write = slot.write().await;
        if write.is_none() {
            *write = Some(init().await.map_err(tracerr::wrap!())?);
        }
        write.downgrade()
    } else {
        read
    };

    Ok(RwLockReadGuard::map(guard, |v| {
        v.as_ref()
            .expect("cannot be emptied while guard is alive")
    }))
}

/// Implements [`Connection`] for the provided client type by forwarding to
/// its lazily initialized `connection()`.
///
/// [`Connection`]: super::Connection
macro_rules! forward_to_connection {
    ($ty:ty) => {
        impl Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Vec<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Option<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .query_opt(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<u64, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                self.connection()
                    .await
                    .map_err(tracerr::wrap!())?
                    .exec(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }
        }
    };
}
pub(crate) use forward_to_connection;
