//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

use super::{forward_to_connection, get_or_init, NonTx};

/// Transactional Postgres database client.
///
/// The transaction is opened lazily on the first statement, reusing the
/// connection of the [`NonTx`] client it was created from, if any. Dropping
/// all the clones without committing rolls the transaction back.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] to acquire a connection from, if the [`NonTx`]
    /// client has none.
    pool: connection::Pool,

    /// [`NonTx`] client this [`Tx`] was created from, until the transaction
    /// is opened.
    origin: Arc<Mutex<Option<NonTx>>>,

    /// Lazily opened [`connection::Tx`].
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client from the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool.clone(),
            origin: Arc::new(Mutex::new(Some(client))),
            tx: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the [`connection::Tx`] of this client, opening it if there is
    /// none yet.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        get_or_init(&self.tx, || async {
            let reused = match self.origin.lock().await.take() {
                Some(client) => client.take_connection().await,
                None => None,
            };
            let conn = if let Some(conn) = reused {
                conn
            } else {
                self.pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?
            };
            connection::Tx::from_non_tx(conn)
                .await
                .map_err(tracerr::wrap!())
        })
        .await
        .map_err(tracerr::wrap!())
    }

    /// Commits the transaction of this [`Tx`] client.
    ///
    /// Does nothing if no statement has been executed yet.
    ///
    /// # Errors
    ///
    /// If failed to `COMMIT` the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

forward_to_connection!(Tx);
