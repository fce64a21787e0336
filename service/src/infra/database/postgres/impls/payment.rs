//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{booking, payment, Payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::Insertion,
};

impl<C> Database<Insert<Payment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO payments (\
                id, transaction_id, booking_id, target_kind, \
                amount, amount_currency, method, status, created_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::INT2, \
                $5::NUMERIC, $6::INT2, $7::INT2, $8::INT2, $9::TIMESTAMPTZ\
            ) \
            ON CONFLICT (transaction_id) DO NOTHING";
        let affected = self
            .exec(
                SQL,
                &[
                    &payment.id,
                    &payment.transaction_id,
                    &payment.target.booking_id(),
                    &payment.target.kind(),
                    &payment.amount.amount,
                    &payment.amount.currency,
                    &payment.method,
                    &payment.status,
                    &payment.created_at,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;
        Ok(if affected == 0 {
            Insertion::Occupied
        } else {
            Insertion::Inserted
        })
    }
}

impl<C> Database<Select<By<Vec<Payment>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let booking_id: booking::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, transaction_id, booking_id, target_kind, \
                   amount, amount_currency, method, status, created_at \
            FROM payments \
            WHERE booking_id = $1::UUID \
            ORDER BY created_at ASC";
        Ok(self
            .query(SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let booking_id = row.get("booking_id");
                Payment {
                    id: row.get("id"),
                    transaction_id: row.get("transaction_id"),
                    target: match row.get("target_kind") {
                        booking::Kind::Flight => {
                            payment::Target::Flight(booking_id)
                        }
                        booking::Kind::Hotel => {
                            payment::Target::Hotel(booking_id)
                        }
                        booking::Kind::Package => {
                            payment::Target::Package(booking_id)
                        }
                    },
                    amount: Money {
                        amount: row.get("amount"),
                        currency: row.get("amount_currency"),
                    },
                    method: row.get("method"),
                    status: row.get("status"),
                    created_at: row.get("created_at"),
                }
            })
            .collect())
    }
}
