//! [`Payment`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{booking, Payment},
    infra::{
        database::{self, memory::Access, Memory},
        Database,
    },
    read::Insertion,
};

impl<A: Access> Database<Insert<Payment>> for Memory<A> {
    type Ok = Insertion;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .write(|s| {
                if !s.transaction_ids.insert(payment.transaction_id.clone()) {
                    return Insertion::Occupied;
                }
                drop(s.payments.insert(payment.id, payment));
                Insertion::Inserted
            })
            .await)
    }
}

impl<A: Access> Database<Select<By<Vec<Payment>, booking::Id>>> for Memory<A> {
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_id = by.into_inner();
        let mut payments = self
            .read(|s| {
                s.payments
                    .values()
                    .filter(|p| p.target.booking_id() == booking_id)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        payments.sort_by_key(|p| p.created_at);
        Ok(payments)
    }
}
