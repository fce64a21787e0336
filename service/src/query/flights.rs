//! [`Query`] collection related to the multiple [`Flight`]s.

use common::{
    operations::{By, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::City;
use crate::{
    domain::{booking::flight::PassengerCount, city, Flight},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] searching bookable [`Flight`]s between two [`City`]s on a
/// [`Date`], ordered by their departure time.
#[derive(Clone, Copy, Debug)]
pub struct Search {
    /// ID of the [`City`] to depart from.
    pub source_city_id: city::Id,

    /// ID of the [`City`] to arrive to.
    pub destination_city_id: city::Id,

    /// [`Date`] to depart at.
    pub date: Date,

    /// Number of passengers to fit into the found [`Flight`]s.
    pub passengers: PassengerCount,
}

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Flight>, read::flight::Search>>,
        Ok = Vec<Flight>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Flight>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Search) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Search {
            source_city_id,
            destination_city_id,
            date,
            passengers,
        } = query;

        if source_city_id == destination_city_id {
            return Err(tracerr::new!(E::SameCities(source_city_id)));
        }
        if date < Date::today() {
            return Err(tracerr::new!(E::DateInPast(date)));
        }

        self.database()
            .execute(Select(By::<Vec<Flight>, _>::new(read::flight::Search {
                source_city_id,
                destination_city_id,
                date,
                passengers: passengers.quantity(),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`Search`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Departure [`Date`] has passed already.
    #[display("Departure date `{_0}` is in the past")]
    DateInPast(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Source and destination [`City`] are the same.
    #[display("Cannot fly from `City(id: {_0})` to itself")]
    SameCities(#[error(not(source))] city::Id),
}
