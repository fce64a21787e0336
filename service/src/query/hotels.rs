//! [`Query`] collection related to the multiple [`Hotel`]s.

use common::{
    operations::{By, Select},
    Date, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::City;
use crate::{
    domain::{booking::hotel::RoomsCount, city, hotel::StarRating, Hotel},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] searching [`Hotel`]s in a [`City`] having enough rooms for a
/// stay, ordered by their [`StarRating`] descending and then by their price
/// ascending.
#[derive(Clone, Copy, Debug)]
pub struct Search {
    /// ID of the [`City`] to search [`Hotel`]s in.
    pub city_id: city::Id,

    /// [`Date`] to check in at.
    pub check_in: Date,

    /// [`Date`] to check out at.
    pub check_out: Date,

    /// Number of rooms to fit into the found [`Hotel`]s.
    pub rooms: RoomsCount,

    /// Minimum [`StarRating`] of the found [`Hotel`]s, if any.
    pub min_rating: Option<StarRating>,

    /// Maximum price per night of the found [`Hotel`]s, if any.
    pub max_price: Option<Money>,
}

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Hotel>, read::hotel::Search>>,
        Ok = Vec<Hotel>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Hotel>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: Search) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Search {
            city_id,
            check_in,
            check_out,
            rooms,
            min_rating,
            max_price,
        } = query;

        if check_in < Date::today() {
            return Err(tracerr::new!(E::CheckInInPast(check_in)));
        }
        if check_out <= check_in {
            return Err(tracerr::new!(E::InvalidDateRange {
                check_in,
                check_out,
            }));
        }

        self.database()
            .execute(Select(By::<Vec<Hotel>, _>::new(read::hotel::Search {
                city_id,
                rooms: rooms.quantity(),
                min_rating,
                max_price,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`Search`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Check-in [`Date`] has passed already.
    #[display("Check-in date `{_0}` is in the past")]
    CheckInInPast(#[error(not(source))] Date),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Check-out [`Date`] is not after the check-in one.
    #[display("Check-out date `{check_out}` is not after `{check_in}`")]
    InvalidDateRange {
        /// Requested check-in [`Date`].
        #[error(not(source))]
        check_in: Date,

        /// Requested check-out [`Date`].
        check_out: Date,
    },
}
