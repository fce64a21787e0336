//! Reference catalog [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{
        airline, city, flight, hotel, Airline, Attraction, City, Flight, Hotel,
    },
    infra::{
        database::{self, memory::Access, Memory},
        Database,
    },
    read,
};

/// Implements [`Insert`] and [`Select`] by ID [`Database`] operations for a
/// catalog entity.
macro_rules! impl_catalog_entity {
    ($entity:ty, $id:ty, $table:ident) => {
        impl<A: Access> Database<Insert<$entity>> for Memory<A> {
            type Ok = ();
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Insert(entity): Insert<$entity>,
            ) -> Result<Self::Ok, Self::Err> {
                self.write(|s| drop(s.$table.insert(entity.id, entity)))
                    .await;
                Ok(())
            }
        }

        impl<A: Access> Database<Select<By<Option<$entity>, $id>>>
            for Memory<A>
        {
            type Ok = Option<$entity>;
            type Err = Traced<database::Error>;

            async fn execute(
                &self,
                Select(by): Select<By<Option<$entity>, $id>>,
            ) -> Result<Self::Ok, Self::Err> {
                let id = by.into_inner();
                Ok(self.read(|s| s.$table.get(&id).cloned()).await)
            }
        }
    };
}

impl_catalog_entity!(City, city::Id, cities);
impl_catalog_entity!(Airline, airline::Id, airlines);
impl_catalog_entity!(Flight, flight::Id, flights);
impl_catalog_entity!(Hotel, hotel::Id, hotels);

impl<A: Access> Database<Insert<Attraction>> for Memory<A> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(attraction): Insert<Attraction>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| drop(s.attractions.insert(attraction.id, attraction)))
            .await;
        Ok(())
    }
}

impl<A: Access> Database<Select<By<Vec<Flight>, read::flight::Search>>>
    for Memory<A>
{
    type Ok = Vec<Flight>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Flight>, read::flight::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        let passengers = u32::from(search.passengers.get());

        let mut flights = self
            .read(|s| {
                s.flights
                    .values()
                    .filter(|f| {
                        f.source_city_id == search.source_city_id
                            && f.destination_city_id
                                == search.destination_city_id
                            && f.date == search.date
                            && matches!(
                                f.status,
                                flight::Status::Scheduled
                                    | flight::Status::Delayed,
                            )
                            && f.capacity.available() >= passengers
                    })
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        flights.sort_by_key(|f| (f.departure_time, f.number.to_string()));
        Ok(flights)
    }
}

impl<A: Access> Database<Select<By<Vec<Hotel>, read::hotel::Search>>>
    for Memory<A>
{
    type Ok = Vec<Hotel>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Hotel>, read::hotel::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        let rooms = u32::from(search.rooms.get());

        let mut hotels = self
            .read(|s| {
                s.hotels
                    .values()
                    .filter(|h| {
                        h.city_id == search.city_id
                            && h.capacity.available() >= rooms
                            && search
                                .min_rating
                                .map_or(true, |min| h.star_rating >= min)
                            && search.max_price.map_or(true, |max| {
                                h.price_per_night.currency == max.currency
                                    && h.price_per_night.amount <= max.amount
                            })
                    })
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        hotels.sort_by(|a, b| {
            b.star_rating
                .cmp(&a.star_rating)
                .then(a.price_per_night.amount.cmp(&b.price_per_night.amount))
        });
        Ok(hotels)
    }
}

impl<A: Access>
    Database<Select<By<Vec<Attraction>, read::attraction::Filter>>>
    for Memory<A>
{
    type Ok = Vec<Attraction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Attraction>, read::attraction::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        Ok(self
            .read(|s| {
                let mut attractions = s
                    .attractions
                    .values()
                    .filter(|a| {
                        filter.city_id.map_or(true, |id| a.city_id == id)
                            && filter.category.map_or(true, |c| a.category == c)
                            && filter.max_fee.map_or(true, |max| {
                                a.entry_fee.map_or(true, |fee| {
                                    fee.currency == max.currency
                                        && fee.amount <= max.amount
                                })
                            })
                    })
                    .map(|a| {
                        let city = s
                            .cities
                            .get(&a.city_id)
                            .map(|c| c.name.to_string())
                            .unwrap_or_default();
                        (city, a.name.to_string(), a.clone())
                    })
                    .collect::<Vec<_>>();
                attractions.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
                attractions.into_iter().map(|(_, _, a)| a).collect()
            })
            .await)
    }
}
