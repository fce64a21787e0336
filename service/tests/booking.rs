mod support;

use common::operations::Insert;
use service::{
    command::{
        cancel_booking, create_flight_booking, create_hotel_booking,
        create_package_booking, CancelBooking, CreateFlightBooking,
        CreateHotelBooking, CreatePackageBooking,
    },
    domain::{
        availability::Resource,
        booking::{self, flight::PassengerCount, hotel::RoomsCount},
        flight, hotel, user, Booking, Flight,
    },
    infra::Database as _,
    query, Command as _,
};

use self::support::{capacity, in_days, usd, world, World};

fn flight_order(w: &World, passengers: u16) -> flight::Order {
    flight::Order {
        flight_id: w.flight.id,
        passenger_count: PassengerCount::new(passengers).unwrap(),
        travel_class: flight::TravelClass::Economy,
    }
}

fn hotel_order(w: &World, rooms: u16) -> hotel::Order {
    hotel::Order {
        hotel_id: w.hotel.id,
        check_in: in_days(30),
        check_out: in_days(33),
        rooms_count: RoomsCount::new(rooms).unwrap(),
        guests_count: booking::hotel::GuestsCount::new(2).unwrap(),
        special_requests: None,
    }
}

/// Replaces the seeded [`Flight`] with its amended copy.
async fn amend_flight(w: &World, amend: impl FnOnce(&mut Flight)) {
    let mut flight = w.flight.clone();
    amend(&mut flight);
    w.service.database().execute(Insert(flight)).await.unwrap();
}

async fn book_package(w: &World) -> booking::Package {
    w.service
        .execute(CreatePackageBooking {
            user_id: w.user_id,
            flight: flight_order(w, 2),
            hotel: hotel_order(w, 2),
            discount: booking::package::Discount::new(
                "10".parse().unwrap(),
            )
            .unwrap(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn books_flight() {
    let w = world(10, 5).await;

    let placed = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight_order(&w, 2),
        })
        .await
        .unwrap();

    assert_eq!(placed.status, booking::flight::Status::Pending);
    assert_eq!(placed.total_price, usd("300"));
    assert_eq!(placed.package_id, None);
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        8,
    );

    let found = w
        .service
        .execute(query::booking::ByReference::by(placed.reference.clone()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id(), placed.id);
}

#[tokio::test]
async fn refuses_flight_over_capacity() {
    let w = world(3, 5).await;

    let err = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight_order(&w, 5),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_flight_booking::ExecutionError::CapacityExceeded(_),
    ));
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        3,
    );
}

#[tokio::test]
async fn refuses_unbookable_flight() {
    let amendments: [fn(&mut Flight); 3] = [
        |f| f.status = flight::Status::Cancelled,
        |f| f.status = flight::Status::Departed,
        |f| f.date = in_days(-1),
    ];
    for amend in amendments {
        let w = world(10, 5).await;
        amend_flight(&w, amend).await;

        let err = w
            .service
            .execute(CreateFlightBooking {
                user_id: w.user_id,
                order: flight_order(&w, 2),
            })
            .await
            .unwrap_err();

        assert!(
            matches!(
                err.as_ref(),
                create_flight_booking::ExecutionError::FlightNotBookable(id)
                    if *id == w.flight.id,
            ),
            "unexpected error: {err}",
        );
        assert_eq!(
            capacity(&w.service, Resource::Flight(w.flight.id))
                .await
                .available(),
            10,
        );
    }
}

#[tokio::test]
async fn refuses_business_class_without_business_fare() {
    let w = world(10, 5).await;
    amend_flight(&w, |f| f.business_price = None).await;
    let mut order = flight_order(&w, 2);
    order.travel_class = flight::TravelClass::Business;

    let err = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_flight_booking::ExecutionError::UnavailableClass(
            flight::TravelClass::Business,
        ),
    ));
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        10,
    );
    assert!(w
        .service
        .execute(query::bookings::ByUser::by(w.user_id))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn refuses_hotel_with_past_check_in() {
    let w = world(3, 5).await;
    let mut order = hotel_order(&w, 1);
    order.check_in = in_days(-1);

    let err = w
        .service
        .execute(CreateHotelBooking {
            user_id: w.user_id,
            order,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_hotel_booking::ExecutionError::CheckInInPast(_),
    ));
}

#[tokio::test]
async fn refuses_hotel_with_inverted_dates() {
    let w = world(3, 5).await;
    let mut order = hotel_order(&w, 1);
    order.check_out = order.check_in;

    let err = w
        .service
        .execute(CreateHotelBooking {
            user_id: w.user_id,
            order,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_hotel_booking::ExecutionError::InvalidDateRange { .. },
    ));
}

#[tokio::test]
async fn prices_package_with_discount() {
    let w = world(10, 5).await;

    let package = book_package(&w).await;

    assert_eq!(package.flight.total_price, usd("300"));
    assert_eq!(package.hotel.total_price, usd("480"));
    assert_eq!(package.total_price, usd("702"));
    assert_eq!(package.flight.package_id, Some(package.id));
    assert_eq!(package.hotel.package_id, Some(package.id));

    let dashboard = w
        .service
        .execute(query::bookings::ByUser::by(w.user_id))
        .await
        .unwrap();
    assert_eq!(dashboard.len(), 1);
    assert!(matches!(&dashboard[0], Booking::Package(p) if p.id == package.id));
}

#[tokio::test]
async fn package_leaves_no_trace_when_hotel_is_full() {
    let w = world(10, 0).await;

    let err = w
        .service
        .execute(CreatePackageBooking {
            user_id: w.user_id,
            flight: flight_order(&w, 2),
            hotel: hotel_order(&w, 1),
            discount: booking::package::Discount::NONE,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        create_package_booking::ExecutionError::Hotel(
            create_hotel_booking::ExecutionError::CapacityExceeded(_),
        ),
    ));
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        10,
    );
    assert!(w
        .service
        .execute(query::bookings::ByUser::by(w.user_id))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn cancels_once() {
    let w = world(10, 5).await;
    let placed = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight_order(&w, 4),
        })
        .await
        .unwrap();
    let cancel = CancelBooking {
        booking_id: placed.id,
        initiator_id: w.user_id,
    };

    let cancelled = w.service.execute(cancel).await.unwrap();
    assert!(matches!(
        cancelled,
        Booking::Flight(b) if b.status == booking::flight::Status::Cancelled,
    ));
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        10,
    );

    let err = w.service.execute(cancel).await.unwrap_err();
    assert!(matches!(
        err.as_ref(),
        cancel_booking::ExecutionError::AlreadyCancelled(id)
            if *id == placed.id,
    ));
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        10,
    );
}

#[tokio::test]
async fn cancels_package_with_its_parts() {
    let w = world(10, 5).await;
    let package = book_package(&w).await;

    let err = w
        .service
        .execute(CancelBooking {
            booking_id: package.hotel.id,
            initiator_id: w.user_id,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        cancel_booking::ExecutionError::BookingInPackage { .. },
    ));

    let cancelled = w
        .service
        .execute(CancelBooking {
            booking_id: package.id,
            initiator_id: w.user_id,
        })
        .await
        .unwrap();
    let Booking::Package(cancelled) = cancelled else {
        panic!("expected a package");
    };
    assert_eq!(cancelled.status, booking::package::Status::Cancelled);
    assert_eq!(cancelled.flight.status, booking::flight::Status::Cancelled);
    assert_eq!(cancelled.hotel.status, booking::hotel::Status::Cancelled);
    assert_eq!(
        capacity(&w.service, Resource::Flight(w.flight.id))
            .await
            .available(),
        10,
    );
    assert_eq!(
        capacity(&w.service, Resource::Hotel(w.hotel.id))
            .await
            .available(),
        5,
    );
}

#[tokio::test]
async fn hides_foreign_booking() {
    let w = world(10, 5).await;
    let placed = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight_order(&w, 1),
        })
        .await
        .unwrap();

    let err = w
        .service
        .execute(CancelBooking {
            booking_id: placed.id,
            initiator_id: user::Id::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        cancel_booking::ExecutionError::BookingNotExists(_),
    ));
}
