mod support;

use service::{
    command::{
        record_payment, CreateFlightBooking, CreatePackageBooking,
        RecordPayment,
    },
    domain::{
        booking::{self, flight::PassengerCount, hotel},
        flight, payment, Booking,
    },
    query, Command as _,
};

use self::support::{in_days, usd, world};

#[tokio::test]
async fn confirms_paid_flight() {
    let w = world(10, 5).await;
    let placed = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight::Order {
                flight_id: w.flight.id,
                passenger_count: PassengerCount::new(1).unwrap(),
                travel_class: flight::TravelClass::Business,
            },
        })
        .await
        .unwrap();
    let pay = RecordPayment {
        booking_id: placed.id,
        initiator_id: w.user_id,
        method: payment::Method::CreditCard,
        amount: usd("400"),
    };

    let paid = w.service.execute(pay).await.unwrap();
    assert_eq!(paid.status, payment::Status::Completed);
    assert_eq!(paid.target.booking_id(), placed.id);
    assert_eq!(paid.amount, usd("400"));

    let found = w
        .service
        .execute(query::booking::ById::by(placed.id))
        .await
        .unwrap();
    assert!(matches!(
        found,
        Some(Booking::Flight(b))
            if b.status == booking::flight::Status::Confirmed,
    ));

    let err = w.service.execute(pay).await.unwrap_err();
    assert!(matches!(
        err.as_ref(),
        record_payment::ExecutionError::InvalidBookingState(_),
    ));

    let history = w
        .service
        .execute(query::payments::ByBooking::by(placed.id))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn refuses_wrong_amount() {
    let w = world(10, 5).await;
    let placed = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order: flight::Order {
                flight_id: w.flight.id,
                passenger_count: PassengerCount::new(2).unwrap(),
                travel_class: flight::TravelClass::Economy,
            },
        })
        .await
        .unwrap();

    let err = w
        .service
        .execute(RecordPayment {
            booking_id: placed.id,
            initiator_id: w.user_id,
            method: payment::Method::Paypal,
            amount: usd("299.99"),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        record_payment::ExecutionError::AmountMismatch { expected, actual }
            if *expected == usd("300") && *actual == usd("299.99"),
    ));
    let found = w
        .service
        .execute(query::booking::ById::by(placed.id))
        .await
        .unwrap();
    assert!(matches!(found, Some(b) if b.is_pending()));
}

#[tokio::test]
async fn confirms_package_with_its_parts() {
    let w = world(10, 5).await;
    let package = w
        .service
        .execute(CreatePackageBooking {
            user_id: w.user_id,
            flight: flight::Order {
                flight_id: w.flight.id,
                passenger_count: PassengerCount::new(1).unwrap(),
                travel_class: flight::TravelClass::Economy,
            },
            hotel: w.hotel_order(in_days(30), in_days(32)),
            discount: booking::package::Discount::NONE,
        })
        .await
        .unwrap();
    assert_eq!(package.total_price, usd("310"));

    let err = w
        .service
        .execute(RecordPayment {
            booking_id: package.flight.id,
            initiator_id: w.user_id,
            method: payment::Method::DebitCard,
            amount: usd("150"),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err.as_ref(),
        record_payment::ExecutionError::BookingInPackage { .. },
    ));

    _ = w
        .service
        .execute(RecordPayment {
            booking_id: package.id,
            initiator_id: w.user_id,
            method: payment::Method::BankTransfer,
            amount: usd("310"),
        })
        .await
        .unwrap();

    let Some(Booking::Package(paid)) = w
        .service
        .execute(query::booking::ById::by(package.id))
        .await
        .unwrap()
    else {
        panic!("expected a package");
    };
    assert_eq!(paid.status, booking::package::Status::Confirmed);
    assert_eq!(paid.flight.status, booking::flight::Status::Confirmed);
    assert_eq!(paid.hotel.status, hotel::Status::Confirmed);
}
