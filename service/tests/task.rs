mod support;

use common::operations::{Insert, Perform};
use service::{
    command::{CreateFlightBooking, CreateHotelBooking, RecordPayment},
    domain::{
        booking::{self, flight::PassengerCount},
        flight, payment, Booking,
    },
    infra::Database as _,
    query,
    task::{self, CompletePastBookings},
    Task as _,
};

use self::support::{in_days, usd, world, World};

async fn booking_of(w: &World, id: booking::Id) -> Booking {
    w.service
        .execute(query::booking::ById::by(id))
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn completes_only_paid_past_bookings() {
    let w = world(10, 5).await;
    let order = flight::Order {
        flight_id: w.flight.id,
        passenger_count: PassengerCount::new(1).unwrap(),
        travel_class: flight::TravelClass::Economy,
    };
    let paid = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order,
        })
        .await
        .unwrap();
    let unpaid = w
        .service
        .execute(CreateFlightBooking {
            user_id: w.user_id,
            order,
        })
        .await
        .unwrap();
    let stay = w
        .service
        .execute(CreateHotelBooking {
            user_id: w.user_id,
            order: w.hotel_order(in_days(30), in_days(31)),
        })
        .await
        .unwrap();
    for (booking_id, amount) in [(paid.id, "150"), (stay.id, "80")] {
        _ = w
            .service
            .execute(RecordPayment {
                booking_id,
                initiator_id: w.user_id,
                method: payment::Method::CreditCard,
                amount: usd(amount),
            })
            .await
            .unwrap();
    }

    let mut departed = w
        .service
        .execute(query::flight::ById::by(w.flight.id))
        .await
        .unwrap()
        .unwrap();
    departed.date = in_days(-1);
    w.service.database().execute(Insert(departed)).await.unwrap();

    let task = CompletePastBookings::new(
        task::complete_past_bookings::Config {
            interval: std::time::Duration::from_secs(60),
        },
        w.service.clone(),
    );
    let count = task.execute(Perform(())).await.unwrap();
    assert_eq!(u64::from(count), 1);

    assert!(matches!(
        booking_of(&w, paid.id).await,
        Booking::Flight(b) if b.status == booking::flight::Status::Completed,
    ));
    assert!(matches!(
        booking_of(&w, unpaid.id).await,
        Booking::Flight(b) if b.status == booking::flight::Status::Pending,
    ));
    assert!(matches!(
        booking_of(&w, stay.id).await,
        Booking::Hotel(b) if b.status == booking::hotel::Status::Confirmed,
    ));

    let count = task.execute(Perform(())).await.unwrap();
    assert_eq!(u64::from(count), 0);
}
