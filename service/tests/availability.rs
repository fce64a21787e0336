mod support;

use futures::future;
use service::{
    command::{reserve_capacity, ReleaseCapacity, ReserveCapacity},
    domain::{
        availability::{Quantity, Resource},
        flight, hotel,
    },
    infra::Database as _,
    query::availability::Check,
};

use self::support::{capacity, usd, world};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reservations_never_oversell() {
    let w = world(5, 1).await;
    let seats = Resource::Flight(w.flight.id);

    let results = future::join_all((0..20).map(|_| {
        w.service.execute(ReserveCapacity {
            resource: seats,
            quantity: Quantity::new(1).unwrap(),
        })
    }))
    .await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 5);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(matches!(
            err.as_ref(),
            reserve_capacity::ExecutionError::InsufficientCapacity {
                available: 0,
                ..
            },
        ));
    }
    assert_eq!(capacity(&w.service, seats).await.available(), 0);
}

#[tokio::test]
async fn release_restores_reserved_units() {
    let w = world(10, 4).await;
    let rooms = Resource::Hotel(w.hotel.id);
    let three = Quantity::new(3).unwrap();

    let reserved = w
        .service
        .execute(ReserveCapacity {
            resource: rooms,
            quantity: three,
        })
        .await
        .unwrap();
    assert_eq!(reserved.available(), 1);

    let released = w
        .service
        .execute(ReleaseCapacity {
            resource: rooms,
            quantity: three,
        })
        .await
        .unwrap();
    assert_eq!(released.available(), 4);
    assert_eq!(released.total(), 4);
}

#[tokio::test]
async fn release_clamps_at_total() {
    let w = world(10, 4).await;
    let seats = Resource::Flight(w.flight.id);

    let released = w
        .service
        .execute(ReleaseCapacity {
            resource: seats,
            quantity: Quantity::new(7).unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(released.available(), 10);
    assert_eq!(capacity(&w.service, seats).await.available(), 10);
}

#[tokio::test]
async fn reserving_unknown_resource_fails() {
    let w = world(10, 4).await;
    let unknown = Resource::Hotel(hotel::Id::new());

    let err = w
        .service
        .execute(ReserveCapacity {
            resource: unknown,
            quantity: Quantity::new(1).unwrap(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        reserve_capacity::ExecutionError::ResourceNotExists(r) if *r == unknown,
    ));
}

#[tokio::test]
async fn checks_availability() {
    let w = world(3, 4).await;

    let snapshot = w
        .service
        .execute(Check {
            resource: Resource::Flight(w.flight.id),
            quantity: Quantity::new(5).unwrap(),
        })
        .await
        .unwrap()
        .unwrap();
    assert!(!snapshot.available);
    assert_eq!(snapshot.remaining, 3);
    assert_eq!(snapshot.unit_price, usd("150"));

    let snapshot = w
        .service
        .execute(Check {
            resource: Resource::Hotel(w.hotel.id),
            quantity: Quantity::new(2).unwrap(),
        })
        .await
        .unwrap()
        .unwrap();
    assert!(snapshot.available);
    assert_eq!(snapshot.unit_price, usd("80"));

    let missing = w
        .service
        .execute(Check {
            resource: Resource::Flight(flight::Id::new()),
            quantity: Quantity::new(1).unwrap(),
        })
        .await
        .unwrap();
    assert!(missing.is_none());
}
