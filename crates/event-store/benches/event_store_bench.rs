use chrono::DateTime;
use criterion::{Criterion, criterion_group, criterion_main};
use event_store::{
    EventStore, InMemoryEventStore, OrderId, SagaEvent, SagaStatus, TransactionId,
};

fn make_event(order: usize, millis: i64) -> SagaEvent {
    SagaEvent::new(
        format!("order-{order}"),
        format!("tx-{order}"),
        "PAYMENT_SERVICE",
        SagaStatus::Success,
    )
    .with_payload_raw(serde_json::json!({
        "totalItems": 3,
        "totalAmount": 45.0
    }))
    .with_created_at(DateTime::from_timestamp_millis(millis).unwrap())
}

fn seeded_store(rt: &tokio::runtime::Runtime, orders: usize, steps: usize) -> InMemoryEventStore {
    let store = InMemoryEventStore::new();
    rt.block_on(async {
        for order in 0..orders {
            for step in 0..steps {
                store
                    .append(make_event(order, (step * 1000 + order) as i64))
                    .await
                    .unwrap();
            }
        }
    });
    store
}

fn bench_append_single_event(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("event_store/append_single_event", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryEventStore::new();
                store.append(make_event(1, 100)).await.unwrap();
            });
        });
    });
}

fn bench_latest_by_order_id(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 200, 5);
    let order_id = OrderId::new("order-100");

    c.bench_function("event_store/latest_by_order_id_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.latest_by_order_id(&order_id).await.unwrap();
            });
        });
    });
}

fn bench_latest_by_transaction_id(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 200, 5);
    let transaction_id = TransactionId::new("tx-100");

    c.bench_function("event_store/latest_by_transaction_id_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store
                    .latest_by_transaction_id(&transaction_id)
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_list_all(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 200, 5);

    c.bench_function("event_store/list_all_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                store.list_all().await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_append_single_event,
    bench_latest_by_order_id,
    bench_latest_by_transaction_id,
    bench_list_all
);
criterion_main!(benches);
