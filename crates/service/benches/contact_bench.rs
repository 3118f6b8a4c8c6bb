use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::contact::domain::ContactInput;
use service::contact::service::ContactService;
use service::qr::QrService;
use service::storage::{InMemoryContactRepository, MokaContactRepository};
use service::contact::repository::ExpiryPolicy;

fn input() -> ContactInput {
    ContactInput { name: "Bench".into(), phone: "123".into(), email: "bench@example.com".into(), ..Default::default() }
}

fn bench_contacts(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let memory = ContactService::new(Arc::new(InMemoryContactRepository::default()));
    c.bench_function("memory_create_delete", |b| {
        b.iter(|| {
            let created = rt.block_on(memory.create(input())).unwrap();
            rt.block_on(memory.delete(created.id)).unwrap();
        });
    });

    let moka = ContactService::new(Arc::new(MokaContactRepository::new(ExpiryPolicy::default())));
    for _ in 0..10 {
        rt.block_on(moka.create(input())).unwrap();
    }
    c.bench_function("moka_list_full", |b| {
        b.iter(|| rt.block_on(moka.list()).unwrap());
    });
    c.bench_function("moka_export_vcard", |b| {
        b.iter(|| rt.block_on(moka.export_vcard(5)).unwrap());
    });
}

fn bench_qr(c: &mut Criterion) {
    let svc = QrService::default();
    c.bench_function("qr_generate_svg", |b| {
        b.iter(|| svc.generate("https://example.com/contacts/1").unwrap());
    });
}

criterion_group!(benches, bench_contacts, bench_qr);
criterion_main!(benches);
