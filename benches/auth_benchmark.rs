use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use rehabits::models::{NewUser, User};
use rehabits::services::habits::{apply, Mutation};
use rehabits::services::TokenService;
use serde_json::json;

fn benchmark_token_verify(c: &mut Criterion) {
    let service = TokenService::new(b"bench_signing_key_32_bytes_long!");
    let token = service.issue("5d0f6c1e-8f2b-4a41-9d2e-0c4f1e7a9b33").expect("issue token");

    let mut group = c.benchmark_group("tokens");

    group.bench_function("verify_valid", |b| {
        b.iter(|| service.verify(black_box(&token)))
    });

    group.bench_function("verify_garbage", |b| {
        b.iter(|| service.verify(black_box("not.a.token")))
    });

    group.finish();
}

fn benchmark_mutations(c: &mut Criterion) {
    // A user with a realistic amount of history
    let mut user = User::from_new(NewUser {
        email: "bench@example.com".to_string(),
        password_hash: "hash".to_string(),
        first_name: None,
        last_name: None,
    });
    for i in 0..50 {
        let mut payload = serde_json::Map::new();
        payload.insert("name".to_string(), json!(format!("habit {}", i)));
        apply(&mut user, Mutation::AddHabit(payload)).expect("add habit");
    }
    let last_id = user.habits.last().expect("habits").id.clone();

    let mut group = c.benchmark_group("mutations");

    group.bench_function("mark_done_last_of_50", |b| {
        b.iter_batched(
            || user.clone(),
            |mut u| {
                apply(
                    &mut u,
                    Mutation::MarkDone {
                        habit_id: last_id.clone(),
                        date: "2024-01-01".to_string(),
                    },
                )
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("delete_then_restore", |b| {
        b.iter_batched(
            || user.clone(),
            |mut u| {
                apply(&mut u, Mutation::SoftDelete(last_id.clone()))
                    .and_then(|_| apply(&mut u, Mutation::Restore(last_id.clone())))
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, benchmark_token_verify, benchmark_mutations);
criterion_main!(benches);
