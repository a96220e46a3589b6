use std::sync::Arc;
use std::thread;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use loyalty_ledger::catalog::{Reward, RewardCatalog, RewardKind};
use loyalty_ledger::{CustomerId, Ledger, LedgerEvent, Money};

/// Generates valid event sequences for benchmarking.
///
/// Pattern per customer (repeating):
/// 1. Earn 100
/// 2. Earn 50
/// 3. Redeem the 100-point reward
///
/// This ensures redemptions never exceed the spendable balance.
pub struct EventGenerator {
    num_customers: CustomerId,
    events_per_customer: u32,
    current_customer: CustomerId,
    current_step: u32,
}

impl EventGenerator {
    pub fn new(num_customers: CustomerId, events_per_customer: u32) -> Self {
        Self {
            num_customers,
            events_per_customer,
            current_customer: 1,
            current_step: 0,
        }
    }
}

impl Iterator for EventGenerator {
    type Item = LedgerEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_customer > self.num_customers {
            return None;
        }

        // Pattern: earn 100, earn 50, redeem 100 (repeating)
        let event = match self.current_step % 3 {
            0 => LedgerEvent::Earn {
                customer: self.current_customer,
                points: 100,
                description: "order credit".to_string(),
                order: None,
            },
            1 => LedgerEvent::Earn {
                customer: self.current_customer,
                points: 50,
                description: "order credit".to_string(),
                order: None,
            },
            _ => LedgerEvent::Redeem {
                customer: self.current_customer,
                reward: "bench".to_string(),
            },
        };

        self.current_step += 1;

        // Move to next customer after events_per_customer events
        if self.current_step >= self.events_per_customer {
            self.current_step = 0;
            self.current_customer += 1;
        }

        Some(event)
    }
}

fn bench_catalog() -> RewardCatalog {
    RewardCatalog::new(vec![Reward {
        id: "bench".to_string(),
        name: "bench reward".to_string(),
        description: String::new(),
        cost: 100,
        kind: RewardKind::Discount,
        value: Money::from_float(1.0),
        available: true,
    }])
}

fn bench_earn_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("earns");

    for count in [10_000u32, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let ledger = Ledger::new(bench_catalog());
                for i in 0..count {
                    let _ = black_box(ledger.earn(1, 50, "order credit", Some(i as u64)));
                }
                ledger
            });
        });
    }

    group.finish();
}

fn bench_mixed_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");

    for (customers, events_per) in [(100, 1_000), (1_000, 100)] {
        let label = format!("{}c_{}ev", customers, events_per);
        group.bench_with_input(
            BenchmarkId::from_parameter(&label),
            &(customers, events_per),
            |b, &(customers, events_per)| {
                b.iter(|| {
                    let ledger = Ledger::new(bench_catalog());
                    let generator = EventGenerator::new(customers, events_per);
                    for event in generator {
                        let _ = black_box(ledger.apply(event));
                    }
                    ledger
                });
            },
        );
    }

    group.finish();
}

fn bench_contended_redeems(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_redeems");
    group.sample_size(10);

    // 4 threads hammering one customer's balance
    group.bench_function("4t_10k", |b| {
        b.iter(|| {
            let ledger = Arc::new(Ledger::new(bench_catalog()));
            ledger.earn(1, 1_000_000, "seed", None).unwrap();

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let ledger = Arc::clone(&ledger);
                    thread::spawn(move || {
                        for _ in 0..2_500 {
                            let _ = black_box(ledger.redeem(1, "bench"));
                        }
                    })
                })
                .collect();
            for h in handles {
                h.join().unwrap();
            }
            ledger
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_earn_only,
    bench_mixed_events,
    bench_contended_redeems,
);

criterion_main!(benches);
