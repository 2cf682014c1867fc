use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hostelgate_access::Action;
use hostelgate_core::RollNo;
use hostelgate_infra::{AccessLedger, InMemoryLedgerStore, ManualClock};
use hostelgate_roster::PersonRecord;

fn resident(n: usize) -> PersonRecord {
    PersonRecord::new(
        RollNo::new(format!("R{n:05}")).unwrap(),
        "ERP",
        "Resident",
        "A101",
        "9876543210",
    )
}

/// Full exit/entry cycles against a day that already holds `residents`
/// completed rows, to show the cost of the whole-day rewrite growing with the
/// day's size.
fn bench_record_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_action_cycle");
    group.throughput(Throughput::Elements(2));

    for residents in [10usize, 100, 1_000] {
        let start = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let ledger = AccessLedger::with_clock(
            Arc::new(InMemoryLedgerStore::new()),
            ManualClock::new(start),
        );
        let people: Vec<_> = (0..residents).map(resident).collect();
        for p in &people {
            ledger.record_action(p, Action::Exit).unwrap();
            ledger.record_action(p, Action::Entry).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(residents), &people, |b, people| {
            let mut i = 0usize;
            b.iter(|| {
                let p = &people[i % people.len()];
                i += 1;
                black_box(ledger.record_action(p, Action::Exit).unwrap());
                black_box(ledger.record_action(p, Action::Entry).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_cycle);
criterion_main!(benches);
