// Benchmark for recurrence calculations
// Measures advance loops materializing runs of upcoming occurrences

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use calendar_recurrence::models::repeating::{
    DayOfWeek, MonthlySelection, RepeatingOption, WeekOrdinal,
};
use calendar_recurrence::models::time::{EventTime, TimeStamp};
use calendar_recurrence::services::recurrence::OccurrenceEnumerator;

fn materialize(enumerator: &OccurrenceEnumerator, from: EventTime, count: usize) -> Vec<EventTime> {
    let mut occurrences = Vec::with_capacity(count);
    let mut current = from;

    for _ in 0..count {
        match enumerator.advance(&current, None) {
            Some(next) => {
                occurrences.push(next);
                current = next;
            }
            None => break,
        }
    }

    occurrences
}

// 2023-04-11 07:00 KST
fn start() -> EventTime {
    EventTime::at(TimeStamp::new(1_681_164_000, chrono_tz::Asia::Seoul))
}

fn weekly_enumerator() -> OccurrenceEnumerator {
    OccurrenceEnumerator::new(RepeatingOption::EveryWeek {
        zone: chrono_tz::Asia::Seoul,
        interval: 2,
        weekdays: [DayOfWeek::Tuesday, DayOfWeek::Friday].into_iter().collect(),
    })
    .unwrap()
}

fn monthly_enumerator() -> OccurrenceEnumerator {
    OccurrenceEnumerator::new(RepeatingOption::EveryMonth {
        zone: chrono_tz::Asia::Seoul,
        interval: 1,
        selection: MonthlySelection::ByWeek {
            ordinals: [WeekOrdinal::Second, WeekOrdinal::Last].into_iter().collect(),
            weekdays: [DayOfWeek::Tuesday, DayOfWeek::Thursday].into_iter().collect(),
        },
    })
    .unwrap()
}

fn bench_weekly_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_occurrences");
    let enumerator = weekly_enumerator();

    for count in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| materialize(black_box(&enumerator), black_box(start()), count));
        });
    }

    group.finish();
}

fn bench_monthly_by_week_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("monthly_by_week_occurrences");
    let enumerator = monthly_enumerator();

    for count in [10, 100, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| materialize(black_box(&enumerator), black_box(start()), count));
        });
    }

    group.finish();
}

fn bench_lunar_occurrences(c: &mut Criterion) {
    let mut group = c.benchmark_group("lunar_occurrences");
    let enumerator = OccurrenceEnumerator::new(RepeatingOption::LunarEveryYear {
        zone: chrono_tz::Asia::Seoul,
        month: 8,
        day: 15,
    })
    .unwrap();

    group.bench_function("lunar_10", |b| {
        b.iter(|| materialize(black_box(&enumerator), black_box(start()), 10));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_weekly_occurrences,
    bench_monthly_by_week_occurrences,
    bench_lunar_occurrences
);
criterion_main!(benches);
