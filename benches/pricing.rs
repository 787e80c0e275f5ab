use std::num::NonZeroU32;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use insure_quote::engine::{calculate_final_cost, calculate_premium};
use insure_quote::{Amount, Coverage, Payment, RateConfiguration};

fn rates() -> RateConfiguration {
    RateConfiguration {
        basic_premium: Amount::from_whole(869),
        discount: Amount::from_scaled(2_500),
        extra_liability: Amount::from_whole(130),
        glass_coverage: Amount::from_whole(86),
        loaner_car: Amount::from_whole(58),
        hst: Amount::from_scaled(1_500),
        processing_fee: Amount::from_scaled(399_900),
        next_policy_number: 1944,
        other_rows: Vec::new(),
    }
}

/// Generates customer selections cycling through car counts, coverage
/// combinations and payment methods.
pub struct SelectionGenerator {
    remaining: u32,
    step: u32,
}

impl SelectionGenerator {
    pub fn new(count: u32) -> Self {
        Self {
            remaining: count,
            step: 0,
        }
    }
}

impl Iterator for SelectionGenerator {
    type Item = (NonZeroU32, Coverage, Payment);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let step = self.step;
        self.step += 1;

        let num_cars = NonZeroU32::MIN.saturating_add(step % 5);
        let coverage = Coverage {
            liability: step & 1 != 0,
            glass: step & 2 != 0,
            loaner: step & 4 != 0,
        };
        let payment = match step % 3 {
            0 => Payment::Full,
            1 => Payment::Monthly,
            _ => Payment::DownPay {
                down_payment: Amount::from_whole(250),
            },
        };
        Some((num_cars, coverage, payment))
    }
}

fn bench_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");
    let rates = rates();

    for count in [1_000u32, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                for (num_cars, coverage, payment) in SelectionGenerator::new(count) {
                    let premium = calculate_premium(num_cars, coverage, &rates);
                    black_box(calculate_final_cost(
                        premium.total_premium,
                        rates.hst,
                        payment,
                        &rates,
                    ));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_quote);
criterion_main!(benches);
