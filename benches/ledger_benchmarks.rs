//! Performance benchmarks for the HR ledger engine.
//!
//! Covers the two batch operations:
//! - Payroll generation across a growing active roster
//! - Attendance report aggregation over a month of records
//! - The HTTP round trip for a payroll summary
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use hr_ledger::api::{AppState, create_router};
use hr_ledger::calculation::{DEFAULT_LATE_AFTER_HOUR, summarize_attendance};
use hr_ledger::config::{AttendanceSettings, EngineConfig, PayrollSettings};
use hr_ledger::models::{AttendanceRecord, Employee, EmploymentStatus};
use hr_ledger::services::{AttendanceTracker, PayrollCalculator, PlainTextSlipRenderer};
use hr_ledger::store::MemoryStore;

fn roster(size: u64) -> Vec<Employee> {
    (1..=size)
        .map(|id| Employee {
            id,
            employee_code: format!("EMP{:05}", id),
            first_name: "Bench".to_string(),
            last_name: format!("Employee{}", id),
            position: String::new(),
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            salary: Decimal::new(450_000 + id as i64 * 125, 2),
            status: if id % 10 == 0 {
                EmploymentStatus::Inactive
            } else {
                EmploymentStatus::Active
            },
        })
        .collect()
}

/// Builds a month of clocked records for `employees` employees.
fn month_of_records(employees: u64) -> Vec<AttendanceRecord> {
    let store = Arc::new(MemoryStore::with_employees(roster(employees)));
    let tracker = AttendanceTracker::new(store.clone(), store, AttendanceSettings::default());
    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    for offset in 0..22 {
        let date = first + Duration::days(offset);
        for employee_id in 1..=employees {
            let start = date.and_hms_opt(7 + (employee_id % 3) as u32, 30, 0).unwrap();
            let end = start + Duration::minutes(480 + (employee_id as i64 * 17) % 180);
            tracker.clock_in(employee_id, date, start).unwrap();
            tracker.clock_out(employee_id, date, end).unwrap();
        }
    }

    tracker
        .get_report(first, first + Duration::days(30))
        .unwrap()
}

fn bench_payroll_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_generation");

    for size in [10u64, 100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let store = Arc::new(MemoryStore::with_employees(roster(size)));
                    PayrollCalculator::new(
                        store.clone(),
                        store,
                        Arc::new(PlainTextSlipRenderer),
                        PayrollSettings::default(),
                    )
                },
                |calculator| black_box(calculator.generate(3, 2026).unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_attendance_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("attendance_report");

    for employees in [10u64, 100] {
        let records = month_of_records(employees);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(employees),
            &records,
            |b, records| {
                b.iter(|| black_box(summarize_attendance(records, DEFAULT_LATE_AFTER_HOUR)))
            },
        );
    }

    group.finish();
}

fn bench_http_summary(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::with_employees(roster(500)));
    let state = AppState::new(&EngineConfig::default(), store);
    state.payroll().generate(3, 2026).unwrap();
    let router = create_router(state);

    c.bench_function("http_payroll_summary", |b| {
        b.to_async(&runtime).iter(|| async {
            let response = router
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/payroll/summary?month=3&year=2026")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_payroll_generation,
    bench_attendance_report,
    bench_http_summary,
);
criterion_main!(benches);
