use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pawfect_core::checklist::StepChange;
use pawfect_core::export::{export, EvaluationSnapshot};
use pawfect_core::heuristics::HeuristicChange;
use pawfect_core::model::{HeuristicId, Rating, Scenario, StepId, TestDraft};
use pawfect_core::session::EvaluationSession;

fn busy_session(tests: usize) -> EvaluationSession {
    let mut session = EvaluationSession::new();
    for id in HeuristicId::ALL {
        session.update_heuristic(id, HeuristicChange::Rating(Rating::Good));
        session.update_heuristic(id, HeuristicChange::Checked(true));
    }
    for id in StepId::ALL {
        session.update_step(id, StepChange::Completed(true));
    }
    for i in 0..tests {
        let scenario = Scenario::ALL[i % Scenario::ALL.len()];
        session
            .add_test_from(
                TestDraft::new(&format!("P{i}"), scenario, "42")
                    .with_clicks(3)
                    .with_notes("hesitated on the filter buttons"),
            )
            .unwrap();
    }
    session
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    for tests in [0usize, 10, 100] {
        let snapshot = busy_session(tests).snapshot();
        group.bench_function(format!("serialize_{tests}_tests"), |b| {
            b.iter(|| export(black_box(&snapshot)).unwrap())
        });
    }

    let json = busy_session(100).snapshot().to_json().unwrap();
    group.bench_function("parse_100_tests", |b| {
        b.iter(|| EvaluationSnapshot::from_json(black_box(&json)).unwrap())
    });

    group.finish();
}

fn bench_progress(c: &mut Criterion) {
    let session = busy_session(10);
    c.bench_function("progress_summary", |b| {
        b.iter(|| black_box(&session).progress())
    });
}

criterion_group!(benches, bench_export, bench_progress);
criterion_main!(benches);
