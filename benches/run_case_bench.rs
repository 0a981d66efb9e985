use criterion::{Criterion, criterion_group, criterion_main};
use fabric_runner::core::config::{MatchMode, TestCase};
use fabric_runner::core::engine::{RunOptions, run_cases};
use fabric_runner::infra::logfile::RunLog;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

fn bench_run_single_case(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let case = TestCase {
        name: "bench_case".to_string(),
        command: "echo bench".to_string(),
        expected: "bench".to_string(),
        match_mode: MatchMode::Exact,
        hw_specific: false,
        needs_server: false,
        server_command: None,
        skip_message: None,
    };
    let opts = RunOptions {
        fail_fast: false,
        host_name: "bench-host".to_string(),
    };
    let log_dir = tempfile::tempdir().unwrap();

    c.bench_function("run_single_case", |b| {
        b.to_async(&rt).iter(|| async {
            let log = RunLog::create_in(log_dir.path()).unwrap();
            let stop = CancellationToken::new();
            let _ = run_cases(std::slice::from_ref(&case), &opts, log, &stop).await;
        });
    });
}

criterion_group!(benches, bench_run_single_case);
criterion_main!(benches);
