// tests/orchestrator_fake_executor.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use nanny::engine::{CommandOutcome, CommandRecord, CycleResult, Orchestrator};
use nanny::exec::ExecutorBackend;
use nanny::fs::mock::MockFileSystem;
use nanny::shutdown::{Shutdown, ShutdownReason, spawn_input_watchdog};
use nanny::types::CommandSpec;
use nanny::watch::{ChangeDetector, Poller};
use nanny_test_utils::{FakeExecutor, ScriptedClock, init_tracing, with_timeout};

fn script() -> CommandSpec {
    CommandSpec::Script("echo modified >> out_file".to_string())
}

fn poller(root: &str, fs: &MockFileSystem, clock: &Arc<ScriptedClock>) -> Poller {
    let detector = ChangeDetector::with_fs(root, Arc::new(fs.clone()));
    Poller::with_clock(detector, Duration::from_secs(1), clock.clone())
}

fn cancel_at(clock: &ScriptedClock, tick: u64, token: &CancellationToken) {
    let token = token.clone();
    clock.at(tick, move || token.cancel());
}

fn touch_at(clock: &ScriptedClock, tick: u64, fs: &MockFileSystem, path: &'static str, secs: u64) {
    let fs = fs.clone();
    clock.at(tick, move || fs.touch_at(path, secs));
}

/// Run the orchestrator on `root` and return how many times commands ran.
async fn run_scenario(
    root: &str,
    fs: &MockFileSystem,
    clock: &Arc<ScriptedClock>,
    token: CancellationToken,
) -> (u64, Vec<CommandSpec>) {
    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(Arc::clone(&executed));
    let orchestrator = Orchestrator::new(poller(root, fs, clock), script(), executor, token);

    let cycles = with_timeout(orchestrator.run()).await;
    let executed = executed.lock().unwrap().clone();
    (cycles, executed)
}

#[tokio::test]
async fn unmodified_target_never_runs_commands() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    cancel_at(&clock, 5, &token);

    let (cycles, executed) = run_scenario("proj/watched_file", &fs, &clock, token).await;

    assert_eq!(cycles, 0);
    assert!(executed.is_empty());
    assert_eq!(clock.ticks(), 5);
}

#[tokio::test]
async fn one_modification_runs_commands_once() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    touch_at(&clock, 3, &fs, "proj/watched_file", 2);
    cancel_at(&clock, 8, &token);

    let (cycles, executed) = run_scenario("proj/watched_file", &fs, &clock, token).await;

    assert_eq!(cycles, 1);
    assert_eq!(executed, vec![script()]);
}

#[tokio::test]
async fn each_separate_modification_runs_commands_again() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    touch_at(&clock, 2, &fs, "proj/watched_file", 2);
    touch_at(&clock, 4, &fs, "proj/watched_file", 3);
    touch_at(&clock, 6, &fs, "proj/watched_file", 4);
    cancel_at(&clock, 10, &token);

    let (cycles, executed) = run_scenario("proj/watched_file", &fs, &clock, token).await;

    assert_eq!(cycles, 3);
    assert_eq!(executed.len(), 3);
}

#[tokio::test]
async fn watching_a_directory_matches_watching_the_file() {
    init_tracing();

    let mut results = Vec::new();
    for root in ["proj", "proj/watched_file"] {
        let fs = MockFileSystem::new();
        fs.touch_at("proj/watched_file", 1);
        fs.touch_at("proj/other_file", 1);
        let clock = Arc::new(ScriptedClock::new());
        let token = CancellationToken::new();
        touch_at(&clock, 2, &fs, "proj/watched_file", 5);
        touch_at(&clock, 5, &fs, "proj/watched_file", 6);
        cancel_at(&clock, 9, &token);

        let (cycles, _) = run_scenario(root, &fs, &clock, token).await;
        results.push(cycles);
    }

    assert_eq!(results, vec![2, 2]);
}

#[tokio::test]
async fn deeply_nested_modification_is_detected() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/a/b/c/d/e/leaf.txt", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    touch_at(&clock, 2, &fs, "proj/a/b/c/d/e/leaf.txt", 9);
    cancel_at(&clock, 5, &token);

    let (cycles, _) = run_scenario("proj", &fs, &clock, token).await;

    assert_eq!(cycles, 1);
}

#[tokio::test]
async fn changes_made_while_running_are_absorbed_by_the_next_snapshot() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/src.txt", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    touch_at(&clock, 2, &fs, "proj/src.txt", 2);
    cancel_at(&clock, 8, &token);

    // The "command" writes into the watched directory.
    let executed = Arc::new(Mutex::new(Vec::new()));
    let writer = fs.clone();
    let executor = FakeExecutor::new(Arc::clone(&executed))
        .on_run(move || writer.touch_at("proj/build-output", 3));
    let orchestrator = Orchestrator::new(poller("proj", &fs, &clock), script(), executor, token);

    let cycles = with_timeout(orchestrator.run()).await;

    assert_eq!(cycles, 1);
}

#[tokio::test]
async fn failing_commands_do_not_stop_the_loop() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let clock = Arc::new(ScriptedClock::new());
    let token = CancellationToken::new();
    touch_at(&clock, 2, &fs, "proj/watched_file", 2);
    touch_at(&clock, 4, &fs, "proj/watched_file", 3);
    cancel_at(&clock, 7, &token);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(Arc::clone(&executed)).failing(2);
    let orchestrator = Orchestrator::new(poller("proj", &fs, &clock), script(), executor, token);

    let cycles = with_timeout(orchestrator.run()).await;

    assert_eq!(cycles, 2);
    assert_eq!(executed.lock().unwrap().len(), 2);
}

/// Executor that blocks until shutdown, like a hanging command.
struct HangingExecutor {
    started: Arc<Notify>,
}

impl ExecutorBackend for HangingExecutor {
    fn run<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
        shutdown: &'a CancellationToken,
    ) -> Pin<Box<dyn Future<Output = CycleResult> + Send + 'a>> {
        Box::pin(async move {
            self.started.notify_one();
            shutdown.cancelled().await;
            let record = CommandRecord::new(spec.to_string(), CommandOutcome::Cancelled);
            std::iter::once(record).collect()
        })
    }
}

#[tokio::test]
async fn shutdown_while_running_stops_the_loop() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let clock = Arc::new(ScriptedClock::new());
    touch_at(&clock, 1, &fs, "proj/watched_file", 2);

    let shutdown = Shutdown::new();
    let started = Arc::new(Notify::new());
    let executor = HangingExecutor {
        started: Arc::clone(&started),
    };
    let orchestrator =
        Orchestrator::new(poller("proj", &fs, &clock), script(), executor, shutdown.token());
    let handle = tokio::spawn(orchestrator.run());

    with_timeout(started.notified()).await;
    shutdown.trigger(ShutdownReason::Interrupted);

    let cycles = with_timeout(handle).await.unwrap();
    assert_eq!(cycles, 0);
}

#[tokio::test]
async fn closed_input_stops_a_watching_loop() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.touch_at("proj/watched_file", 1);
    let detector = ChangeDetector::with_fs("proj", Arc::new(fs.clone()));
    // Real clock: the loop is genuinely parked in a sleep when EOF arrives.
    let poller = Poller::new(detector, Duration::from_millis(20));

    let shutdown = Shutdown::new();
    let executed = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = Orchestrator::new(
        poller,
        script(),
        FakeExecutor::new(Arc::clone(&executed)),
        shutdown.token(),
    );
    let handle = tokio::spawn(orchestrator.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    let (writer, reader) = tokio::io::duplex(8);
    let watchdog = spawn_input_watchdog(reader, shutdown.clone());
    drop(writer);

    with_timeout(watchdog).await.unwrap();
    let cycles = with_timeout(handle).await.unwrap();
    assert_eq!(cycles, 0);
    assert_eq!(shutdown.reason(), Some(ShutdownReason::InputClosed));
}
