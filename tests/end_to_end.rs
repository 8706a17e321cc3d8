//! End-to-end searches through the public API.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use u_hypertune::partition::{generate_partitions, AlgorithmSpec, ParameterCatalog, Partition};
use u_hypertune::schedule::{jobs_for, PartitionScheduler, ProgressEvent};
use u_hypertune::search::{
    Configuration, Objective, ParamSet, ResultMode, SearchConfig, StrategyKind,
};
use u_hypertune::space::{SearchSpace, SpaceGenerator};
use u_hypertune::tuner::{HyperTuner, SearchRequest};
use u_hypertune::SearchError;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

fn objectives() -> Vec<Objective> {
    vec![
        Objective::maximize("silhouette"),
        Objective::minimize("davies_bouldin"),
        Objective::maximize("calinski_harabasz"),
    ]
}

fn numeric_sum(config: &ParamSet) -> f64 {
    config.iter().filter_map(|(_, v)| v.as_f64()).sum()
}

fn smooth(config: &ParamSet) -> Result<Vec<f64>, String> {
    let s = numeric_sum(config);
    Ok(vec![s, (s - 3.0).abs(), -s * s])
}

fn set_of(partition: &Partition) -> Vec<&str> {
    let mut names: Vec<&str> = partition.names().iter().map(String::as_str).collect();
    names.sort_unstable();
    names
}

// ---- Scenario 1: one prime parameter, no bench ----

#[test]
fn single_prime_family_runs_one_random_search() {
    init_tracing();
    let spec = AlgorithmSpec::new("solo", ["n_clusters"], Vec::<String>::new());
    let partitions = generate_partitions(&spec);
    assert_eq!(partitions.len(), 1);
    assert_eq!(set_of(&partitions[0]), vec!["n_clusters"]);
    assert_eq!(StrategyKind::for_partition(&partitions[0]), StrategyKind::RandomSearch);

    let generator = SpaceGenerator::new()
        .with_space("solo", SearchSpace::new().add_int("n_clusters", 2, 30));
    let config = SearchConfig::default()
        .with_population_size(6)
        .with_parallel(false)
        .with_seed(1);
    let objectives = objectives();
    let evaluator = smooth;
    let progress = |_: &ProgressEvent| {};
    let scheduler = PartitionScheduler::new(&generator, &evaluator, &progress, &objectives, config);

    let jobs = jobs_for("solo", partitions, Instant::now() + Duration::from_millis(50));
    let store = scheduler.run(jobs);

    assert_eq!(store.len(), 1);
    let (_, population) = store.iter().next().expect("one partition");
    assert!(!population.is_empty());
    assert!(population.len() <= 6);
    assert!(population.iter().all(|ind| ind.fitness().is_some()));
}

// ---- Scenario 2: prime {a, b}, bench {c} ----

#[test]
fn prime_and_single_bench_partitions() {
    let spec = AlgorithmSpec::new("x", ["a", "b"], ["c"]);
    let owned = generate_partitions(&spec);
    let sets: Vec<Vec<&str>> = owned.iter().map(set_of).collect();
    assert_eq!(
        sets,
        vec![vec!["a"], vec!["a", "c"], vec!["b"], vec!["b", "c"]]
    );
}

#[test]
fn prime_and_single_bench_full_search() {
    init_tracing();
    let catalog = ParameterCatalog::new().with(AlgorithmSpec::new("x", ["a", "b"], ["c"]));
    let generator = SpaceGenerator::new().with_space(
        "x",
        SearchSpace::new()
            .add_float("a", 0.0, 2.0)
            .add_float("b", 0.0, 2.0)
            .add_int("c", 0, 3),
    );
    let tuner = HyperTuner::new(catalog, generator, smooth)
        .with_config(SearchConfig::default().with_parallel(false).with_seed(5));

    let request = SearchRequest::new("x", objectives()).with_time_budget_secs(0.05);
    let result = tuner.search(&request, &|_: &ProgressEvent| {}).expect("search");

    assert_eq!(result.partitions, 4);
    assert_eq!(result.individuals.len(), 10);
    for ind in &result.individuals {
        let fields = ind.config().field_names();
        assert!(!fields.is_empty() && fields.len() <= 2);
        assert_eq!(ind.fitness().map(|f| f.len()), Some(3));
    }
}

// ---- Scenario 3: evaluator that always fails ----

#[test]
fn always_failing_evaluator_yields_zero_fitness() {
    init_tracing();
    let failing = |_: &ParamSet| -> Result<Vec<f64>, String> { Err("fit failed".into()) };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        failing,
    )
    .with_config(SearchConfig::default().with_parallel(false));

    let request = SearchRequest::new("kmeans", objectives()).with_time_budget_secs(0.03);
    let result = tuner.search(&request, &|_: &ProgressEvent| {}).expect("failures are absorbed");

    assert!(!result.individuals.is_empty());
    for ind in &result.individuals {
        assert_eq!(ind.fitness(), Some(&[0.0, 0.0, 0.0][..]));
    }
}

#[test]
fn panicking_evaluator_is_absorbed_too() {
    init_tracing();
    let panicking = |config: &ParamSet| -> Result<Vec<f64>, String> {
        if numeric_sum(config) > 1.0 {
            panic!("diverged");
        }
        smooth(config)
    };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        panicking,
    )
    .with_config(SearchConfig::default().with_parallel(false));

    let request = SearchRequest::new("ap", objectives())
        .with_time_budget_secs(0.03)
        .with_result_mode(ResultMode::Single);
    let result = tuner.search(&request, &|_: &ProgressEvent| {}).expect("panics are absorbed");
    assert_eq!(result.individuals.len(), 1);
}

#[test]
fn nan_scores_never_win() {
    init_tracing();
    let undefined_above_one = |config: &ParamSet| -> Result<Vec<f64>, String> {
        let eps = config.get("eps").and_then(|v| v.as_f64()).unwrap_or(0.5);
        if eps > 1.0 {
            Ok(vec![f64::NAN; 3])
        } else {
            Ok(vec![eps; 3])
        }
    };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        undefined_above_one,
    )
    .with_config(SearchConfig::default().with_parallel(false).with_seed(1));
    let request = SearchRequest::new(
        "db",
        vec![
            Objective::maximize("a"),
            Objective::maximize("b"),
            Objective::maximize("c"),
        ],
    )
    .with_time_budget_secs(0.05);

    let result = tuner.search(&request, &|_: &ProgressEvent| {}).expect("search");

    assert_eq!(result.individuals.len(), 10);
    for ind in &result.individuals {
        let fitness = ind.fitness().expect("evaluated");
        assert!(fitness.iter().all(|s| s.is_finite()), "{fitness:?}");
        let eps = ind.config().get("eps").and_then(|v| v.as_f64());
        if eps.is_some_and(|e| e > 1.0) {
            assert_eq!(fitness, &[0.0, 0.0, 0.0][..]);
        }
    }
}

// ---- Errors ----

#[test]
fn unknown_family_is_rejected_before_any_work() {
    let calls = AtomicUsize::new(0);
    let counting = |config: &ParamSet| -> Result<Vec<f64>, String> {
        calls.fetch_add(1, Ordering::Relaxed);
        smooth(config)
    };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        counting,
    );

    let request = SearchRequest::new("hdbscan", objectives()).with_time_budget_secs(5.0);
    let start = Instant::now();
    let err = tuner.search(&request, &|_: &ProgressEvent| {}).err();

    assert_eq!(err, Some(SearchError::UnknownAlgorithm("hdbscan".into())));
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    assert!(start.elapsed() < Duration::from_secs(1));
}

// ---- Deadline and cancellation ----

#[test]
fn search_respects_time_budget() {
    init_tracing();
    let slow = |config: &ParamSet| -> Result<Vec<f64>, String> {
        std::thread::sleep(Duration::from_millis(1));
        smooth(config)
    };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(200),
        slow,
    )
    .with_config(SearchConfig::default().with_parallel(false));

    let budget = 0.1;
    let request = SearchRequest::new("birch", objectives()).with_time_budget_secs(budget);
    let start = Instant::now();
    tuner.search(&request, &|_: &ProgressEvent| {}).expect("search");

    // one extra generation costs ~10-20 evaluations of 1 ms each
    assert!(
        start.elapsed() < Duration::from_secs_f64(budget) + Duration::from_secs(2),
        "search overran its budget: {:?}",
        start.elapsed()
    );
}

#[test]
fn cancellation_ends_a_long_search() {
    init_tracing();
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        smooth,
    )
    .with_config(SearchConfig::default().with_parallel(false));
    let request = SearchRequest::new("db", objectives()).with_time_budget_secs(600.0);

    let cancel = Arc::new(AtomicBool::new(false));
    let trigger = Arc::clone(&cancel);
    std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(30));
        trigger.store(true, Ordering::Relaxed);
    });

    let start = Instant::now();
    let result = tuner
        .search_with_cancel(&request, &|_: &ProgressEvent| {}, Some(cancel))
        .expect("cancelled search still reports");

    assert!(start.elapsed() < Duration::from_secs(30));
    assert!(!result.individuals.is_empty());
}

#[test]
fn progress_reports_every_partition() {
    init_tracing();
    let seen = Mutex::new(Vec::new());
    let sink = |event: &ProgressEvent| {
        if let Some(id) = event.partition {
            seen.lock().expect("lock").push(id);
        }
    };
    let tuner = HyperTuner::new(
        ParameterCatalog::builtin(),
        SpaceGenerator::clustering(100),
        smooth,
    )
    .with_config(SearchConfig::default().with_parallel(false));

    let request = SearchRequest::new("optics", objectives()).with_time_budget_secs(0.2);
    let result = tuner.search(&request, &sink).expect("search");

    let mut ids = seen.lock().expect("lock").clone();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), result.partitions);
}
