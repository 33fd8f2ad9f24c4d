use std::num::NonZeroUsize;

use saxpy::{PoolKind, SaxpyConfig, SaxpyErr, SaxpyInput, SaxpyOutput};

fn config(size: usize, threads: usize, iterations: usize, pool: PoolKind) -> SaxpyConfig {
    SaxpyConfig::new(size, 1, threads, iterations)
        .unwrap()
        .with_pool(pool)
}

fn assert_close(got: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.);
    assert!(
        (got - expected).abs() <= tol,
        "got {got}, expected {expected}"
    );
}

/// Replays the run on a single thread, without the crate's machinery.
fn sequential(input: &SaxpyInput, iterations: usize) -> SaxpyOutput {
    let mut y = input.y().to_vec();
    let mut averages = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        for (yi, xi) in y.iter_mut().zip(input.x()) {
            *yi += input.a() * xi;
        }
        averages.push(y.iter().sum::<f64>() / y.len() as f64);
    }

    SaxpyOutput { y, averages }
}

#[test]
fn four_elements_two_threads() {
    for pool in [PoolKind::Scoped, PoolKind::Pooled] {
        let input = SaxpyInput::new(vec![1., 2., 3., 4.], vec![0.; 4], 2.).unwrap();
        let output = saxpy::run(&config(4, 2, 1, pool), input).unwrap();

        assert_eq!(output.y, vec![2., 4., 6., 8.]);
        assert_eq!(output.averages, vec![5.]);
    }
}

#[test]
fn averages_accumulate_per_iteration() {
    for pool in [PoolKind::Scoped, PoolKind::Pooled] {
        let input = SaxpyInput::new(vec![1., 1.], vec![0., 0.], 1.).unwrap();
        let output = saxpy::run(&config(2, 2, 2, pool), input).unwrap();

        assert_eq!(output.y, vec![2., 2.]);
        assert_eq!(output.averages, vec![1., 2.]);
    }
}

#[test]
fn more_threads_than_elements() {
    for pool in [PoolKind::Scoped, PoolKind::Pooled] {
        let input = SaxpyInput::new(vec![1., 2., 3.], vec![0.; 3], 1.).unwrap();
        let output = saxpy::run(&config(3, 5, 1, pool), input).unwrap();

        assert_eq!(output.y, vec![1., 2., 3.]);
        assert_eq!(output.averages, vec![2.]);
    }
}

#[test]
fn thread_count_does_not_change_result() {
    const SIZE: usize = 10_007;
    const ITERATIONS: usize = 4;

    let size = NonZeroUsize::new(SIZE).unwrap();
    let input = SaxpyInput::seeded(size, 11).unwrap();
    let single = saxpy::run(&config(SIZE, 1, ITERATIONS, PoolKind::Scoped), input.clone()).unwrap();

    for threads in [2, 3, 8, 64] {
        for pool in [PoolKind::Scoped, PoolKind::Pooled] {
            let cfg = config(SIZE, threads, ITERATIONS, pool);
            let output = saxpy::run(&cfg, input.clone()).unwrap();

            assert_eq!(output.y, single.y, "{threads} threads, {pool:?}");
            for (got, expected) in output.averages.iter().zip(&single.averages) {
                assert_close(*got, *expected);
            }
        }
    }
}

#[test]
fn averages_are_means_of_y() {
    const SIZE: usize = 5_000;
    const ITERATIONS: usize = 5;

    let size = NonZeroUsize::new(SIZE).unwrap();
    let input = SaxpyInput::seeded(size, 42).unwrap();
    let expected = sequential(&input, ITERATIONS);

    let output = saxpy::run(&config(SIZE, 4, ITERATIONS, PoolKind::Scoped), input).unwrap();

    assert_eq!(output.y, expected.y);
    assert_eq!(output.averages.len(), ITERATIONS);
    for (got, expected) in output.averages.iter().zip(&expected.averages) {
        assert_close(*got, *expected);
    }
}

#[test]
fn same_seed_same_output() {
    let cfg = config(1_000, 3, 2, PoolKind::Scoped);
    let first = saxpy::run_seeded(&cfg).unwrap();
    let second = saxpy::run_seeded(&cfg).unwrap();

    assert_eq!(first.y, second.y);
    for (a, b) in first.averages.iter().zip(&second.averages) {
        assert_close(*a, *b);
    }
}

#[test]
fn input_must_match_config_size() {
    let input = SaxpyInput::new(vec![1.; 3], vec![0.; 3], 1.).unwrap();
    let res = saxpy::run(&config(4, 2, 1, PoolKind::Scoped), input);

    assert!(matches!(
        res,
        Err(SaxpyErr::SizeMismatch {
            got: 3,
            expected: 4,
            ..
        })
    ));
}
