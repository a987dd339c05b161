use solar_shuttle::config::PlannerConfig;
use solar_shuttle::transfer::mission::timer::endpoint_radius;
use solar_shuttle::transfer::{MissionScheduleGenerator, TimerError, TransferTimer};

fn generator() -> MissionScheduleGenerator {
    MissionScheduleGenerator::from_config(&PlannerConfig::default()).expect("generator")
}

#[test]
fn timer_settles_on_a_self_consistent_duration() {
    let generator = generator();
    let system = generator.system();
    let model = generator.model();
    let timer = generator.search().timer;

    let guess = timer.nominal_guess(&system.source, &system.target);
    let timing = timer
        .solve(model, &system.source, &system.target, 0.0, guess)
        .expect("timer converges");

    assert!(timing.iterations <= timer.max_iterations);
    assert_eq!(timing.t_depart, 0.0);
    assert_eq!(timing.t_arrival, timing.t_depart + timing.t_half);
    assert!((250.0..400.0).contains(&timing.t_half), "t_half = {}", timing.t_half);

    let r_depart = endpoint_radius(model, &system.source, 0.0).unwrap();
    let r_arrive = endpoint_radius(model, &system.target, timing.t_arrival).unwrap();
    assert_eq!(timing.r_depart, r_depart);
    assert_eq!(timing.r_arrive, r_arrive);
    let implied = timer.half_period(0.5 * (r_depart + r_arrive));
    assert!((implied - timing.t_half).abs() < 1e-5);
}

#[test]
fn timer_result_does_not_depend_on_the_guess() {
    let generator = generator();
    let system = generator.system();
    let model = generator.model();
    let timer = generator.search().timer;

    let a = timer
        .solve(model, &system.target, &system.source, 900.0, 150.0)
        .unwrap();
    let b = timer
        .solve(model, &system.target, &system.source, 900.0, 400.0)
        .unwrap();
    assert!((a.t_half - b.t_half).abs() < 1e-5);
}

#[test]
fn timer_reports_exhausted_iterations() {
    let generator = generator();
    let system = generator.system();
    let base = generator.search().timer;
    let timer = TransferTimer::new(base.mu, 1e-6, 1);

    let err = timer
        .solve(generator.model(), &system.source, &system.target, 0.0, 10.0)
        .unwrap_err();
    match err {
        TimerError::NoConvergence {
            t_depart,
            iterations,
            last_step,
        } => {
            assert_eq!(t_depart, 0.0);
            assert_eq!(iterations, 1);
            assert!(last_step > 1.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn timer_rejects_non_physical_guesses() {
    let generator = generator();
    let system = generator.system();
    let timer = generator.search().timer;
    for guess in [0.0, -5.0, f64::NAN] {
        assert!(matches!(
            timer.solve(generator.model(), &system.source, &system.target, 0.0, guess),
            Err(TimerError::NonPhysical(_))
        ));
    }
}
