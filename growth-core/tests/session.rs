use growth_core::{
    Config, ConfigError, GrowthSession, SeedConfig, SessionError, SessionInputs, SessionStatus,
};

fn session(seed: u64) -> GrowthSession {
    GrowthSession::new(SeedConfig {
        node_count: 20,
        radius: 10.0,
        seed: Some(seed),
    })
}

fn inputs(iterations: usize, reset: bool, run: bool) -> SessionInputs {
    SessionInputs {
        iterations,
        config: Config::default(),
        reset,
        run,
    }
}

#[test]
fn host_loop_runs_stops_and_resets() {
    let mut session = session(3);

    // Run toggle off: nothing is reported.
    assert_eq!(session.solve(inputs(5, false, false)), Ok(None));
    assert_eq!(session.status(), SessionStatus::Stopped);

    let mut last_len = 20;
    for expected in 1..=5 {
        let frame = session.solve(inputs(5, false, true)).unwrap().unwrap();
        assert_eq!(frame.iterations, expected);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(frame.segments.len(), frame.points.len());
        assert!(frame.points.len() >= last_len);
        last_len = frame.points.len();
    }

    // Target reached: the frame repeats and the session stops.
    let done = session.solve(inputs(5, false, true)).unwrap().unwrap();
    assert_eq!(done.iterations, 5);
    assert_eq!(done.points.len(), last_len);
    assert_eq!(session.status(), SessionStatus::Stopped);
    assert_eq!(session.initial_segments().len(), 20);

    // Raising the target resumes from where it stopped.
    let more = session.solve(inputs(6, false, true)).unwrap().unwrap();
    assert_eq!(more.iterations, 6);

    let restarted = session.solve(inputs(6, true, true)).unwrap().unwrap();
    assert_eq!(restarted.iterations, 1);
    assert_eq!(session.actual_runs(), 1);
}

#[test]
fn fixed_seed_sessions_agree_frame_by_frame() {
    let mut a = session(42);
    let mut b = session(42);

    for _ in 0..10 {
        let fa = a.solve(inputs(10, false, true)).unwrap();
        let fb = b.solve(inputs(10, false, true)).unwrap();
        assert_eq!(fa, fb);
    }
}

#[test]
fn invalid_parameters_surface_as_errors() {
    let mut session = session(1);
    let bad = SessionInputs {
        config: Config {
            max_edge_length: f32::NAN,
            ..Config::default()
        },
        ..inputs(1, false, true)
    };

    let err = session.solve(bad).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Config(ConfigError::NotFinite {
            name: "max_edge_length",
            ..
        })
    ));
    assert!(session.curve().is_none());

    // A valid config on the next call builds the curve.
    let frame = session.solve(inputs(1, false, true)).unwrap().unwrap();
    assert_eq!(frame.iterations, 1);
}
