use sandwich_sim::{
    run_attack_simulation,
    simulation::AttackStep,
    utils::amm_math::{compute_output, DEFAULT_FEE_BPS},
    SimulationConfig, SimulationError, SimulationInputs,
};

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn test_ten_eth_into_thousand_eth_pool() {
    let outcome = run_attack_simulation(
        &SimulationInputs::new(10.0, 1.0, 1000.0),
        &SimulationConfig::default(),
    )
    .unwrap();
    let t = &outcome.trace;

    assert_eq!(t.initial.token_reserve, 100_000.0);
    assert_eq!(t.frontrun_amount, 5.0);

    // 5 ETH * 0.997 * 100000 / (1000 + 4.985)
    assert!(approx(t.tokens_from_frontrun(), 496.0273, 1e-4));
    assert_eq!(t.tokens_from_frontrun(), compute_output(5.0, 1000.0, 100_000.0, DEFAULT_FEE_BPS));

    assert!(approx(outcome.expected_tokens, 987.1580, 1e-4));
    assert!(approx(outcome.actual_tokens, 977.4226, 1e-4));
    assert!(outcome.actual_tokens < outcome.expected_tokens);
    assert!(approx(outcome.user_loss, 9.7354, 1e-4));

    // Large enough trade that the sandwich pays for both fees
    assert!(approx(outcome.attacker_profit_eth, 0.0692, 1e-4));
    assert!(outcome.is_profitable());
}

#[test]
fn test_tiny_trade_in_deep_pool_is_unprofitable() {
    let outcome = run_attack_simulation(
        &SimulationInputs::new(0.001, 1.0, 1_000_000.0),
        &SimulationConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome.trace.frontrun_amount, 0.0005);
    assert!(outcome.attacker_profit_eth < 0.0);
    assert!(outcome.attacker_profit_eth.abs() < 1e-5);
    assert!(outcome.user_loss >= 0.0);
    assert!(!outcome.exceeded_tolerance);
}

#[test]
fn test_repeated_runs_are_identical() {
    let inputs = SimulationInputs::new(3.7, 0.5, 250.0);
    let config = SimulationConfig::default();

    let first = run_attack_simulation(&inputs, &config).unwrap();
    let second = run_attack_simulation(&inputs, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.user_loss.to_bits(), second.user_loss.to_bits());
    assert_eq!(
        first.attacker_profit_eth.to_bits(),
        second.attacker_profit_eth.to_bits()
    );
}

#[test]
fn test_liquidity_caps_frontrun() {
    let outcome = run_attack_simulation(
        &SimulationInputs::new(200.0, 1.0, 1000.0),
        &SimulationConfig::default(),
    )
    .unwrap();

    // min(100, 50)
    assert_eq!(outcome.trace.frontrun_amount, 50.0);
}

#[test]
fn test_configured_price_and_sizing() {
    let config = SimulationConfig {
        initial_price: 2500.0,
        frontrun_trade_fraction: 1.0,
        frontrun_liquidity_fraction: 0.01,
        ..Default::default()
    };
    let outcome = run_attack_simulation(&SimulationInputs::new(4.0, 1.0, 1000.0), &config).unwrap();

    assert_eq!(outcome.trace.initial.token_reserve, 2_500_000.0);
    assert_eq!(outcome.trace.frontrun_amount, 4.0);
    assert_eq!(outcome.trace.history[0].price, 2500.0);
}

#[test]
fn test_trace_exposes_every_state() {
    let outcome = run_attack_simulation(
        &SimulationInputs::new(10.0, 1.0, 1000.0),
        &SimulationConfig::default(),
    )
    .unwrap();
    let steps: Vec<AttackStep> = outcome.trace.history.iter().map(|s| s.step).collect();

    assert_eq!(
        steps,
        [AttackStep::Initial, AttackStep::Frontrun, AttackStep::Victim, AttackStep::Backrun]
    );
    let last = outcome.trace.history.last().unwrap();
    assert_eq!(last.eth_reserve, outcome.trace.final_state().eth_reserve);
    // The attacker returns exactly the tokens they bought
    assert!(approx(last.token_reserve, 100_000.0 - outcome.actual_tokens, 1e-9));
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let config = SimulationConfig::default();

    let err = run_attack_simulation(&SimulationInputs::new(-1.0, 1.0, 1000.0), &config).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidInput { field: "trade_amount", .. }));

    let err = run_attack_simulation(&SimulationInputs::new(1.0, 1.0, f64::INFINITY), &config).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidInput { field: "liquidity_eth", .. }));
}
