// tests/simulation_tests.rs

use qshor::core::{EXTENDED_COUNTING_WIDTH, MAX_SIMULATED_QUBITS};
use qshor::{
    MeasurementSimulator, OutcomeDistribution, PhaseOracleModel, ShorError, StateVectorSimulator,
};

const TEST_TOLERANCE: f64 = 1e-9;

#[test]
fn test_exact_probabilities_cover_the_counting_register() -> Result<(), ShorError> {
    for (n, a, width) in [(15, 7, 3), (15, 2, 6), (21, 2, 5), (9, 2, 4)] {
        let model = PhaseOracleModel::new(n, a, width)?;
        let probs = StateVectorSimulator::new().exact_probabilities(&model)?;
        assert_eq!(probs.len(), 1 << width, "N={}, a={}", n, a);
        assert!(probs.iter().all(|&p| (-TEST_TOLERANCE..=1.0 + TEST_TOLERANCE).contains(&p)));
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < TEST_TOLERANCE, "N={}, a={}: total {}", n, a, total);
    }
    Ok(())
}

#[test]
fn test_sampling_tracks_exact_probabilities() -> Result<(), ShorError> {
    let model = PhaseOracleModel::new(15, 7, 4)?;
    let simulator = StateVectorSimulator::with_seed(3);
    let exact = simulator.exact_probabilities(&model)?;
    let dist = simulator.simulate(&model, 4096)?;

    assert_eq!(dist.shots(), 4096);
    for (value, frequency) in dist.by_frequency() {
        // Zero-probability outcomes are never drawn.
        assert!(exact[value as usize] > TEST_TOLERANCE, "impossible value {} drawn {} times", value, frequency);
    }
    Ok(())
}

#[test]
fn test_different_seeds_are_independent_requests() -> Result<(), ShorError> {
    let model = PhaseOracleModel::new(21, 2, 6)?;
    let first = StateVectorSimulator::with_seed(1).simulate(&model, 256)?;
    let again = StateVectorSimulator::with_seed(1).simulate(&model, 256)?;
    let other = StateVectorSimulator::with_seed(2).simulate(&model, 256)?;
    assert_eq!(first, again);
    assert_eq!(other.shots(), first.shots());
    assert_eq!(other.width(), first.width());
    Ok(())
}

#[test]
fn test_phase_peaks_of_an_ideal_histogram() -> Result<(), ShorError> {
    // Order 4 with 8 counting bits: peaks at 0, 64, 128, 192.
    let dist = OutcomeDistribution::from_values(8, [(0, 250), (64, 260), (128, 240), (192, 274)])?;
    let peaks = dist.phase_peaks();
    let phases: Vec<f64> = peaks.iter().map(|p| p.phase).collect();
    assert_eq!(phases, vec![0.0, 0.25, 0.5, 0.75]);
    let total: f64 = peaks.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_outline_diagram_names_every_stage() -> Result<(), ShorError> {
    let outline = PhaseOracleModel::display_outline(15, 7)?;
    let diagram = outline.to_string();
    assert!(diagram.contains("N=15, a=7"));
    for label in ["H⊗n", "Controlled-Ua", "QFT†"] {
        assert!(diagram.contains(label), "missing stage {} in\n{}", label, diagram);
    }
    assert_eq!(outline.counting_width(), 3);
    Ok(())
}

#[test]
fn test_extended_width_fits_only_small_targets() -> Result<(), ShorError> {
    let fifteen = PhaseOracleModel::new(15, 7, EXTENDED_COUNTING_WIDTH)?;
    assert_eq!(fifteen.num_qubits(), MAX_SIMULATED_QUBITS);
    assert_eq!(fifteen.phase_factors().len(), EXTENDED_COUNTING_WIDTH);

    let twenty_one = PhaseOracleModel::new(21, 2, EXTENDED_COUNTING_WIDTH)?;
    let err = StateVectorSimulator::new().simulate(&twenty_one, 16);
    assert!(matches!(err, Err(ShorError::SimulationError { .. })));
    Ok(())
}
