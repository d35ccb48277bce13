//! Prints the 3-bit outline circuit and the phase histogram of a simulated run,
//! marking the ideal peak positions k/r for the true order r.

use qshor::{
    MeasurementSimulator, PhaseOracleModel, ShorError, StateVectorSimulator, multiplicative_order,
};

const N: u64 = 15;
const A: u64 = 7;

fn main() -> Result<(), ShorError> {
    println!("--- qshor Example: phase peaks for a = {}, N = {} ---", A, N);

    let outline = PhaseOracleModel::display_outline(N, A)?;
    println!("\nOutline circuit:\n{}", outline.circuit());

    let model = PhaseOracleModel::new(N, A, 8)?;
    let distribution = StateVectorSimulator::new().simulate(&model, 1024)?;

    let order = multiplicative_order(A, N).unwrap_or(1);
    let markers: Vec<f64> = (0..order).map(|k| k as f64 / order as f64).collect();
    println!("Ideal peaks at k/{}: {:?}\n", order, markers);

    for peak in distribution.phase_peaks() {
        let on_marker = markers.iter().any(|m| (m - peak.phase).abs() < 0.5 / 256.0);
        let bar = "#".repeat((peak.probability * 60.0).round() as usize);
        println!(
            "{:>3}  phase {:.4} {} {:>6.3} {}",
            peak.value,
            peak.phase,
            if on_marker { "*" } else { " " },
            peak.probability,
            bar
        );
    }

    Ok(())
}
