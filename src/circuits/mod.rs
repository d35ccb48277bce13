// src/circuits/mod.rs

//! Ordered sequences of `Operation`s and a builder for them.
//!
//! A `Circuit` is pure description: nothing here evolves a state. The
//! `simulation` module interprets circuits; the `oracle` module builds them.

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Represents an ordered sequence of Operations applied to a set of qubits.
///
/// Analogy: Similar to `qiskit.QuantumCircuit` without an execution method.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// The unique set of qubits referenced by any operation.
    qubits: HashSet<QubitId>,

    /// The ordered sequence of operations. Order is significant: phase
    /// corrections of the inverse transform do not commute with the basis changes.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends an operation, registering the qubits it touches.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`, in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Returns the set of qubits referenced by the circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Number of qubits a register needs to run this circuit: highest referenced index + 1.
    pub fn width(&self) -> usize {
        self.qubits.iter().map(|q| q.0 + 1).max().unwrap_or(0)
    }

    /// Returns the ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The qubits read out by the last `Measure` operation, if any.
    pub fn measured_qubits(&self) -> Option<&[QubitId]> {
        self.operations.iter().rev().find_map(|op| match op {
            Operation::Measure { targets } => Some(targets.as_slice()),
            _ => None,
        })
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Adds a labelled barrier.
    pub fn barrier(self, label: &str) -> Self {
        self.add_op(Operation::Barrier { label: Some(label.to_string()) })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "qshor::Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> =
            sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| format!("{}", q).len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time] holds the wire segment, v_connect[row][time] the connector below it
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Superposition { target } | Operation::BasisChange { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate(op.symbol());
                    }
                }
                Operation::ControlledPhase { control, target, .. } => {
                    if let (Some(r_ctrl), Some(r_tgt)) = (qubit_to_row.get(control), qubit_to_row.get(target)) {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate(op.symbol());

                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Operation::Barrier { .. } => {
                    for row in op_grid.iter_mut() {
                        row[t] = format_gate(op.symbol());
                    }
                }
                Operation::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            op_grid[*r][t] = format_gate(op.symbol());
                        }
                    }
                }
            }
        }

        writeln!(f, "qshor::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }

        let labels: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                Operation::Barrier { label: Some(label) } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        if !labels.is_empty() {
            writeln!(f, "stages: {}", labels.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(id: usize) -> QubitId {
        QubitId(id)
    }

    #[test]
    fn builder_tracks_qubits_and_order() {
        let circuit = CircuitBuilder::new()
            .add_op(Operation::Superposition { target: qid(0) })
            .barrier("prep")
            .add_op(Operation::ControlledPhase { control: qid(0), target: qid(2), theta: 1.0 })
            .add_op(Operation::Measure { targets: vec![qid(0)] })
            .build();

        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.qubits().len(), 2);
        assert_eq!(circuit.width(), 3);
        assert_eq!(circuit.measured_qubits(), Some(&[qid(0)][..]));
    }

    #[test]
    fn empty_circuit_has_no_measurement() {
        let circuit = Circuit::default();
        assert!(circuit.is_empty());
        assert_eq!(circuit.width(), 0);
        assert!(circuit.measured_qubits().is_none());
        assert_eq!(format!("{}", circuit), "qshor::Circuit[0 operations on 0 qubits]\n");
    }

    #[test]
    fn display_draws_controls_and_stage_labels() {
        let circuit = CircuitBuilder::new()
            .add_op(Operation::Superposition { target: qid(0) })
            .add_op(Operation::ControlledPhase { control: qid(0), target: qid(1), theta: 0.25 })
            .barrier("QFT†")
            .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
            .build();

        let text = format!("{}", circuit);
        assert!(text.starts_with("qshor::Circuit[4 operations on 2 qubits]"));
        assert!(text.contains("q0: ───H──────@───"));
        assert!(text.contains('│'));
        assert!(text.contains("stages: QFT†"));
    }
}
