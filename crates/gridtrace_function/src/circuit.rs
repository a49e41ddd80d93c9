//! Circuits: wired graphs of transformations that are themselves
//! transformations.
//!
//! A circuit evaluates by pulling each requested output through the wiring,
//! running every contained transformation at most once. It explains by
//! splicing the explanation of whichever contained transformation produced
//! the requested output below its own leaf, then following every input leaf
//! of that explanation back through the wiring until it reaches a circuit
//! input.

use tracing::{debug, trace};

use gridtrace_explain::{NodeFactory, NodeId};
use gridtrace_foundation::{Datum, Error, Result};
use gridtrace_part::{Part, Segment, SegmentKind, SubjectId};

use crate::evaluation::{Evaluation, Trace};
use crate::function::{Evaluable, Explainable, Function, check_arity, enter};
use crate::rules::rewrite_leaves;

/// Where a wire starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// One of the circuit's own inputs.
    Input(usize),
    /// An output pin of a contained transformation.
    Node {
        /// Position of the transformation in the circuit.
        node: usize,
        /// Output pin of that transformation.
        pin: usize,
    },
}

impl Endpoint {
    /// Shorthand for an output pin of a contained transformation.
    #[must_use]
    pub const fn node(node: usize, pin: usize) -> Self {
        Self::Node { node, pin }
    }
}

/// A wired graph of transformations.
#[derive(Debug)]
pub struct Circuit {
    subject: SubjectId,
    name: String,
    inputs: usize,
    nodes: Vec<Box<dyn Function>>,
    wires: Vec<Vec<Option<Endpoint>>>,
    outputs: Vec<Endpoint>,
}

impl Circuit {
    /// Creates an empty circuit with the given number of inputs.
    #[must_use]
    pub fn new(name: impl Into<String>, inputs: usize) -> Self {
        Self {
            subject: SubjectId::fresh(),
            name: name.into(),
            inputs,
            nodes: Vec::new(),
            wires: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Adds a transformation and returns its position.
    pub fn add(&mut self, function: impl Function + 'static) -> usize {
        self.add_boxed(Box::new(function))
    }

    /// Adds a boxed transformation and returns its position.
    pub fn add_boxed(&mut self, function: Box<dyn Function>) -> usize {
        self.wires.push(vec![None; function.input_arity()]);
        self.nodes.push(function);
        self.nodes.len() - 1
    }

    /// Wires `from` into input `pin` of the transformation at `node`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if either end does not exist.
    pub fn connect(&mut self, from: Endpoint, node: usize, pin: usize) -> Result<()> {
        self.check_endpoint(from)?;
        let slot = self
            .wires
            .get_mut(node)
            .and_then(|wires| wires.get_mut(pin))
            .ok_or_else(|| {
                Error::configuration(format!("node {node} has no input pin {pin}"))
            })?;
        *slot = Some(from);
        Ok(())
    }

    /// Exposes `from` as the next circuit output and returns its pin.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `from` does not exist.
    pub fn expose(&mut self, from: Endpoint) -> Result<usize> {
        self.check_endpoint(from)?;
        self.outputs.push(from);
        Ok(self.outputs.len() - 1)
    }

    /// Returns the contained transformation at `node`.
    #[must_use]
    pub fn node(&self, node: usize) -> Option<&dyn Function> {
        self.nodes.get(node).map(AsRef::as_ref)
    }

    /// Returns the number of contained transformations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the circuit contains no transformations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn check_endpoint(&self, endpoint: Endpoint) -> Result<()> {
        let ok = match endpoint {
            Endpoint::Input(i) => i < self.inputs,
            Endpoint::Node { node, pin } => self
                .nodes
                .get(node)
                .is_some_and(|f| pin < f.output_arity()),
        };
        if ok {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "{endpoint:?} does not exist in circuit {}",
                self.name
            )))
        }
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    fn pull(
        &self,
        endpoint: Endpoint,
        inputs: &[Datum],
        runs: &mut [Option<Evaluation>],
        visiting: &mut Vec<usize>,
    ) -> Result<Datum> {
        match endpoint {
            Endpoint::Input(i) => inputs
                .get(i)
                .cloned()
                .ok_or_else(|| Error::arity_mismatch(self.inputs, inputs.len())),
            Endpoint::Node { node, pin } => {
                self.run_node(node, inputs, runs, visiting)?;
                runs[node]
                    .as_ref()
                    .and_then(|run| run.output(pin))
                    .cloned()
                    .ok_or_else(|| {
                        Error::configuration(format!("node {node} produced no output {pin}"))
                    })
            }
        }
    }

    fn run_node(
        &self,
        node: usize,
        inputs: &[Datum],
        runs: &mut [Option<Evaluation>],
        visiting: &mut Vec<usize>,
    ) -> Result<()> {
        if runs[node].is_some() {
            return Ok(());
        }
        if visiting.contains(&node) {
            return Err(Error::configuration(format!(
                "cycle through node {node} in circuit {}",
                self.name
            )));
        }
        visiting.push(node);
        let mut args = Vec::with_capacity(self.wires[node].len());
        for (pin, wire) in self.wires[node].iter().enumerate() {
            let from = wire.ok_or_else(|| {
                Error::configuration(format!(
                    "input {pin} of node {node} is not wired in circuit {}",
                    self.name
                ))
            })?;
            trace!(circuit = %self.name, node, pin, ?from, "pulling wire");
            args.push(self.pull(from, inputs, runs, visiting)?);
        }
        visiting.pop();
        let run = self.nodes[node].evaluate(&args)?;
        runs[node] = Some(run);
        Ok(())
    }

    // =========================================================================
    // Explanation
    // =========================================================================

    /// Links, below `parent`, the explanation of `rest` of whatever is
    /// wired at `endpoint`.
    fn explain_endpoint(
        &self,
        endpoint: Endpoint,
        rest: &Part,
        runs: &[Option<Evaluation>],
        parent: NodeId,
        factory: &mut NodeFactory,
    ) {
        match endpoint {
            Endpoint::Input(i) => {
                let leaf = factory.part_node(self.subject, &rest.inside(&Part::input(i)));
                factory.link(parent, leaf);
            }
            Endpoint::Node { node, pin } => {
                let (Some(function), Some(Some(run))) = (self.nodes.get(node), runs.get(node))
                else {
                    factory.link_unknown(parent);
                    return;
                };
                if !factory.descend() {
                    factory.link_unknown(parent);
                    return;
                }
                trace!(circuit = %self.name, node, pin, part = %rest, "explaining through node");
                let sub_root = function.explain(run, &rest.inside(&Part::output(pin)), factory);
                factory.link(parent, sub_root);
                rewrite_leaves(factory, sub_root, function.subject(), |factory, leaf, part| {
                    let Some(&Segment::Input(j)) = part.root() else {
                        return;
                    };
                    let below = part.below(SegmentKind::Input).unwrap_or_default();
                    match self.wires[node].get(j).copied().flatten() {
                        Some(from) => self.explain_endpoint(from, &below, runs, leaf, factory),
                        None => factory.link_unknown(leaf),
                    }
                });
                factory.ascend();
            }
        }
    }
}

impl Evaluable for Circuit {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn input_arity(&self) -> usize {
        self.inputs
    }

    fn output_arity(&self) -> usize {
        self.outputs.len()
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let mut runs: Vec<Option<Evaluation>> = vec![None; self.nodes.len()];
        let mut visiting = Vec::new();
        let mut outputs = Vec::with_capacity(self.outputs.len());
        for &endpoint in &self.outputs {
            let datum = self
                .pull(endpoint, inputs, &mut runs, &mut visiting)
                .map_err(|e| e.in_operation(self.name.clone()))?;
            outputs.push(datum);
        }
        debug!(
            operator = %self.name,
            nodes = self.nodes.len(),
            ran = runs.iter().filter(|r| r.is_some()).count(),
            "evaluated circuit"
        );
        Ok(Evaluation::new(outputs, Trace::Nested(runs)))
    }
}

impl Explainable for Circuit {
    fn explain(&self, run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let (Some(Segment::Output(pin)), Trace::Nested(runs)) = (part.root(), run.trace()) else {
            factory.link_unknown(root);
            return root;
        };
        let Some(&endpoint) = self.outputs.get(*pin) else {
            factory.link_unknown(root);
            return root;
        };
        let rest = part.below(SegmentKind::Output).unwrap_or_default();
        self.explain_endpoint(endpoint, &rest, runs, root, factory);
        root
    }
}

impl Function for Circuit {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self {
            subject: SubjectId::fresh(),
            name: self.name.clone(),
            inputs: self.inputs,
            nodes: self.nodes.iter().map(|f| f.duplicate()).collect(),
            wires: self.wires.clone(),
            outputs: self.outputs.clone(),
        })
    }
}
