//! DrawChart: the transformation from a grid to a figure.

use tracing::{debug, trace};

use gridtrace_explain::{NodeFactory, NodeId};
use gridtrace_foundation::{Datum, Result};
use gridtrace_function::rules::{output_rest, rewrite_leaves};
use gridtrace_function::{
    Evaluable, Evaluation, Explainable, Function, Trace, check_arity, enter, grid_input,
};
use gridtrace_part::{Part, Segment, SegmentKind, SubjectId};

use crate::chart::Chart;

/// Draws its input grid with a chart.
///
/// Output 0 is the figure. Explaining a feature of it asks the chart, then
/// rewrites every `self` leaf of the chart's explanation onto input 0: the
/// drawn figure has no identity of its own beyond the grid it shows.
#[derive(Debug)]
pub struct DrawChart {
    subject: SubjectId,
    chart: Box<dyn Chart>,
}

impl DrawChart {
    /// Creates a drawing transformation for the given chart.
    #[must_use]
    pub fn new(chart: impl Chart + 'static) -> Self {
        Self::boxed(Box::new(chart))
    }

    /// Creates a drawing transformation for a boxed chart.
    #[must_use]
    pub fn boxed(chart: Box<dyn Chart>) -> Self {
        Self {
            subject: SubjectId::fresh(),
            chart,
        }
    }

    /// Returns the chart.
    #[must_use]
    pub fn chart(&self) -> &dyn Chart {
        self.chart.as_ref()
    }
}

impl Evaluable for DrawChart {
    fn subject(&self) -> SubjectId {
        self.subject
    }

    fn name(&self) -> &str {
        "DrawChart"
    }

    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn evaluate(&self, inputs: &[Datum]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let data = grid_input(self, inputs, 0)?;
        let figure = self.chart.draw(data)?;
        debug!(
            operator = "DrawChart",
            chart = self.chart.name(),
            figure = figure.kind(),
            "evaluated"
        );
        Ok(Evaluation::single(figure, Trace::Inputs(inputs.to_vec())))
    }
}

impl Explainable for DrawChart {
    fn explain(&self, run: &Evaluation, part: &Part, factory: &mut NodeFactory) -> NodeId {
        let (root, done) = enter(self, part, factory);
        if done {
            return root;
        }
        let data = match run.trace() {
            Trace::Inputs(inputs) => inputs.first().and_then(|d| d.as_grid().ok()),
            _ => None,
        };
        let (Some(data), Some(feature)) = (data, output_rest(part, 0)) else {
            factory.link_unknown(root);
            return root;
        };
        if feature.is_empty() {
            let whole = factory.part_node(self.subject, &Part::input(0));
            factory.link(root, whole);
            return root;
        }
        if !feature.applies_to(self.chart.kind()) || !factory.descend() {
            factory.link_unknown(root);
            return root;
        }
        trace!(chart = self.chart.name(), part = %feature, "explaining chart feature");

        let chart_root = self.chart.explain(data, &feature, factory);
        factory.link(root, chart_root);
        rewrite_leaves(factory, chart_root, self.chart.subject(), |factory, leaf, part| {
            let Some(Segment::SelfRef) = part.root() else {
                return;
            };
            let below = part.below(SegmentKind::SelfRef).unwrap_or_default();
            let cell = factory.part_node(self.subject, &below.inside(&Part::input(0)));
            factory.link(leaf, cell);
        });
        factory.ascend();
        root
    }
}

impl Function for DrawChart {
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self {
            subject: SubjectId::fresh(),
            chart: self.chart.duplicate(),
        })
    }
}
