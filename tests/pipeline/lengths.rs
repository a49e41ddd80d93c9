//! Text with units, normalized and plotted

use gridtrace::chart::{DrawChart, Scatterplot};
use gridtrace::explain::{Explanation, PrettyOptions};
use gridtrace::foundation::{Datum, Figure, ReadOptions};
use gridtrace::function::{Circuit, Endpoint, Evaluable, explain};
use gridtrace::part::{Axis, CharRange, Part, Segment};
use gridtrace::reshape::{MoveUnitsToHeader, ReadGrid};

const TEXT: &str = "t,len\n0,1 km\n1,500 m\n2,2 km\n";

fn plot() -> Circuit {
    let mut c = Circuit::new("plot lengths", 1);
    let read = c.add(ReadGrid::new(ReadOptions::csv()));
    let units = c.add(MoveUnitsToHeader::new());
    let draw = c.add(DrawChart::new(Scatterplot::new()));
    c.connect(Endpoint::Input(0), read, 0).unwrap();
    c.connect(Endpoint::node(read, 0), units, 0).unwrap();
    c.connect(Endpoint::node(units, 0), draw, 0).unwrap();
    c.expose(Endpoint::node(draw, 0)).unwrap();
    c
}

fn text_ranges(c: &Circuit, e: &Explanation) -> Vec<CharRange> {
    let mut ranges: Vec<CharRange> = e
        .sources()
        .into_iter()
        .map(|(subject, part)| {
            assert_eq!(subject, c.subject());
            assert_eq!(part.input_pin(), Some(0));
            part.chars().unwrap()
        })
        .collect();
    ranges.sort_unstable();
    ranges
}

#[test]
fn plots_normalized_values() {
    let c = plot();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    let Some(Datum::Figure(Figure::Scatter(figure))) = run.output(0) else {
        panic!("expected a scatterplot");
    };
    assert_eq!(figure.y_caption, "len (km)");
    assert_eq!(figure.series[0].points, vec![(0.0, 1.0), (1.0, 0.5), (2.0, 2.0)]);
}

#[test]
fn converted_points_need_the_reference_unit() {
    let c = plot();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    let point = Part::output(0).then(Segment::Point { series: 0, index: 1 });
    let e = explain(&c, &run, &point);
    assert!(!e.is_partial());
    // "1 km" of line 2, then "1" and "500 m" of line 3
    assert_eq!(
        text_ranges(&c, &e),
        vec![CharRange::new(8, 12), CharRange::new(13, 14), CharRange::new(15, 20)]
    );
}

#[test]
fn caption_characters_split_by_origin() {
    let c = plot();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    let caption = Part::output(0).then(Segment::AxisCaption(Axis::Y));

    let label = caption.clone().then(Segment::chars(0, 3));
    let e = explain(&c, &run, &label);
    assert_eq!(text_ranges(&c, &e), vec![CharRange::new(2, 5)]);

    let unit = caption.then(Segment::chars(5, 7));
    let e = explain(&c, &run, &unit);
    assert_eq!(text_ranges(&c, &e), vec![CharRange::new(8, 12)]);
}

#[test]
fn explanations_render_every_hop() {
    let c = plot();
    let run = c.evaluate(&[Datum::Scalar(TEXT.into())]).unwrap();
    let point = Part::output(0).then(Segment::Point { series: 0, index: 0 });
    let text = explain(&c, &run, &point).to_pretty(&PrettyOptions::default());
    for name in ["plot lengths", "DrawChart", "Scatterplot", "MoveUnitsToHeader", "ReadGrid"] {
        assert!(text.contains(name), "missing {name} in\n{text}");
    }
}
