//! Integration tests for Part composition

use gridtrace_part::{Axis, CharRange, Part, Segment, SegmentKind, SubjectKind};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (0usize..4).prop_map(Segment::Input),
        (0usize..4).prop_map(Segment::Output),
        (0usize..30, 0usize..30).prop_map(|(c, r)| Segment::cell(c, r)),
        (0usize..30).prop_map(Segment::Row),
        (0usize..30).prop_map(Segment::Column),
        (0usize..20, 0usize..20).prop_map(|(a, b)| Segment::chars(a.min(b), a.max(b))),
        Just(Segment::Legend),
        Just(Segment::Axis(Axis::X)),
    ]
}

fn part() -> impl Strategy<Value = Part> {
    prop::collection::vec(segment(), 0..5).prop_map(Part::compose)
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn compose_reads_head_first() {
    let part = Part::compose([Segment::chars(0, 3), Segment::cell(1, 1), Segment::Output(0)]);
    assert_eq!(
        part,
        Part::output(0)
            .then(Segment::cell(1, 1))
            .then(Segment::chars(0, 3))
    );
    assert_eq!(part.head(), Some(&Segment::chars(0, 3)));
    assert_eq!(part.root(), Some(&Segment::Output(0)));
    assert_eq!(part.to_string(), "chars 0..3 of cell B2 of output 0");
}

#[test]
fn rewriting_pins_keeps_the_rest() {
    let part = Part::output(2).then(Segment::cell(0, 4));
    let input = part.output_to_input(1).unwrap();
    assert_eq!(input, Part::input(1).then(Segment::cell(0, 4)));
    assert_eq!(input.len(), part.len());
    assert!(Part::input(0).output_to_input(0).is_none());
}

#[test]
fn below_strips_containers() {
    let part = Part::output(0)
        .then(Segment::cell(2, 2))
        .then(Segment::chars(1, 2));
    assert_eq!(
        part.below(SegmentKind::Output).unwrap(),
        Part::of(Segment::cell(2, 2)).then(Segment::chars(1, 2))
    );
    assert_eq!(part.chars(), Some(CharRange::new(1, 2)));
    assert_eq!(part.cell(), Some((2, 2)));
}

#[test]
fn applicability_follows_the_outermost_segment() {
    assert!(Part::nothing().applies_to(SubjectKind::HeatMap));
    assert!(Part::of(Segment::Legend).applies_to(SubjectKind::Scatterplot));
    assert!(!Part::of(Segment::Legend).applies_to(SubjectKind::Grid));
    assert!(Part::of(Segment::cell(0, 0)).applies_to(SubjectKind::Grid));
    assert!(!Part::output(0).applies_to(SubjectKind::Grid));
}

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #[test]
    fn nothing_is_the_identity_of_inside(p in part()) {
        prop_assert_eq!(p.inside(&Part::nothing()), p.clone());
        prop_assert_eq!(Part::nothing().inside(&p), p);
    }

    #[test]
    fn inside_is_associative(a in part(), b in part(), c in part()) {
        prop_assert_eq!(a.inside(&b).inside(&c), a.inside(&b.inside(&c)));
    }

    #[test]
    fn then_and_tail_cancel(p in part(), s in segment()) {
        let extended = p.clone().then(s.clone());
        prop_assert_eq!(extended.head(), Some(&s));
        prop_assert_eq!(extended.tail(), p);
    }

    #[test]
    fn iteration_is_head_first(segments in prop::collection::vec(segment(), 0..6)) {
        let p = Part::compose(segments.clone());
        let back: Vec<Segment> = p.iter().cloned().collect();
        prop_assert_eq!(back, segments);
    }

    #[test]
    fn replace_keeps_length(p in part(), pin in 0usize..4) {
        match p.replace(SegmentKind::Output, Segment::Input(pin)) {
            Some(q) => {
                prop_assert_eq!(q.len(), p.len());
                prop_assert_eq!(q.input_pin(), Some(pin));
            }
            None => prop_assert!(p.output_pin().is_none()),
        }
    }

    #[test]
    fn fragments_cover_the_query(a in 0usize..20, b in 0usize..20, c in 0usize..20, d in 0usize..20) {
        let query = CharRange::new(a.min(b), a.max(b));
        let marked = CharRange::new(c.min(d), c.max(d));
        let fragments = query.fragment(&marked);
        let covered: usize = fragments.inside.map_or(0, |r| r.len())
            + fragments.outside.iter().map(CharRange::len).sum::<usize>();
        prop_assert_eq!(covered, query.len());
    }
}
