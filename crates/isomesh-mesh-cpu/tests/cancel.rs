use isomesh_field::FieldBuf;
use isomesh_mesh_cpu::{CountingSink, ExtractError, ExtractOptions, extract_with, extract_with_cancel};

fn sphere(n: usize, radius: f32) -> FieldBuf {
    let c = (n as f32 - 1.0) * 0.5;
    FieldBuf::from_fn(n, n, n, |i, j, k| {
        let (x, y, z) = (i as f32 - c, j as f32 - c, k as f32 - c);
        radius - (x * x + y * y + z * z).sqrt()
    })
    .unwrap()
}

#[test]
fn polls_once_per_layer() {
    let buf = sphere(8, 2.5);
    let mut polls = 0;
    let mut sink = CountingSink::default();
    extract_with_cancel(&buf.as_field(), &ExtractOptions::surface(0.0), &mut sink, || {
        polls += 1;
        false
    })
    .unwrap();
    assert_eq!(polls, 7);
}

#[test]
fn stops_before_the_requested_layer_and_keeps_partial_output() {
    let buf = sphere(12, 4.3);
    let opts = ExtractOptions::surface(0.0);
    let mut full = CountingSink::default();
    extract_with(&buf.as_field(), &opts, &mut full).unwrap();

    let mut polls = 0;
    let mut sink = CountingSink::default();
    let err = extract_with_cancel(&buf.as_field(), &opts, &mut sink, || {
        polls += 1;
        polls > 3
    })
    .unwrap_err();
    assert!(matches!(err, ExtractError::Cancelled { layer: 3 }));
    assert!(sink.points > 0);
    assert!(sink.points < full.points);
}

#[test]
fn cancel_before_first_layer_emits_nothing() {
    let buf = sphere(6, 1.8);
    let mut sink = CountingSink::default();
    let err =
        extract_with_cancel(&buf.as_field(), &ExtractOptions::lines(0.0), &mut sink, || true)
            .unwrap_err();
    assert!(matches!(err, ExtractError::Cancelled { layer: 0 }));
    assert_eq!((sink.points, sink.lines), (0, 0));
}
