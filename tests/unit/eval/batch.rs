use super::*;
use crate::assets::reference::ReferenceImage;
use crate::canvas::surface::Canvas;
use crate::config::EvaluatorOpts;
use crate::foundation::core::{Point, Rgb8, Rgba8};
use crate::genome::model::Polygon;

fn evaluator() -> Evaluator {
    let mut c = Canvas::new(24, 24).unwrap();
    for y in 0..24 {
        for x in 0..24 {
            c.put_pixel(x, y, Rgb8::new((x * 10) as u8, (y * 10) as u8, 77));
        }
    }
    Evaluator::from_reference(ReferenceImage::from_canvas(c), EvaluatorOpts::with_size(24, 24))
        .unwrap()
}

fn population(n: usize) -> Vec<Genome> {
    (0..n)
        .map(|i| {
            let i = i as i32;
            Genome::new(24, 24)
                .with_polygon(Polygon::rect(
                    Rgba8::new((i * 37 % 256) as u8, 90, 200, 180),
                    i % 5,
                    i % 7,
                    24 - i % 3,
                    20,
                ))
                .with_polygon(Polygon::new(
                    Rgba8::new(10, (i * 13 % 256) as u8, 30, 100),
                    [Point::new(i % 24, 0), Point::new(23, 23), Point::new(0, 12)],
                ))
        })
        .collect()
}

#[test]
fn parallel_matches_sequential_in_order() {
    let ev = evaluator();
    let pop = population(50);

    let seq = evaluate_population(&ev, &pop, &BatchOpts::sequential()).unwrap();
    let par = evaluate_population(
        &ev,
        &pop,
        &BatchOpts {
            parallel: true,
            threads: Some(4),
            chunk_size: 7,
        },
    )
    .unwrap();

    let seq: Vec<f64> = seq.into_iter().map(|r| r.unwrap()).collect();
    let par: Vec<f64> = par.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(seq, par);

    let direct: Vec<f64> = pop.iter().map(|g| ev.evaluate(g).unwrap()).collect();
    assert_eq!(seq, direct);
}

#[test]
fn zero_threads_is_rejected() {
    let ev = evaluator();
    let err = evaluate_population(
        &ev,
        &population(2),
        &BatchOpts {
            threads: Some(0),
            ..BatchOpts::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, PolyfitError::Validation(_)));
}

#[test]
fn zero_chunk_size_still_scores_everything() {
    let ev = evaluator();
    let out = evaluate_population(
        &ev,
        &population(5),
        &BatchOpts {
            threads: Some(2),
            chunk_size: 0,
            ..BatchOpts::default()
        },
    )
    .unwrap();
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|r| r.is_ok()));
}

#[test]
fn empty_population_yields_empty_scores() {
    let ev = evaluator();
    assert!(
        evaluate_population(&ev, &[], &BatchOpts::default())
            .unwrap()
            .is_empty()
    );
}
