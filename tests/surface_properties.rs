//! Property-based tests for the surface renderer.

use proptest::prelude::*;
use volarb::prelude::*;
use volarb::surface::{ColorRamp, ViewportGeometry};

fn paint(width: f64, height: f64) -> DisplayList {
    let mut rt = Runtime::new();
    let mut renderer = SurfaceRenderer::default();
    let mut list = DisplayList::new();
    renderer.mount(&mut rt, Some(Size::new(width, height)), Some(&mut list));
    list
}

proptest! {
    /// Red rises with vol while green and blue fall
    #[test]
    fn ramp_is_monotone(a in 0.0_f64..2.0, b in 0.0_f64..2.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let ramp = ColorRamp::default();
        let (c_lo, c_hi) = (ramp.color(lo), ramp.color(hi));

        prop_assert!(c_lo.r <= c_hi.r);
        prop_assert!(c_lo.g >= c_hi.g);
        prop_assert!(c_lo.b >= c_hi.b);
        prop_assert_eq!(c_hi.a, 255);
    }

    /// Out-of-range vols clamp instead of wrapping
    #[test]
    fn ramp_clamps(vol in 1.5_f64..1e6) {
        let c = ColorRamp::default().color(vol);
        prop_assert_eq!(c.r, 255);
        prop_assert_eq!(c.g, 0);
        prop_assert_eq!(c.b, 0);
    }

    /// Every marker sits inside the horizontal plot range
    #[test]
    fn markers_stay_between_margins(width in 100.0_f64..2000.0, height in 100.0_f64..1200.0) {
        let list = paint(width, height);
        let margin = SurfaceStyle::default().margin;

        prop_assert_eq!(list.markers().count(), 121);
        for (center, radius, _) in list.markers() {
            prop_assert!(center.x >= margin - 1e-9);
            prop_assert!(center.x <= width - margin + 1e-9);
            prop_assert!((3.0..=5.0 + 1e-9).contains(&radius));
        }
    }

    /// Resizing keeps every marker at the same fraction of the plot area
    #[test]
    fn resize_is_proportional(
        w1 in 200.0_f64..1600.0,
        h1 in 200.0_f64..1000.0,
        w2 in 200.0_f64..1600.0,
        h2 in 200.0_f64..1000.0,
    ) {
        let g1 = ViewportGeometry::measure(Some(Size::new(w1, h1)), 40.0).unwrap();
        let g2 = ViewportGeometry::measure(Some(Size::new(w2, h2)), 40.0).unwrap();

        let before = paint(w1, h1);
        let after = paint(w2, h2);

        for ((p1, _, c1), (p2, _, c2)) in before.markers().zip(after.markers()) {
            let fx1 = (p1.x - g1.margin) / g1.plot_width();
            let fx2 = (p2.x - g2.margin) / g2.plot_width();
            let fy1 = (g1.height - g1.margin - p1.y) / g1.plot_height();
            let fy2 = (g2.height - g2.margin - p2.y) / g2.plot_height();

            prop_assert!((fx1 - fx2).abs() < 1e-9);
            prop_assert!((fy1 - fy2).abs() < 1e-9);
            prop_assert_eq!(c1, c2);
        }
    }
}

#[test]
fn highlight_follows_seeded_anomaly() {
    let params = SurfaceParams {
        anomaly: None,
        ..Default::default()
    };
    let mut rt = Runtime::new();
    let mut renderer = SurfaceRenderer::new(params, SurfaceStyle::default())
        .with_predicate(volarb::surface::DislocationPredicate::new(DislocationConfig::default()));
    let mut list = DisplayList::new();

    let outcome = renderer.mount(&mut rt, Some(Size::new(800.0, 400.0)), Some(&mut list));
    assert_eq!(outcome, PaintOutcome::Painted { markers: 121, highlights: 0 });
    assert!(!list.texts().any(|t| t == "Arbitrage"));
}
