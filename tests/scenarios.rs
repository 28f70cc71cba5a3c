use approx::assert_abs_diff_eq;

use fnalgebra::math::function::affinetransform::AffineTransform;
use fnalgebra::math::function::function::Function;
use fnalgebra::math::function::interpolation::{
    ControlPoint,
    InterpolationOptions,
    interpolate
};
use fnalgebra::math::function::piecewisefunction::PiecewiseFunction;
use fnalgebra::math::function::secondorderode::SecondOrderOde;
use fnalgebra::math::function::trace::Trace;

fn peak_points() -> Vec<ControlPoint> {
    vec![
        ControlPoint::new(1.0, 1.0),
        ControlPoint::new(3.0, 5.0),
        ControlPoint::new(5.0, 1.0),
    ]
}

fn peak(options: InterpolationOptions) -> PiecewiseFunction {
    interpolate(peak_points(), options)
}

#[test]
fn symmetric_peak_is_flat_at_the_top() {
    for options in [InterpolationOptions::default(), InterpolationOptions::new(true, false)] {
        let f = peak(options);
        assert_eq!(f.fx(1.0), 1.0);
        assert_eq!(f.fx(3.0), 5.0);
        assert_eq!(f.fx(5.0), 1.0);
        assert_abs_diff_eq!(f.create_dfx_fn().fx(3.0), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn peak_roots_stay_inside_their_bands() {
    let f = peak(InterpolationOptions::default());
    let roots = f.solve_for(4.5).unwrap();
    assert_eq!(roots.len(), 2);
    assert_abs_diff_eq!(roots[0], 3.0 - 0.5f64.sqrt(), epsilon = 1e-12);
    assert_abs_diff_eq!(roots[1], 3.0 + 0.5f64.sqrt(), epsilon = 1e-12);
    for band in f.bands() {
        if let Some(band_roots) = band.function().solve_for(4.5) {
            let inside = band_roots.iter().filter(|&&x| band.contains(x)).count();
            assert!(inside <= 1);
        }
    }
    assert_eq!(f.solve_for(6.0), None);
}

#[test]
fn spline_integral_is_continuous_and_inverts() {
    let f = peak(InterpolationOptions::default());
    let area = f.create_sfx_fn(0.0);
    // 面積 = 2·(∫1^2 (1 + 4t - t²) + ∫2^3 (5 - (x-3)²)) = 2·(1 + 2 - 1/3 + 5 - 1/3)
    assert_abs_diff_eq!(area.fx(5.0), 2.0 * (22.0 / 3.0), epsilon = 1e-12);
    assert_abs_diff_eq!(f.sfx(5.0, 0.0), area.fx(5.0), epsilon = 1e-12);

    let round_trip = area.create_dfx_fn();
    for point in Trace::new(&f, 1.0, 5.0, 0.125).defined() {
        assert_abs_diff_eq!(round_trip.fx(point.x()), point.y(), epsilon = 1e-6);
    }
}

#[test]
fn affine_wrapped_spline() {
    let wide = AffineTransform::new(Box::new(peak(InterpolationOptions::default())), 0.0, 0.5, 0.0, 2.0);
    assert_eq!(wide.fx(6.0), 10.0);
    assert!(wide.fx(1.0).is_nan());
    let roots = wide.solve_for(9.0).unwrap();
    assert_eq!(roots.len(), 2);
    assert_abs_diff_eq!(roots[0], 2.0 * (3.0 - 0.5f64.sqrt()), epsilon = 1e-12);
    assert_abs_diff_eq!(roots[1], 2.0 * (3.0 + 0.5f64.sqrt()), epsilon = 1e-12);

    let derivative = wide.create_dfx_fn();
    for x in [2.5, 4.0, 6.0, 8.5] {
        assert_abs_diff_eq!(derivative.fx(x), wide.dfx(x), epsilon = 1e-12);
    }
}

#[test]
fn trace_of_spline_skips_outside_points() {
    let f = peak(InterpolationOptions::default());
    let trace = Trace::new(&f, 0.0, 6.0, 0.5);
    assert_eq!(trace.len(), 13);
    let defined: Vec<f64> = trace.defined().map(|p| p.x()).collect();
    assert_eq!(defined.first(), Some(&1.0));
    assert_eq!(defined.last(), Some(&5.0));
    assert_eq!(defined.len(), 9);
}

#[test]
fn spring_damper_mass_in_every_regime() {
    // (k, d) → 過阻尼、欠阻尼、臨界阻尼
    for (stiffness, damping) in [(1.0, 5.0), (4.0, 1.0), (1.0, 2.0)] {
        let ode = SecondOrderOde::spring_damper_mass(stiffness, damping, 1.0, -1.0, -3.0, 0.5);
        assert_eq!(ode.fx(0.0), -1.0);
        assert_eq!(ode.dfx(0.0), -3.0);
        let steady_state = 0.5 / stiffness;
        assert_abs_diff_eq!(ode.fx(80.0), steady_state, epsilon = 1e-6);

        let trace = Trace::new(&ode, 0.0, 10.0, 0.1);
        assert_eq!(trace.defined().count(), trace.len());
    }
}

#[test]
fn nested_boxes_clone_deeply() {
    let f: Box<dyn Function> = Box::new(AffineTransform::identity(Box::new(peak(InterpolationOptions::default()))));
    let mut copy = f.clone();
    copy.add(1.0);
    assert_eq!(f.fx(3.0), 5.0);
    assert_eq!(copy.fx(3.0), 6.0);
}
