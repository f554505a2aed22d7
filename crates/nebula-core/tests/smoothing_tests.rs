// Tests for the exponential smoother and the session-level signal state.

use nebula_core::*;

#[test]
fn smooth_is_a_fixed_point_at_the_target() {
    for &x in &[-3.0_f32, 0.0, 0.5, 1.0, 42.0] {
        for &rate in &[0.05_f32, 0.1, 0.5, 1.0] {
            assert_eq!(smooth(x, x, rate), x);
        }
    }
}

#[test]
fn smooth_moves_a_fraction_of_the_gap() {
    let v = smooth(0.0, 1.0, 0.1);
    assert!((v - 0.1).abs() < 1e-6);
    let v = smooth(1.0, 0.0, 0.5);
    assert!((v - 0.5).abs() < 1e-6);
    let v = smooth(0.2, 0.8, 1.0);
    assert!((v - 0.8).abs() < 1e-6);
}

#[test]
fn smoother_starts_neutral() {
    let smoother = SignalSmoother::default();
    let signal = smoother.signal(0.0);
    assert_eq!(signal.expansion, 0.5);
    assert_eq!(signal.rotation, 0.0);
    assert!(!signal.hovering);
}

#[test]
fn smoother_converges_toward_targets() {
    let mut smoother = SignalSmoother::default();
    let target = ControlTarget {
        expansion: 1.0,
        rotation: 0.8,
        hovering: true,
    };
    let mut signal = smoother.signal(0.0);
    for frame in 0..200 {
        signal = smoother.step(target, frame as f32 / 60.0);
    }
    assert!(signal.expansion > 0.99);
    assert!((signal.rotation - 0.8).abs() < 1e-3);
    assert!(signal.hovering);
}

#[test]
fn hover_needs_several_frames_to_switch() {
    let mut smoother = SignalSmoother::default();
    let target = ControlTarget {
        expansion: 0.5,
        rotation: 0.0,
        hovering: true,
    };
    // one detection blip must not flip the regime
    let signal = smoother.step(target, 0.0);
    assert!(!signal.hovering);
    assert!((smoother.hover_level() - 0.05).abs() < 1e-6);

    for _ in 0..40 {
        smoother.step(target, 0.0);
    }
    assert!(smoother.signal(0.0).hovering);

    // and dropping out takes a while as well
    let signal = smoother.step(ControlTarget::NEUTRAL, 0.0);
    assert!(signal.hovering);
}

#[test]
fn expansion_is_clamped_in_the_signal() {
    let mut smoother = SignalSmoother::new(SmoothingRates {
        expansion: 1.0,
        rotation: 1.0,
        hover: 1.0,
    });
    let over = ControlTarget {
        expansion: 1.7,
        rotation: 0.0,
        hovering: false,
    };
    assert_eq!(smoother.step(over, 0.0).expansion, 1.0);
    let under = ControlTarget {
        expansion: -0.4,
        ..over
    };
    assert_eq!(smoother.step(under, 0.0).expansion, 0.0);
}

#[test]
fn negative_elapsed_is_reported_as_zero() {
    let smoother = SignalSmoother::default();
    assert_eq!(smoother.signal(-2.0).elapsed, 0.0);
    assert_eq!(smoother.signal(3.5).elapsed, 3.5);
}

#[test]
fn reset_returns_to_neutral() {
    let mut smoother = SignalSmoother::default();
    let target = ControlTarget {
        expansion: 0.0,
        rotation: 2.0,
        hovering: true,
    };
    for _ in 0..50 {
        smoother.step(target, 0.0);
    }
    smoother.reset();
    assert_eq!(smoother.expansion(), 0.5);
    assert_eq!(smoother.rotation(), 0.0);
    assert_eq!(smoother.hover_level(), 0.0);
}

#[test]
fn rotation_is_not_wrapped() {
    let mut smoother = SignalSmoother::new(SmoothingRates {
        expansion: 0.1,
        rotation: 1.0,
        hover: 0.05,
    });
    let target = ControlTarget {
        expansion: 0.5,
        rotation: 7.0,
        hovering: false,
    };
    let signal = smoother.step(target, 0.0);
    assert!((signal.rotation - 7.0).abs() < 1e-6);
}
