// Integration tests for the seal classifier over synthetic hands.

use glam::{Vec2, Vec3};
use handseal_core::landmarks::{INDEX_TIP, MIDDLE_TIP, WRIST};
use handseal_core::synth::{seal_at, seal_hand, HandShape};
use handseal_core::{classify, normalized_proximity, Hand, PoseConfig, PoseDetection};

fn cfg() -> PoseConfig {
    PoseConfig::default()
}

#[test]
fn coincident_tips_give_full_confidence() {
    for (anchor, size) in [
        (Vec2::new(0.5, 0.5), 0.3),
        (Vec2::new(0.2, 0.3), 0.15),
        (Vec2::new(0.8, 0.4), 0.5),
    ] {
        let det = classify(&[seal_at(anchor, size, 0.0)], &cfg());
        assert!(det.detected);
        assert_eq!(det.confidence, 1.0);
        assert_eq!(det.proximity, Some(0.0));
    }
}

#[test]
fn at_or_above_threshold_never_detects() {
    // gap is a fraction of size; proximity is gap over the wrist-to-tip span
    for gap in [0.143, 0.15, 0.2, 0.4, 0.8] {
        for shape in [HandShape::Seal { gap }, HandShape::Open] {
            let hand = seal_hand(shape, Vec2::new(0.5, 0.8), 0.3);
            let p = normalized_proximity(&hand, &cfg()).unwrap();
            if p >= 0.15 {
                assert!(!classify(&[hand], &cfg()).detected, "p = {p}");
            }
        }
    }
    // exactly at the threshold, built by hand
    let mut hand = seal_at(Vec2::new(0.5, 0.5), 0.3, 0.0);
    let wrist = hand.landmarks[WRIST];
    let tip = hand.landmarks[MIDDLE_TIP];
    let d_ref = wrist.truncate().distance(tip.truncate());
    hand.landmarks[INDEX_TIP] = tip + Vec3::new(0.0, 0.0, d_ref * 0.15);
    let p = normalized_proximity(&hand, &cfg()).unwrap();
    assert!(p >= 0.15 || (0.15 - p) < 1e-6);
    if p >= 0.15 {
        assert_eq!(classify(&[hand], &cfg()), PoseDetection::NONE);
    }
}

#[test]
fn confidence_falls_as_tips_separate() {
    let mut prev = f32::INFINITY;
    let mut prev_p = -1.0;
    for i in 0..=30 {
        let gap = i as f32 * 0.01;
        let hand = seal_hand(HandShape::Seal { gap }, Vec2::new(0.5, 0.8), 0.3);
        let p = normalized_proximity(&hand, &cfg()).unwrap();
        assert!(p > prev_p);
        prev_p = p;
        let det = classify(&[hand], &cfg());
        assert!(det.confidence <= prev);
        assert!((0.0..=1.0).contains(&det.confidence));
        if p >= 0.15 {
            assert_eq!(det.confidence, 0.0);
        }
        prev = det.confidence;
    }
    assert_eq!(prev, 0.0);
}

#[test]
fn first_qualifying_hand_wins() {
    let left = seal_at(Vec2::new(0.3, 0.5), 0.3, 0.05);
    let right = seal_at(Vec2::new(0.7, 0.5), 0.3, 0.0);
    let det = classify(&[left.clone(), right.clone()], &cfg());
    assert_eq!(det.hand_index, Some(0));
    assert!((det.anchor.unwrap() - Vec2::new(0.3, 0.5)).length() < 1e-5);

    let det = classify(&[right, left], &cfg());
    assert_eq!(det.hand_index, Some(0));
    assert!((det.anchor.unwrap() - Vec2::new(0.7, 0.5)).length() < 1e-5);
}

#[test]
fn non_qualifying_hands_are_skipped_in_order() {
    let open = seal_hand(HandShape::Open, Vec2::new(0.2, 0.8), 0.3);
    let seal = seal_at(Vec2::new(0.6, 0.4), 0.3, 0.0);
    let det = classify(&[open, seal], &cfg());
    assert_eq!(det.hand_index, Some(1));
}

#[test]
fn absent_or_short_input_is_no_detection() {
    assert_eq!(classify(&[], &cfg()), PoseDetection::NONE);
    let short = Hand::new(vec![Vec3::ZERO; 12], None);
    assert_eq!(classify(&[short], &cfg()), PoseDetection::NONE);
    let mut nan = seal_at(Vec2::splat(0.5), 0.3, 0.0);
    nan.landmarks[WRIST] = Vec3::new(f32::NAN, 0.5, 0.0);
    assert_eq!(classify(&[nan], &cfg()), PoseDetection::NONE);
}

#[test]
fn detection_is_independent_of_hand_scale() {
    let small = seal_at(Vec2::splat(0.5), 0.1, 0.05);
    let large = seal_at(Vec2::splat(0.5), 0.6, 0.05);
    let a = classify(&[small], &cfg());
    let b = classify(&[large], &cfg());
    assert!(a.detected && b.detected);
    assert!((a.confidence - b.confidence).abs() < 1e-4);
}
