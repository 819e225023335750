// Integration tests for the dwell machine driven frame by frame, both against
// a recording target and against the real effect engine.

use glam::Vec2;
use handseal_core::{
    DwellEvent, DwellMachine, DwellState, EffectConfig, EffectEngine, ManualClock,
    PoseDetection, TriggerPolicy, TriggerTarget,
};

const HOLD: f64 = 3000.0;
const FRAME: f64 = 1000.0 / 30.0;

#[derive(Default)]
struct Recorder {
    fired: Vec<Vec2>,
}

impl TriggerTarget for Recorder {
    fn can_trigger(&self) -> bool {
        true
    }
    fn trigger(&mut self, anchor: Vec2) -> bool {
        self.fired.push(anchor);
        true
    }
}

fn posed() -> PoseDetection {
    PoseDetection {
        detected: true,
        anchor: Some(Vec2::new(0.4, 0.6)),
        confidence: 0.9,
        proximity: Some(0.015),
        hand_index: Some(0),
    }
}

/// Feed `frames` of `det` starting at `t`, returning the time after the last.
fn feed<T: TriggerTarget>(
    m: &mut DwellMachine,
    target: &mut T,
    det: &PoseDetection,
    mut t: f64,
    frames: usize,
) -> f64 {
    for _ in 0..frames {
        m.on_frame(det, t, target);
        t += FRAME;
    }
    t
}

#[test]
fn held_for_exactly_the_hold_fires_once() {
    let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: HOLD });
    let mut r = Recorder::default();
    assert_eq!(m.on_frame(&posed(), 0.0, &mut r), DwellEvent::Started);
    assert_eq!(m.on_frame(&posed(), HOLD - 1.0, &mut r), DwellEvent::Charging);
    assert!(matches!(
        m.on_frame(&posed(), HOLD, &mut r),
        DwellEvent::Fired { .. }
    ));
    feed(&mut m, &mut r, &posed(), HOLD + FRAME, 200);
    assert_eq!(r.fired.len(), 1);
}

#[test]
fn release_just_short_of_the_hold_needs_a_fresh_full_hold() {
    let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: HOLD });
    let mut r = Recorder::default();
    m.on_frame(&posed(), 0.0, &mut r);
    m.on_frame(&posed(), HOLD - 1.0, &mut r);
    assert_eq!(
        m.on_frame(&PoseDetection::NONE, HOLD, &mut r),
        DwellEvent::Released
    );
    assert_eq!(m.state(), DwellState::Idle);

    let restart = HOLD + 10.0;
    assert_eq!(m.on_frame(&posed(), restart, &mut r), DwellEvent::Started);
    assert_eq!(
        m.on_frame(&posed(), restart + HOLD - 1.0, &mut r),
        DwellEvent::Charging
    );
    assert!(r.fired.is_empty());
    assert!(matches!(
        m.on_frame(&posed(), restart + HOLD, &mut r),
        DwellEvent::Fired { .. }
    ));
    assert_eq!(r.fired.len(), 1);
}

#[test]
fn one_trigger_per_episode_across_many_episodes() {
    let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 500.0 });
    let mut r = Recorder::default();
    let mut t = 0.0;
    for _ in 0..4 {
        t = feed(&mut m, &mut r, &posed(), t, 60);
        t = feed(&mut m, &mut r, &PoseDetection::NONE, t, 5);
    }
    assert_eq!(r.fired.len(), 4);
}

#[test]
fn busy_engine_defers_then_fires_when_free() {
    let clock = ManualClock::new(0.0);
    let mut engine: EffectEngine<ManualClock> = EffectEngine::new(
        clock.clone(),
        EffectConfig::default(),
        Vec2::new(640.0, 480.0),
        3,
    );
    assert!(engine.trigger(Vec2::splat(0.5)));

    let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 200.0 });
    let mut t = 0.0;
    let mut deferred = 0;
    let mut fired = 0;
    // hold the pose for the whole run; the engine finishes its episode meanwhile
    while t < 20_000.0 {
        clock.set(t);
        match m.on_frame(&posed(), t, &mut engine) {
            DwellEvent::Deferred => deferred += 1,
            DwellEvent::Fired { anchor } => {
                fired += 1;
                assert_eq!(anchor, Vec2::new(0.4, 0.6));
            }
            _ => {}
        }
        engine.update();
        t += 1000.0 / 60.0;
    }
    assert!(deferred > 0);
    assert_eq!(fired, 1);
    assert_eq!(engine.anchor(), Some(Vec2::new(0.4, 0.6)));
}

#[test]
fn edge_policy_drops_triggers_while_busy() {
    let clock = ManualClock::new(0.0);
    let mut engine: EffectEngine<ManualClock> =
        EffectEngine::new(clock, EffectConfig::default(), Vec2::new(640.0, 480.0), 3);
    let mut m = DwellMachine::new(TriggerPolicy::Edge);
    assert!(matches!(
        m.on_frame(&posed(), 0.0, &mut engine),
        DwellEvent::Fired { .. }
    ));
    m.on_frame(&PoseDetection::NONE, 10.0, &mut engine);
    // engine still animating: this episode is lost, even after it frees up
    assert_eq!(m.on_frame(&posed(), 20.0, &mut engine), DwellEvent::Started);
    assert!(m.already_fired());
    assert_eq!(m.on_frame(&posed(), 30.0, &mut engine), DwellEvent::Held);
}

#[test]
fn zero_hold_fires_one_frame_after_edge_would() {
    let det = posed();

    let mut dwell = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 0.0 });
    let mut r = Recorder::default();
    assert_eq!(dwell.on_frame(&det, 0.0, &mut r), DwellEvent::Started);
    assert!(r.fired.is_empty());
    assert!(matches!(
        dwell.on_frame(&det, FRAME, &mut r),
        DwellEvent::Fired { .. }
    ));
    assert_eq!(r.fired.len(), 1);

    let mut edge = DwellMachine::new(TriggerPolicy::Edge);
    let mut r = Recorder::default();
    assert!(matches!(edge.on_frame(&det, 0.0, &mut r), DwellEvent::Fired { .. }));
    assert_eq!(r.fired.len(), 1);
}
