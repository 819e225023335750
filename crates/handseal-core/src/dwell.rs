//! Dwell/trigger state machine.
//!
//! Turns the noisy per-frame detection signal into at most one trigger per
//! continuous pose episode. Call [`DwellMachine::on_frame`] once per *new*
//! video frame only.

use glam::Vec2;

use crate::pose::PoseDetection;

/// Something that can start an effect episode. Implemented by the effect
/// engine; tests use simple recorders.
pub trait TriggerTarget {
    fn can_trigger(&self) -> bool;
    /// Returns `false` when the trigger was refused.
    fn trigger(&mut self, anchor: Vec2) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPolicy {
    /// Fire once the pose has been held for `hold_ms`. A busy target defers
    /// the trigger rather than dropping it. The first detected frame only
    /// starts the timer, so even `hold_ms: 0.0` fires one frame later than
    /// [`TriggerPolicy::Edge`].
    Dwell { hold_ms: f64 },
    /// Fire on the first frame of every episode. A busy target drops it.
    Edge,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DwellState {
    Idle,
    Charging { started_ms: f64 },
    Fired { started_ms: f64 },
}

/// What a single frame did to the machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DwellEvent {
    /// No pose, nothing in progress.
    Idle,
    /// An episode just began.
    Started,
    /// Still charging.
    Charging,
    /// The target accepted a trigger at this anchor.
    Fired { anchor: Vec2 },
    /// Hold time reached but the target was busy.
    Deferred,
    /// Still held after firing.
    Held,
    /// The pose was lost; the episode is over.
    Released,
}

#[derive(Clone, Debug)]
pub struct DwellMachine {
    policy: TriggerPolicy,
    state: DwellState,
}

impl DwellMachine {
    pub fn new(policy: TriggerPolicy) -> Self {
        Self {
            policy,
            state: DwellState::Idle,
        }
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn state(&self) -> DwellState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = DwellState::Idle;
    }

    /// Start time of the current episode, if any.
    pub fn episode_start(&self) -> Option<f64> {
        match self.state {
            DwellState::Idle => None,
            DwellState::Charging { started_ms } | DwellState::Fired { started_ms } => {
                Some(started_ms)
            }
        }
    }

    pub fn already_fired(&self) -> bool {
        matches!(self.state, DwellState::Fired { .. })
    }

    /// Charge level in \[0, 1\]; 1 once fired.
    pub fn progress(&self, now_ms: f64) -> f32 {
        match (self.state, self.policy) {
            (DwellState::Idle, _) => 0.0,
            (DwellState::Fired { .. }, _) => 1.0,
            (DwellState::Charging { .. }, TriggerPolicy::Edge) => 1.0,
            (DwellState::Charging { started_ms }, TriggerPolicy::Dwell { hold_ms }) => {
                if hold_ms <= 0.0 {
                    1.0
                } else {
                    ((now_ms - started_ms) / hold_ms).clamp(0.0, 1.0) as f32
                }
            }
        }
    }

    pub fn on_frame<T: TriggerTarget + ?Sized>(
        &mut self,
        detection: &PoseDetection,
        now_ms: f64,
        target: &mut T,
    ) -> DwellEvent {
        let anchor = match detection.anchor {
            Some(a) if detection.detected => a,
            _ => {
                return match std::mem::replace(&mut self.state, DwellState::Idle) {
                    DwellState::Idle => DwellEvent::Idle,
                    _ => {
                        log::debug!("[dwell] released");
                        DwellEvent::Released
                    }
                };
            }
        };

        match (self.state, self.policy) {
            (DwellState::Idle, TriggerPolicy::Dwell { .. }) => {
                log::debug!("[dwell] charging at {:.0}ms", now_ms);
                self.state = DwellState::Charging { started_ms: now_ms };
                DwellEvent::Started
            }
            (DwellState::Idle, TriggerPolicy::Edge) => {
                self.state = DwellState::Fired { started_ms: now_ms };
                if target.can_trigger() && target.trigger(anchor) {
                    log::info!("[dwell] edge trigger at ({:.3}, {:.3})", anchor.x, anchor.y);
                    DwellEvent::Fired { anchor }
                } else {
                    log::debug!("[dwell] edge trigger dropped, target busy");
                    DwellEvent::Started
                }
            }
            (DwellState::Charging { started_ms }, TriggerPolicy::Dwell { hold_ms }) => {
                if now_ms - started_ms < hold_ms {
                    return DwellEvent::Charging;
                }
                if !target.can_trigger() || !target.trigger(anchor) {
                    return DwellEvent::Deferred;
                }
                log::info!(
                    "[dwell] held {:.0}ms, trigger at ({:.3}, {:.3})",
                    now_ms - started_ms,
                    anchor.x,
                    anchor.y
                );
                self.state = DwellState::Fired { started_ms };
                DwellEvent::Fired { anchor }
            }
            // Charging only exists under the dwell policy; treat a policy
            // swap mid-episode as already fired.
            (DwellState::Charging { started_ms }, TriggerPolicy::Edge) => {
                self.state = DwellState::Fired { started_ms };
                DwellEvent::Held
            }
            (DwellState::Fired { .. }, _) => DwellEvent::Held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        busy: bool,
        fired: Vec<Vec2>,
    }

    impl TriggerTarget for Recorder {
        fn can_trigger(&self) -> bool {
            !self.busy
        }
        fn trigger(&mut self, anchor: Vec2) -> bool {
            if self.busy {
                return false;
            }
            self.fired.push(anchor);
            true
        }
    }

    fn seen(x: f32) -> PoseDetection {
        PoseDetection {
            detected: true,
            anchor: Some(Vec2::new(x, 0.5)),
            confidence: 1.0,
            proximity: Some(0.0),
            hand_index: Some(0),
        }
    }

    #[test]
    fn fires_with_the_current_frame_anchor() {
        let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 100.0 });
        let mut r = Recorder::default();
        assert_eq!(m.on_frame(&seen(0.1), 0.0, &mut r), DwellEvent::Started);
        assert_eq!(m.on_frame(&seen(0.2), 50.0, &mut r), DwellEvent::Charging);
        let ev = m.on_frame(&seen(0.3), 100.0, &mut r);
        assert_eq!(
            ev,
            DwellEvent::Fired {
                anchor: Vec2::new(0.3, 0.5)
            }
        );
        assert_eq!(r.fired, vec![Vec2::new(0.3, 0.5)]);
    }

    #[test]
    fn busy_target_defers_without_resetting_the_timer() {
        let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 100.0 });
        let mut r = Recorder {
            busy: true,
            ..Default::default()
        };
        m.on_frame(&seen(0.5), 0.0, &mut r);
        assert_eq!(m.on_frame(&seen(0.5), 150.0, &mut r), DwellEvent::Deferred);
        assert_eq!(m.state(), DwellState::Charging { started_ms: 0.0 });
        assert_eq!(m.progress(150.0), 1.0);
        r.busy = false;
        assert!(matches!(
            m.on_frame(&seen(0.5), 160.0, &mut r),
            DwellEvent::Fired { .. }
        ));
        assert_eq!(m.on_frame(&seen(0.5), 500.0, &mut r), DwellEvent::Held);
        assert_eq!(r.fired.len(), 1);
    }

    #[test]
    fn edge_policy_fires_on_first_frame_and_drops_when_busy() {
        let mut m = DwellMachine::new(TriggerPolicy::Edge);
        let mut r = Recorder::default();
        assert!(matches!(
            m.on_frame(&seen(0.5), 0.0, &mut r),
            DwellEvent::Fired { .. }
        ));
        assert_eq!(m.on_frame(&seen(0.5), 16.0, &mut r), DwellEvent::Held);
        assert_eq!(
            m.on_frame(&PoseDetection::NONE, 32.0, &mut r),
            DwellEvent::Released
        );

        r.busy = true;
        assert_eq!(m.on_frame(&seen(0.5), 48.0, &mut r), DwellEvent::Started);
        r.busy = false;
        assert_eq!(m.on_frame(&seen(0.5), 64.0, &mut r), DwellEvent::Held);
        assert_eq!(r.fired.len(), 1);
    }

    #[test]
    fn detection_without_anchor_counts_as_absent() {
        let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 0.0 });
        let mut r = Recorder::default();
        let odd = PoseDetection {
            detected: true,
            ..PoseDetection::NONE
        };
        assert_eq!(m.on_frame(&odd, 0.0, &mut r), DwellEvent::Idle);
        assert_eq!(m.state(), DwellState::Idle);
    }

    #[test]
    fn progress_tracks_elapsed_hold() {
        let mut m = DwellMachine::new(TriggerPolicy::Dwell { hold_ms: 200.0 });
        let mut r = Recorder::default();
        assert_eq!(m.progress(0.0), 0.0);
        m.on_frame(&seen(0.5), 1000.0, &mut r);
        assert!((m.progress(1050.0) - 0.25).abs() < 1e-6);
        assert_eq!(m.episode_start(), Some(1000.0));
        assert!(!m.already_fired());
    }
}
