use anyhow::Context;
use glam::Vec2;
use handseal_core::synth::{seal_at, seal_hand, HandShape};
use handseal_core::{
    classify, AnchorSmoother, Clock, Config, DebugOverlay, DwellEvent, DwellMachine, EffectEngine,
    FrameCache, Hands, ManualClock, PolicyKind, RecordingSurface,
};

const DISPLAY_FPS: f64 = 60.0;
const SOURCE_FPS: f64 = 30.0;
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const HAND_SIZE: f32 = 0.32;
const SEAL_GAP: f32 = 0.02;
// Give up if the last episode has not finished by then
const TAIL_LIMIT_MS: f64 = 20_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    /// Nobody in frame, or an open hand.
    Idle,
    /// The seal, drifting slightly around `anchor`.
    Seal { anchor: Vec2 },
}

/// Scripted timeline: `(duration_ms, phase)`.
fn script(hold_ms: f64) -> Vec<(f64, Phase)> {
    vec![
        (1000.0, Phase::Idle),
        (
            hold_ms + 800.0,
            Phase::Seal {
                anchor: Vec2::new(0.42, 0.45),
            },
        ),
        (1000.0, Phase::Idle),
        (
            (hold_ms * 0.5).max(200.0),
            Phase::Seal {
                anchor: Vec2::new(0.6, 0.5),
            },
        ),
    ]
}

fn phase_at(script: &[(f64, Phase)], t_ms: f64) -> Phase {
    let mut start = 0.0;
    for (duration, phase) in script {
        if t_ms < start + duration {
            return *phase;
        }
        start += duration;
    }
    Phase::Idle
}

fn hands_for(phase: Phase, t_ms: f64) -> Hands {
    let mut hands = Hands::new();
    match phase {
        Phase::Idle => {
            // every other second an open hand wanders through
            if (t_ms / 1000.0) as u64 % 2 == 1 {
                hands.push(seal_hand(HandShape::Open, Vec2::new(0.3, 0.85), HAND_SIZE));
            }
        }
        Phase::Seal { anchor } => {
            let wobble = (t_ms as f32 * 0.004).sin() * 0.01;
            hands.push(seal_at(anchor + Vec2::splat(wobble), HAND_SIZE, SEAL_GAP));
        }
    }
    hands
}

#[derive(Debug, Default)]
struct Summary {
    display_frames: u64,
    source_frames: u64,
    triggers: usize,
    deferred: usize,
    max_ops: usize,
    total_ops: usize,
    text_ops: usize,
    episode_ms: Option<f64>,
}

fn run(config: &Config) -> anyhow::Result<Summary> {
    let clock = ManualClock::new(0.0);
    let seed = config.seed.unwrap_or(0x5EA1);
    let mut engine = EffectEngine::new(clock.clone(), config.effect(), VIEWPORT, seed);
    let pose = config.pose();
    let mut dwell = DwellMachine::new(config.policy());
    let mut cache = FrameCache::new();
    let mut smoother = AnchorSmoother::new(config.smoothing_factor);
    let debug = DebugOverlay::new(&pose, config.mirror);
    let mut surface = RecordingSurface::new(VIEWPORT.x, VIEWPORT.y);

    // timed off the configured hold even under edge triggering, so the second
    // pose starts after the first episode is over
    let script = script(config.hold_duration_ms as f64);
    let script_ms: f64 = script.iter().map(|(d, _)| d).sum();

    let mut summary = Summary::default();
    let mut triggered_at = None;
    let display_step = 1000.0 / DISPLAY_FPS;
    let source_step = 1000.0 / SOURCE_FPS;

    loop {
        let t = summary.display_frames as f64 * display_step;
        clock.set(t);
        if t > script_ms && engine.is_complete() {
            break;
        }
        if t > script_ms + TAIL_LIMIT_MS {
            anyhow::bail!("effect still running {:.0}ms after the script ended", TAIL_LIMIT_MS);
        }

        // the landmark source only produces a new frame every other display frame
        let source_ts = (t / source_step).floor() * source_step;
        let phase = phase_at(&script, source_ts);
        let result = cache.process(source_ts, || {
            let hands = hands_for(phase, source_ts);
            let detection = classify(&hands, &pose);
            (hands, detection)
        });

        if result.is_new_frame {
            summary.source_frames += 1;
            let now = clock.now_ms();
            match dwell.on_frame(&result.detection, now, &mut engine) {
                DwellEvent::Fired { anchor } => {
                    summary.triggers += 1;
                    triggered_at = Some(now);
                    log::info!(
                        "[replay] {:>6.0}ms fired at ({:.3}, {:.3}) -> origin ({:.0}, {:.0})",
                        now,
                        anchor.x,
                        anchor.y,
                        engine.origin().x,
                        engine.origin().y
                    );
                }
                DwellEvent::Deferred => summary.deferred += 1,
                ev @ (DwellEvent::Started | DwellEvent::Released) => {
                    log::info!("[replay] {:>6.0}ms {:?}", now, ev);
                }
                DwellEvent::Idle | DwellEvent::Charging | DwellEvent::Held => {}
            }
            smoother.update(result.detection.anchor);
        }

        let was_active = engine.is_active();
        engine.update();
        if was_active && !engine.is_active() {
            let took = triggered_at.map(|s| t - s);
            summary.episode_ms = took;
            log::info!("[replay] {:>6.0}ms episode complete", t);
        }

        surface.clear();
        if config.show_debug_overlay {
            debug.render(
                &mut surface,
                &result.hands,
                &result.detection,
                smoother.value(),
                dwell.progress(clock.now_ms()),
            );
        }
        engine.render(&mut surface);
        summary.max_ops = summary.max_ops.max(surface.ops.len());
        summary.total_ops += surface.ops.len();
        summary.text_ops += surface.texts().len();
        summary.display_frames += 1;
    }
    Ok(summary)
}

fn parse_args() -> anyhow::Result<Config> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut pairs = Vec::with_capacity(args.len());
    for arg in &args {
        let pair = arg
            .split_once('=')
            .with_context(|| format!("expected key=value, got {:?}", arg))?;
        pairs.push(pair);
    }
    Ok(Config::from_pairs(pairs)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args().context("invalid arguments")?;
    log::info!(
        "[replay] policy={:?} hold={}ms threshold={} mirror={}",
        config.trigger_policy,
        config.hold_duration_ms,
        config.proximity_threshold,
        config.mirror
    );

    let summary = run(&config)?;
    log::info!(
        "[replay] {} display frames, {} landmark frames, {} trigger(s), {} deferred",
        summary.display_frames,
        summary.source_frames,
        summary.triggers,
        summary.deferred
    );
    log::info!(
        "[replay] draw ops: {} total, {} max per frame, {} glyph draws",
        summary.total_ops,
        summary.max_ops,
        summary.text_ops
    );
    if let Some(ms) = summary.episode_ms {
        log::info!("[replay] episode lasted {:.0}ms", ms);
    }

    // the short second pose only fires without a dwell requirement
    let expected = match config.trigger_policy {
        PolicyKind::Dwell => 1,
        PolicyKind::Edge => 2,
    };
    if summary.triggers != expected {
        anyhow::bail!("expected {} trigger(s), saw {}", expected, summary.triggers);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_fires_exactly_once() {
        let summary = run(&Config::default()).unwrap();
        assert_eq!(summary.triggers, 1);
        assert!(summary.episode_ms.is_some());
        assert!(summary.text_ops > 0);
        // 30 fps source under a 60 fps display
        let ratio = summary.display_frames as f64 / summary.source_frames as f64;
        assert!((ratio - 2.0).abs() < 0.05, "ratio {ratio}");
    }

    #[test]
    fn edge_policy_fires_on_both_poses() {
        let config = Config::from_query("policy=edge").unwrap();
        let summary = run(&config).unwrap();
        assert_eq!(summary.triggers, 2);
    }

    #[test]
    fn phases_follow_the_script() {
        let s = script(3000.0);
        assert_eq!(phase_at(&s, 0.0), Phase::Idle);
        assert!(matches!(phase_at(&s, 1500.0), Phase::Seal { .. }));
        assert_eq!(phase_at(&s, 5000.0), Phase::Idle);
        assert!(matches!(phase_at(&s, 6000.0), Phase::Seal { .. }));
        assert_eq!(phase_at(&s, 60_000.0), Phase::Idle);
    }
}
