//! Runtime options, parsed from a URL query string or `key=value` arguments.

use crate::constants::*;
use crate::dwell::TriggerPolicy;
use crate::effect::EffectConfig;
use crate::error::ConfigError;
use crate::landmarks::{INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, WRIST};
use crate::pose::{FingerJoints, PoseConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyKind {
    Dwell,
    Edge,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub smoothing_factor: f32,
    pub show_debug_overlay: bool,
    pub hold_duration_ms: u32,
    pub trigger_policy: PolicyKind,
    pub required_hand_count: usize,
    pub fingers: [FingerJoints; 2],
    pub proximity_threshold: f32,
    pub mirror: bool,
    pub seed: Option<u64>,
    pub text: [String; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            show_debug_overlay: false,
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            trigger_policy: PolicyKind::Dwell,
            required_hand_count: 1,
            fingers: [
                FingerJoints {
                    tip: INDEX_TIP,
                    pip: INDEX_PIP,
                },
                FingerJoints {
                    tip: MIDDLE_TIP,
                    pip: MIDDLE_PIP,
                },
            ],
            proximity_threshold: PROXIMITY_THRESHOLD,
            mirror: true,
            seed: None,
            text: [
                DEFAULT_TEXT_LINE_1.to_string(),
                DEFAULT_TEXT_LINE_2.to_string(),
            ],
        }
    }
}

impl Config {
    /// Parse `a=1&b=2` (optionally prefixed with `?`) over the defaults and
    /// validate the result. Unknown keys are logged and skipped.
    pub fn from_query(query: &str) -> Result<Self, ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(query.split('&').filter(|s| !s.is_empty()).map(|pair| {
            match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            }
        }))
    }

    /// Same as [`Config::from_query`] for already split pairs, e.g. CLI args.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        for (key, raw) in pairs {
            cfg.apply(key, raw)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        match key {
            "smoothing" => self.smoothing_factor = parse("smoothing", raw, "a number")?,
            "debug" => self.show_debug_overlay = parse_flag("debug", raw)?,
            "hold" => self.hold_duration_ms = parse("hold", raw, "milliseconds")?,
            "policy" => {
                self.trigger_policy = match raw.to_ascii_lowercase().as_str() {
                    "dwell" => PolicyKind::Dwell,
                    "edge" => PolicyKind::Edge,
                    _ => return Err(ConfigError::Policy(raw.to_string())),
                }
            }
            "hands" => self.required_hand_count = parse("hands", raw, "a hand count")?,
            "fingers" => self.fingers = parse_fingers(raw)?,
            "threshold" => self.proximity_threshold = parse("threshold", raw, "a number")?,
            "mirror" => self.mirror = parse_flag("mirror", raw)?,
            "seed" => self.seed = Some(parse("seed", raw, "an unsigned integer")?),
            "line1" => self.text[0] = percent_decode("line1", raw)?,
            "line2" => self.text[1] = percent_decode("line2", raw)?,
            other => log::warn!("[config] ignoring unknown option `{}`", other),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::Smoothing(self.smoothing_factor));
        }
        if !(self.proximity_threshold > 0.0 && self.proximity_threshold < 1.0) {
            return Err(ConfigError::Threshold(self.proximity_threshold));
        }
        if self.required_hand_count == 0 {
            return Err(ConfigError::HandCount);
        }
        for f in &self.fingers {
            for idx in [f.tip, f.pip] {
                if idx >= LANDMARK_COUNT {
                    return Err(ConfigError::LandmarkIndex(idx));
                }
            }
        }
        let (a, b) = (self.fingers[0].tip, self.fingers[1].tip);
        if a == b || a == WRIST || b == WRIST {
            return Err(ConfigError::FingerTips(a, b));
        }
        Ok(())
    }

    pub fn policy(&self) -> TriggerPolicy {
        match self.trigger_policy {
            PolicyKind::Dwell => TriggerPolicy::Dwell {
                hold_ms: f64::from(self.hold_duration_ms),
            },
            PolicyKind::Edge => TriggerPolicy::Edge,
        }
    }

    pub fn pose(&self) -> PoseConfig {
        PoseConfig {
            threshold: self.proximity_threshold,
            fingers: self.fingers,
            required_hands: self.required_hand_count,
        }
    }

    pub fn effect(&self) -> EffectConfig {
        EffectConfig {
            text: self.text.clone(),
            mirror: self.mirror,
        }
    }
}

fn parse<T: std::str::FromStr>(
    key: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Parse {
        key,
        value: raw.to_string(),
        expected,
    })
}

/// Bare `debug` (empty value) counts as on.
fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::Parse {
            key,
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

fn parse_fingers(raw: &str) -> Result<[FingerJoints; 2], ConfigError> {
    let bad = || ConfigError::Parse {
        key: "fingers",
        value: raw.to_string(),
        expected: "tipA,pipA,tipB,pipB",
    };
    let mut it = raw.split(',').map(|s| s.trim().parse::<usize>());
    let mut next = || it.next().and_then(|r| r.ok()).ok_or_else(bad);
    let joints = [
        FingerJoints {
            tip: next()?,
            pip: next()?,
        },
        FingerJoints {
            tip: next()?,
            pip: next()?,
        },
    ];
    if it.next().is_some() {
        return Err(bad());
    }
    Ok(joints)
}

/// `+` is a space as in form encoding; malformed escapes pass through as text.
fn percent_decode(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|text| text.into_owned())
        .map_err(|_| ConfigError::Parse {
            key,
            value: raw.to_string(),
            expected: "percent-encoded UTF-8 text",
        })
}
