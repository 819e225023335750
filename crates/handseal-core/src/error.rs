use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("hand has {got} landmarks, expected at least {need}")]
    TooFewPoints { got: usize, need: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{key}`: could not parse {value:?} as {expected}")]
    Parse {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("proximity threshold must be in (0, 1), got {0}")]
    Threshold(f32),
    #[error("required hand count must be at least 1")]
    HandCount,
    #[error("landmark index {0} is out of range (0..21)")]
    LandmarkIndex(usize),
    #[error("finger tips must be two distinct non-wrist landmarks, got {0} and {1}")]
    FingerTips(usize, usize),
    #[error("unknown trigger policy {0:?} (expected `dwell` or `edge`)")]
    Policy(String),
}
