use std::fmt;

pub const MIN_POINTS: i64 = 10;
pub const MAX_POINTS: i64 = 50;
const LEVELS: i64 = 5;

/// Streak bonus grows 10% per day and caps at 50%.
const STREAK_BONUS_PERCENT_PER_DAY: i64 = 10;
const STREAK_BONUS_CAP_PERCENT: i64 = 50;

/// Difficulty rating derived from a challenge's point value, 1 (Easy) to 5 (Expert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy = 1,
    Moderate = 2,
    Challenging = 3,
    Hard = 4,
    Expert = 5,
}

impl Difficulty {
    /// Clamp to [10, 50] and split that range into five equal-width bins.
    pub fn from_points(points: i64) -> Self {
        let clamped = points.clamp(MIN_POINTS, MAX_POINTS);
        let bin = (clamped - MIN_POINTS) * LEVELS / (MAX_POINTS - MIN_POINTS);
        match (1 + bin).min(LEVELS) {
            1 => Self::Easy,
            2 => Self::Moderate,
            3 => Self::Challenging,
            4 => Self::Hard,
            _ => Self::Expert,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Challenging => "Challenging",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/5)", self.label(), self.level())
    }
}

/// Points the server would award for a challenge at the given streak.
///
/// The backend multiplies the base value by `1 + min(streak * 0.1, 0.5)` and
/// truncates. This is a preview only; the completion response is authoritative.
/// Results beyond the `i64` range saturate.
pub fn projected_award(points: i64, streak: u32) -> i64 {
    let percent = (i64::from(streak) * STREAK_BONUS_PERCENT_PER_DAY).min(STREAK_BONUS_CAP_PERCENT);
    let award = i128::from(points) * i128::from(100 + percent) / 100;
    award.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
