//! Plain-text views of each screen for the command line.

use std::fmt::Write;

use crate::activity::{streak_progress_percent, ActivityCalendar};
use crate::auth::session::{ScreenStack, UserSession};
use crate::challenges::{ChallengeBoard, ChallengeSource, ToggleOutcome};
use crate::leaderboard::RankedTeam;
use crate::models::Challenge;
use crate::rewards::{Eligibility, RedeemOutcome, RewardsLedger, SkipReason};

const BAR_WIDTH: usize = 20;

fn progress_bar(percent: u32) -> String {
    let filled = (percent as usize * BAR_WIDTH / 100).min(BAR_WIDTH);
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled), percent)
}

pub fn session(session: &UserSession) -> String {
    let screen = match session.stack() {
        ScreenStack::Loading => "loading",
        ScreenStack::Auth => "sign in / sign up",
        ScreenStack::TeamOnboarding => "join or create a team",
        ScreenStack::Main => "home",
    };
    format!("Showing: {}", screen)
}

fn challenge_line(out: &mut String, challenge: &Challenge, processing: bool) {
    let mark = if processing {
        "[..]"
    } else if challenge.completed {
        "[x]"
    } else {
        "[ ]"
    };
    let _ = writeln!(
        out,
        "  {} {:<20} {:>3} pts  {:<12} {}  (id {})",
        mark,
        challenge.name,
        challenge.points,
        challenge.category,
        challenge.difficulty(),
        challenge.id
    );
    if !challenge.description.is_empty() {
        let _ = writeln!(out, "        {}", challenge.description);
    }
}

pub fn challenges(board: &ChallengeBoard) -> String {
    let mut out = String::new();
    if board.source() == ChallengeSource::Fallback {
        out.push_str("(offline: showing sample challenges)\n");
    }
    let sections = board.sections();
    let _ = writeln!(out, "Daily Challenges ({})", sections.pending.len());
    for challenge in &sections.pending {
        challenge_line(&mut out, challenge, board.is_processing(&challenge.id));
    }
    let _ = writeln!(out, "Completed ({})", sections.completed.len());
    for challenge in &sections.completed {
        challenge_line(&mut out, challenge, board.is_processing(&challenge.id));
    }
    out
}

pub fn toggle(outcome: &ToggleOutcome) -> String {
    match outcome {
        ToggleOutcome::Ignored => "Already updating this challenge.".to_string(),
        ToggleOutcome::Synced { completed, receipt } => {
            let mut line = if *completed {
                "Challenge completed.".to_string()
            } else {
                "Challenge marked as not done.".to_string()
            };
            if let Some(points) = receipt.as_ref().and_then(|r| r.points_earned) {
                let _ = write!(line, " +{} points", points);
            }
            line
        }
        ToggleOutcome::Diverged { .. } => {
            "Challenge status updated locally. Server sync may have failed.".to_string()
        }
        ToggleOutcome::RolledBack { error, .. } => {
            format!("Could not update challenge: {}", error)
        }
    }
}

pub fn activity(calendar: &ActivityCalendar) -> String {
    let mut out = String::new();
    let marked = calendar.marked_dates();
    if marked.is_empty() {
        out.push_str("No activity yet.\n");
        return out;
    }

    let _ = writeln!(out, "Active days:");
    for date in &marked {
        let _ = writeln!(out, "  * {}", date);
    }

    if let Some(date) = calendar.selected_date() {
        let _ = writeln!(out, "Activity on {}:", date);
        match calendar.selected_activity() {
            Some(record) => {
                let _ = writeln!(
                    out,
                    "  {}  {}",
                    record.activity,
                    progress_bar(streak_progress_percent(record.streak))
                );
            }
            None => out.push_str("  nothing logged\n"),
        }
    }

    let _ = writeln!(out, "Recent:");
    for record in calendar.records() {
        let _ = writeln!(
            out,
            "  {}  {:<20} {} day streak  {}",
            record.date,
            record.activity,
            record.streak,
            progress_bar(streak_progress_percent(record.streak))
        );
    }
    out
}

pub fn rewards(ledger: &RewardsLedger) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "You have {} points", ledger.balance());
    for view in ledger.views() {
        let status = reward_status(view.eligibility);
        let _ = writeln!(
            out,
            "  {:<24} {:>6} pts  {}",
            view.reward.name, view.reward.points_required, status
        );
    }
    out
}

fn reward_status(eligibility: Eligibility) -> String {
    match eligibility {
        Eligibility::Eligible => "redeemable".to_string(),
        Eligibility::AlreadyRedeemed => "redeemed".to_string(),
        Eligibility::InsufficientPoints { balance, cost } => {
            format!("need {} more", cost.saturating_sub(balance))
        }
    }
}

pub fn redeem(name: &str, outcome: &RedeemOutcome) -> String {
    match outcome {
        RedeemOutcome::Redeemed { remaining_points } => format!(
            "Successfully redeemed {}. Remaining points: {}",
            name, remaining_points
        ),
        RedeemOutcome::Skipped(SkipReason::AlreadyRedeemed) => {
            format!("{} has already been redeemed.", name)
        }
        RedeemOutcome::Skipped(SkipReason::InsufficientPoints { balance, cost }) => format!(
            "Not enough points to redeem {} ({} of {}).",
            name, balance, cost
        ),
    }
}

pub fn leaderboard(ranked: &[RankedTeam<'_>]) -> String {
    let mut out = String::from("Leaderboard\n");
    if ranked.is_empty() {
        out.push_str("  no teams yet\n");
    }
    for team in ranked {
        let _ = writeln!(out, "  {:>3}. {:<24} {:>6} pts", team.rank, team.name, team.score);
    }
    out
}
