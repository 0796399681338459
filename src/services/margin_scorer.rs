use crate::models::WeekPick;

/// Added whenever the picked side did not win outright. A tie counts as a miss for everyone.
pub const WRONG_WINNER_PENALTY: u32 = 7;

/// Score one prediction against the actual result. Lower is better; 0 is an exact call.
///
/// Both margins are signed, positive for the home side. The distance between them
/// already grows when the wrong side is picked, and the fixed penalty is added on top.
pub fn score_margin(predicted_signed: i32, actual_signed: i32) -> u32 {
    let picked_home = predicted_signed >= 0;
    let winner_home = actual_signed > 0;

    let diff = (i64::from(predicted_signed) - i64::from(actual_signed)).unsigned_abs();
    let diff = u32::try_from(diff).unwrap_or(u32::MAX);
    let wrong_winner = actual_signed == 0 || picked_home != winner_home;

    if wrong_winner {
        diff.saturating_add(WRONG_WINNER_PENALTY)
    } else {
        diff
    }
}

/// Score for a pick once its game has started and has both scores; `None` otherwise.
pub fn score_pick(pick: &WeekPick) -> Option<u32> {
    pick.actual_margin()
        .map(|actual| score_margin(pick.signed_margin(), actual))
}
