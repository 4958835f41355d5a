use crate::domain::model::{CalculationInput, CalculationResult};
use crate::utils::error::{Result, SplitError};

/// Splits the session cost evenly across `input.players`.
///
/// Players must already be filtered (see [`CalculationInput::with_named_players`]);
/// an empty list fails with [`SplitError::InvalidPlayerCount`]. No rounding is
/// applied here.
pub fn calculate(input: &CalculationInput) -> Result<CalculationResult> {
    let player_count = input.players.len();
    if player_count == 0 {
        return Err(SplitError::InvalidPlayerCount);
    }

    let court_cost = input.hourly_rate * input.duration;
    let shuttlecock_cost = input.shuttlecock_price * f64::from(input.shuttlecock_used);
    let total_cost = court_cost + shuttlecock_cost;
    let cost_per_person = total_cost / player_count as f64;

    tracing::debug!(
        "Cost split: court={} shuttlecock={} total={} players={} per_person={}",
        court_cost,
        shuttlecock_cost,
        total_cost,
        player_count,
        cost_per_person
    );

    Ok(CalculationResult {
        court_cost,
        shuttlecock_cost,
        total_cost,
        player_count,
        cost_per_person,
    })
}
