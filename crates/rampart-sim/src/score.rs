//! Running score tracked by the engine, outside the ECS world.

/// Counters reported in every snapshot.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_destroyed: u32,
    /// Grunts scheduled for the stage. The wall trap arms once all are down.
    pub enemies_total: u32,
    pub shots_fired: u32,
    pub pickups_collected: u32,
}
