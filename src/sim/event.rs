/// Events emitted by the tick step, consumed by the loop for logging.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    RockHit { x: i32 },
    LightningStrike { x: i32, y: i32 },
    PlayerDied { tick: u64 },
    Respawned,
    DelayChanged { ms: u64 },
    ExitRequested,
}
