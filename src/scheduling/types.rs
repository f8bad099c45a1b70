use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleDecision {
    Evaluate,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    TooSoon { remaining: Duration },
    CandlesNotReady { have: usize, need: usize },
}
