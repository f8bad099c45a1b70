use crate::scheduling::{
    schedule_context::ScheduleContext, schedule_policy::SchedulePolicy, types::SkipReason,
};

/// Holds cycles back until the refresh deadline has passed.
pub struct RefreshIntervalPolicy;

impl SchedulePolicy for RefreshIntervalPolicy {
    fn should_evaluate(&mut self, ctx: &ScheduleContext<'_>) -> Option<SkipReason> {
        if ctx.now < ctx.next_refresh {
            return Some(SkipReason::TooSoon {
                remaining: ctx.next_refresh.duration_since(ctx.now),
            });
        }

        None
    }
}
