use crate::scheduling::{
    schedule_context::ScheduleContext, schedule_policy::SchedulePolicy, types::SkipReason,
};

pub struct CandlesReadyPolicy;

impl SchedulePolicy for CandlesReadyPolicy {
    fn should_evaluate(&mut self, ctx: &ScheduleContext<'_>) -> Option<SkipReason> {
        let store = ctx.candle_store;
        if store.is_ready() {
            None
        } else {
            Some(SkipReason::CandlesNotReady {
                have: store.len(),
                need: store.required_records(),
            })
        }
    }
}
