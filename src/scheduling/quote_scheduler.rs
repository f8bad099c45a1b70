use crate::scheduling::{
    policies::{candles_ready_policy::CandlesReadyPolicy, refresh_interval_policy::RefreshIntervalPolicy},
    schedule_context::ScheduleContext,
    schedule_policy::SchedulePolicy,
    types::ScheduleDecision,
};

pub struct QuoteScheduler {
    policies: Vec<Box<dyn SchedulePolicy + Send>>,
}

impl Default for QuoteScheduler {
    fn default() -> Self {
        Self::new(vec![
            Box::new(RefreshIntervalPolicy),
            Box::new(CandlesReadyPolicy),
        ])
    }
}

impl QuoteScheduler {
    pub fn new(policies: Vec<Box<dyn SchedulePolicy + Send>>) -> Self {
        Self { policies }
    }

    /// First policy to object wins.
    pub fn decide(&mut self, context: &ScheduleContext<'_>) -> ScheduleDecision {
        for policy in self.policies.iter_mut() {
            if let Some(reason) = policy.should_evaluate(context) {
                return ScheduleDecision::Skip(reason);
            }
        }

        ScheduleDecision::Evaluate
    }
}
