//! Daily cycle: day counter, deployment quota and the next-day prompt.

/// State of the Next Day button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NextDayPrompt {
    /// Normal label; a press either asks for confirmation or ends the day.
    #[default]
    Idle,
    /// The player was warned about unused deployments; the next press ends
    /// the day.
    PendingConfirmation,
}

/// Day counter and deployment quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCycle {
    /// Current day, starting at 1.
    pub current_day: u32,
    /// Deployments spent so far today.
    pub deployments_today: u32,
    /// Daily deployment quota.
    pub max_deployments_per_day: u32,
    /// Food eaten at the end of each day.
    pub daily_food_consumption: u32,
    /// Next Day button state.
    pub prompt: NextDayPrompt,
}

impl DayCycle {
    /// Day 1 with no deployments spent.
    #[must_use]
    pub const fn new(max_deployments_per_day: u32, daily_food_consumption: u32) -> Self {
        Self {
            current_day: 1,
            deployments_today: 0,
            max_deployments_per_day,
            daily_food_consumption,
            prompt: NextDayPrompt::Idle,
        }
    }

    /// Deployments still available today.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_deployments_per_day
            .saturating_sub(self.deployments_today)
    }

    /// True once today's quota is used up.
    #[must_use]
    pub const fn limit_reached(&self) -> bool {
        self.deployments_today >= self.max_deployments_per_day
    }

    /// Spend one deployment.
    pub fn record_deployment(&mut self) {
        self.deployments_today = self.deployments_today.saturating_add(1);
    }

    /// Move to the next day: bump the counter, reset the quota and prompt.
    pub fn advance(&mut self) {
        self.current_day = self.current_day.saturating_add(1);
        self.deployments_today = 0;
        self.prompt = NextDayPrompt::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_day_cycle() {
        let day = DayCycle::new(3, 2);
        assert_eq!(day.current_day, 1);
        assert_eq!(day.remaining(), 3);
        assert!(!day.limit_reached());
        assert_eq!(day.prompt, NextDayPrompt::Idle);
    }

    #[test]
    fn test_quota_and_advance() {
        let mut day = DayCycle::new(2, 2);
        day.record_deployment();
        day.record_deployment();
        assert!(day.limit_reached());
        assert_eq!(day.remaining(), 0);

        day.prompt = NextDayPrompt::PendingConfirmation;
        day.advance();
        assert_eq!(day.current_day, 2);
        assert_eq!(day.deployments_today, 0);
        assert_eq!(day.prompt, NextDayPrompt::Idle);
    }

    #[test]
    fn test_zero_quota_is_always_reached() {
        let day = DayCycle::new(0, 1);
        assert!(day.limit_reached());
        assert_eq!(day.remaining(), 0);
    }
}
