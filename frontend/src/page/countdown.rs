//! 验证码重发倒计时

use super::timer::Scheduler;
use authdesk_shared::DurationSecs;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// 发送状态 + 每秒递减的倒计时
///
/// `ticker` 仅在倒计时大于零时存在。
pub struct Countdown<H> {
    remaining: u64,
    sending: bool,
    ticker: Option<H>,
}

impl<H> Countdown<H> {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            sending: false,
            ticker: None,
        }
    }

    #[cfg(test)]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    #[cfg(test)]
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// 发送按钮是否可用
    pub fn can_send(&self) -> bool {
        !self.sending && self.remaining == 0
    }

    /// 标记发送中，不可发送时返回 `false`
    pub fn begin_send(&mut self) -> bool {
        if !self.can_send() {
            return false;
        }
        self.sending = true;
        true
    }

    /// 发送失败，恢复按钮
    pub fn abort_send(&mut self) {
        self.sending = false;
    }

    /// 发送成功，开始倒计时
    pub fn start<S>(&mut self, scheduler: &S, duration: DurationSecs, on_tick: Box<dyn Fn()>)
    where
        S: Scheduler<Handle = H>,
    {
        self.sending = false;
        self.ticker = None;
        self.remaining = duration.as_secs();
        if self.remaining > 0 {
            self.ticker = Some(scheduler.every(TICK, on_tick));
        }
    }

    /// 每秒调用一次，归零时释放定时器
    pub fn tick(&mut self) -> u64 {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.ticker = None;
        }
        self.remaining
    }

    pub fn cancel(&mut self) {
        self.ticker = None;
        self.remaining = 0;
        self.sending = false;
    }

    /// 发送按钮文案
    pub fn label(&self) -> String {
        if self.sending {
            "发送中...".to_string()
        } else if self.remaining > 0 {
            format!("{}s 后重发", self.remaining)
        } else {
            "获取验证码".to_string()
        }
    }
}

impl<H> Default for Countdown<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::timer::tests::{ManualHandle, ManualScheduler};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Shared = Rc<RefCell<Countdown<ManualHandle>>>;

    fn start(countdown: &Shared, scheduler: &ManualScheduler, secs: u64) {
        let weak = Rc::downgrade(countdown);
        countdown.borrow_mut().start(
            scheduler,
            DurationSecs::from_secs(secs),
            Box::new(move || {
                if let Some(c) = weak.upgrade() {
                    c.borrow_mut().tick();
                }
            }),
        );
    }

    #[test]
    fn test_send_is_blocked_while_in_flight() {
        let mut countdown: Countdown<ManualHandle> = Countdown::new();
        assert!(countdown.can_send());
        assert!(countdown.begin_send());
        assert!(!countdown.can_send());
        assert!(!countdown.begin_send());
        assert_eq!(countdown.label(), "发送中...");

        countdown.abort_send();
        assert!(countdown.can_send());
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_countdown_runs_to_zero_and_releases_timer() {
        let scheduler = ManualScheduler::new();
        let countdown: Shared = Rc::new(RefCell::new(Countdown::new()));

        assert!(countdown.borrow_mut().begin_send());
        start(&countdown, &scheduler, 3);
        assert!(!countdown.borrow().is_sending());
        assert!(!countdown.borrow().can_send());
        assert_eq!(scheduler.interval_periods(), vec![Duration::from_secs(1)]);

        scheduler.tick_intervals();
        assert_eq!(countdown.borrow().remaining(), 2);
        assert_eq!(countdown.borrow().label(), "2s 后重发");

        scheduler.tick_intervals();
        scheduler.tick_intervals();
        assert_eq!(countdown.borrow().remaining(), 0);
        assert!(!countdown.borrow().is_running());
        assert!(countdown.borrow().can_send());
        assert_eq!(scheduler.active(), 0);
    }

    #[test]
    fn test_restart_replaces_previous_ticker() {
        let scheduler = ManualScheduler::new();
        let countdown: Shared = Rc::new(RefCell::new(Countdown::new()));

        start(&countdown, &scheduler, 60);
        start(&countdown, &scheduler, 60);
        assert_eq!(scheduler.active_intervals(), 1);
        assert_eq!(scheduler.created(), 2);
    }

    #[test]
    fn test_zero_duration_does_not_schedule() {
        let scheduler = ManualScheduler::new();
        let countdown: Shared = Rc::new(RefCell::new(Countdown::new()));

        start(&countdown, &scheduler, 0);
        assert_eq!(scheduler.created(), 0);
        assert!(countdown.borrow().can_send());
    }

    #[test]
    fn test_cancel_clears_everything() {
        let scheduler = ManualScheduler::new();
        let countdown: Shared = Rc::new(RefCell::new(Countdown::new()));

        start(&countdown, &scheduler, 30);
        countdown.borrow_mut().cancel();
        assert_eq!(scheduler.active(), 0);
        assert!(countdown.borrow().can_send());
        assert_eq!(countdown.borrow().label(), "获取验证码");
    }
}
