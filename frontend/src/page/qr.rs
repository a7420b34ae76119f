//! 微信扫码登录面板状态机
//!
//! `Hidden → Showing → {Scanned | Expired} → Hidden / 刷新`
//!
//! 每次打开都会递增 `generation`，异步返回的票据或轮询结果
//! 携带发起时的 generation，过期的结果直接丢弃。

use super::timer::Scheduler;
use authdesk_shared::{AuthConfig, PLACEHOLDER_QR_IMAGE, QrStatus, QrTicket, Session};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrPhase {
    #[default]
    Hidden,
    Showing,
    Scanned,
    Expired,
}

impl QrPhase {
    pub fn hint(&self) -> &'static str {
        match self {
            QrPhase::Hidden => "",
            QrPhase::Showing => "请使用微信扫一扫登录",
            QrPhase::Scanned => "扫描成功，请在微信中确认登录",
            QrPhase::Expired => "二维码已失效",
        }
    }
}

/// 轮询间隔与过期时长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrTiming {
    pub poll: Duration,
    pub expiry: Duration,
}

impl From<&AuthConfig> for QrTiming {
    fn from(config: &AuthConfig) -> Self {
        Self {
            poll: config.qr_poll_interval.into(),
            expiry: config.qr_expiry.into(),
        }
    }
}

pub struct QrSession<H> {
    phase: QrPhase,
    image: String,
    ticket: Option<String>,
    generation: u64,
    poll: Option<H>,
    expiry: Option<H>,
    /// 上一次轮询尚未返回
    polling: bool,
}

impl<H> QrSession<H> {
    pub fn new() -> Self {
        Self {
            phase: QrPhase::Hidden,
            image: String::new(),
            ticket: None,
            generation: 0,
            poll: None,
            expiry: None,
            polling: false,
        }
    }

    pub fn phase(&self) -> QrPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != QrPhase::Hidden
    }

    pub fn is_expired(&self) -> bool {
        self.phase == QrPhase::Expired
    }

    pub fn is_scanned(&self) -> bool {
        self.phase == QrPhase::Scanned
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    #[cfg(test)]
    pub fn has_poll_timer(&self) -> bool {
        self.poll.is_some()
    }

    #[cfg(test)]
    pub fn has_expiry_timer(&self) -> bool {
        self.expiry.is_some()
    }

    /// 打开（或刷新）面板
    ///
    /// 先取消旧的轮询与过期定时器，再创建新的。返回本次的 generation。
    pub fn open<S>(
        &mut self,
        scheduler: &S,
        timing: QrTiming,
        on_poll: Box<dyn Fn()>,
        on_expire: Box<dyn FnOnce()>,
    ) -> u64
    where
        S: Scheduler<Handle = H>,
    {
        self.cancel_timers();
        self.generation += 1;
        self.phase = QrPhase::Showing;
        self.image = PLACEHOLDER_QR_IMAGE.to_string();
        self.ticket = None;
        self.poll = Some(scheduler.every(timing.poll, on_poll));
        self.expiry = Some(scheduler.after(timing.expiry, on_expire));
        self.generation
    }

    /// 票据到达，替换占位图
    pub fn attach_ticket(&mut self, generation: u64, ticket: QrTicket) -> bool {
        if generation != self.generation || !self.is_polling_phase() {
            return false;
        }
        self.image = ticket.image_url;
        self.ticket = Some(ticket.ticket);
        true
    }

    /// 开始一次轮询，返回本次的 generation 与票据
    ///
    /// 票据未到、面板不在轮询阶段或上一次轮询未返回时跳过。
    pub fn begin_poll(&mut self) -> Option<(u64, String)> {
        if self.polling || !self.is_polling_phase() {
            return None;
        }
        let ticket = self.ticket.clone()?;
        self.polling = true;
        Some((self.generation, ticket))
    }

    /// 轮询返回（无论成败）
    pub fn end_poll(&mut self, generation: u64) {
        if generation == self.generation {
            self.polling = false;
        }
    }

    /// 票据申请失败，按过期处理以便用户刷新
    pub fn fail(&mut self, generation: u64) {
        if generation == self.generation {
            self.expire();
        }
    }

    /// 过期：停止轮询，保留面板
    pub fn expire(&mut self) {
        if self.phase == QrPhase::Hidden {
            return;
        }
        self.cancel_timers();
        self.phase = QrPhase::Expired;
        self.ticket = None;
    }

    /// 应用一次轮询结果，确认登录时返回会话
    pub fn apply_status(&mut self, generation: u64, status: QrStatus) -> Option<Session> {
        if generation != self.generation || !self.is_polling_phase() {
            return None;
        }
        match status {
            QrStatus::Pending => None,
            QrStatus::Scanned => {
                self.phase = QrPhase::Scanned;
                None
            }
            QrStatus::Confirmed { session } => {
                self.close();
                Some(session)
            }
            QrStatus::Expired => {
                self.expire();
                None
            }
        }
    }

    /// 隐藏面板并取消全部定时器
    pub fn close(&mut self) {
        self.cancel_timers();
        self.phase = QrPhase::Hidden;
        self.image.clear();
        self.ticket = None;
    }

    fn is_polling_phase(&self) -> bool {
        matches!(self.phase, QrPhase::Showing | QrPhase::Scanned)
    }

    fn cancel_timers(&mut self) {
        self.poll = None;
        self.expiry = None;
        self.polling = false;
    }
}

impl<H> Default for QrSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::timer::tests::{ManualHandle, ManualScheduler};
    use authdesk_shared::UserProfile;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Shared = Rc<RefCell<QrSession<ManualHandle>>>;

    fn timing() -> QrTiming {
        QrTiming::from(&AuthConfig::default())
    }

    fn open(session: &Shared, scheduler: &ManualScheduler, polls: &Rc<RefCell<u32>>) -> u64 {
        let weak = Rc::downgrade(session);
        let counter = Rc::clone(polls);
        session.borrow_mut().open(
            scheduler,
            timing(),
            Box::new(move || *counter.borrow_mut() += 1),
            Box::new(move || {
                if let Some(s) = weak.upgrade() {
                    s.borrow_mut().expire();
                }
            }),
        )
    }

    fn ticket(id: &str) -> QrTicket {
        QrTicket {
            ticket: id.into(),
            image_url: format!("https://img.example.com/{id}.png"),
        }
    }

    fn user_session() -> Session {
        Session {
            token: "wx-token".into(),
            user: UserProfile {
                id: "7".into(),
                username: "wx_user".into(),
                phone: None,
                avatar_url: None,
            },
        }
    }

    #[test]
    fn test_open_shows_placeholder_and_starts_both_timers() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let generation = open(&session, &scheduler, &polls);
        assert_eq!(generation, 1);

        let s = session.borrow();
        assert_eq!(s.phase(), QrPhase::Showing);
        assert_eq!(s.image(), PLACEHOLDER_QR_IMAGE);
        assert!(s.has_poll_timer() && s.has_expiry_timer());
        assert_eq!(scheduler.interval_periods(), vec![Duration::from_secs(2)]);
        assert_eq!(scheduler.pending_timeouts(), 1);
    }

    #[test]
    fn test_refresh_never_duplicates_timers() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        open(&session, &scheduler, &polls);
        open(&session, &scheduler, &polls);
        open(&session, &scheduler, &polls);

        assert_eq!(scheduler.active_intervals(), 1);
        assert_eq!(scheduler.pending_timeouts(), 1);
        assert_eq!(scheduler.cancelled(), 4);

        scheduler.tick_intervals();
        assert_eq!(*polls.borrow(), 1);
    }

    #[test]
    fn test_expiry_stops_polling() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        open(&session, &scheduler, &polls);
        scheduler.fire_timeouts();

        assert!(session.borrow().is_expired());
        assert!(!session.borrow().has_poll_timer());
        assert_eq!(scheduler.active(), 0);

        scheduler.tick_intervals();
        assert_eq!(*polls.borrow(), 0);
    }

    #[test]
    fn test_close_clears_timers() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        open(&session, &scheduler, &polls);
        session.borrow_mut().close();
        assert_eq!(session.borrow().phase(), QrPhase::Hidden);
        assert_eq!(scheduler.active(), 0);

        // 关闭后再次关闭是无害的
        session.borrow_mut().close();
        assert_eq!(scheduler.cancelled(), 2);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let first = open(&session, &scheduler, &polls);
        let second = open(&session, &scheduler, &polls);

        assert!(!session.borrow_mut().attach_ticket(first, ticket("old")));
        assert_eq!(session.borrow().ticket(), None);

        assert!(session.borrow_mut().attach_ticket(second, ticket("new")));
        assert_eq!(session.borrow().ticket(), Some("new"));
        assert_eq!(session.borrow().image(), "https://img.example.com/new.png");
    }

    #[test]
    fn test_poll_status_transitions() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let generation = open(&session, &scheduler, &polls);
        session.borrow_mut().attach_ticket(generation, ticket("t"));

        assert_eq!(session.borrow_mut().apply_status(generation, QrStatus::Pending), None);
        assert_eq!(session.borrow().phase(), QrPhase::Showing);

        assert_eq!(session.borrow_mut().apply_status(generation, QrStatus::Scanned), None);
        assert!(session.borrow().is_scanned());

        let confirmed = session.borrow_mut().apply_status(
            generation,
            QrStatus::Confirmed {
                session: user_session(),
            },
        );
        assert_eq!(confirmed, Some(user_session()));
        assert_eq!(session.borrow().phase(), QrPhase::Hidden);
        assert_eq!(scheduler.active(), 0);
    }

    #[test]
    fn test_server_expiry_and_stale_poll() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let first = open(&session, &scheduler, &polls);
        let second = open(&session, &scheduler, &polls);

        // 上一轮的过期结果不影响当前面板
        session.borrow_mut().apply_status(first, QrStatus::Expired);
        assert_eq!(session.borrow().phase(), QrPhase::Showing);

        session.borrow_mut().apply_status(second, QrStatus::Expired);
        assert!(session.borrow().is_expired());
        assert_eq!(scheduler.active(), 0);

        // 过期后的确认结果被丢弃
        let late = session.borrow_mut().apply_status(
            second,
            QrStatus::Confirmed {
                session: user_session(),
            },
        );
        assert_eq!(late, None);
    }

    #[test]
    fn test_ticket_failure_expires_panel() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let generation = open(&session, &scheduler, &polls);
        session.borrow_mut().fail(generation);
        assert!(session.borrow().is_expired());
        assert_eq!(scheduler.active(), 0);
    }

    #[test]
    fn test_overlapping_polls_are_skipped() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let generation = open(&session, &scheduler, &polls);
        // 票据未到，不发起轮询
        assert_eq!(session.borrow_mut().begin_poll(), None);

        session.borrow_mut().attach_ticket(generation, ticket("t"));
        assert_eq!(
            session.borrow_mut().begin_poll(),
            Some((generation, "t".to_string()))
        );
        assert!(session.borrow().is_polling());

        // 上一次尚未返回，下一个 tick 跳过
        assert_eq!(session.borrow_mut().begin_poll(), None);

        session.borrow_mut().end_poll(generation);
        assert!(!session.borrow().is_polling());
        assert!(session.borrow_mut().begin_poll().is_some());
    }

    #[test]
    fn test_refresh_releases_stuck_poll() {
        let scheduler = ManualScheduler::new();
        let session: Shared = Rc::new(RefCell::new(QrSession::new()));
        let polls = Rc::new(RefCell::new(0));

        let first = open(&session, &scheduler, &polls);
        session.borrow_mut().attach_ticket(first, ticket("old"));
        assert!(session.borrow_mut().begin_poll().is_some());

        let second = open(&session, &scheduler, &polls);
        session.borrow_mut().attach_ticket(second, ticket("new"));
        assert_eq!(
            session.borrow_mut().begin_poll(),
            Some((second, "new".to_string()))
        );

        // 旧一轮的返回不会释放新一轮的轮询
        session.borrow_mut().end_poll(first);
        assert!(session.borrow().is_polling());
    }
}
