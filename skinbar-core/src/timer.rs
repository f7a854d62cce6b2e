//! Cancellable scheduled callbacks driven by a host clock.
//!
//! Nothing here sleeps. The host reports time through [TimerQueue::advance]
//! and receives the events whose deadline has passed.

use std::time::{Duration, Instant};

/// Handle of a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<E> {
    handle: TimerHandle,
    deadline: Instant,
    event: E,
}

/// Queue of pending events ordered by deadline.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Instant,
    next_handle: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> TimerQueue<E> {
    /// Create an empty queue whose clock starts at `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// The last time reported by the host.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Schedule `event` to fire `delay` after the current clock.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Scheduled {
            handle,
            deadline: self.now + delay,
            event,
        });
        handle
    }

    /// Drop a scheduled event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        before != self.pending.len()
    }

    /// Whether an event is still waiting.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|s| s.handle == handle)
    }

    /// Earliest deadline among pending events.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.deadline).min()
    }

    /// Move the clock forward and return every event that is now due,
    /// ordered by deadline and then by scheduling order.
    pub fn advance(&mut self, now: Instant) -> Vec<(TimerHandle, E)> {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.deadline <= now);
        self.pending = rest;
        due.sort_by_key(|s| (s.deadline, s.handle.0));
        due.into_iter().map(|s| (s.handle, s.event)).collect()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// A single re-armable timer slot.
///
/// Re-arming cancels the previous firing, so the event only fires once the
/// triggering stream pauses for the whole delay.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    armed: Option<TimerHandle>,
}

impl Debounce {
    /// Create an idle slot with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed: None }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `event`, replacing any pending firing.
    pub fn arm<E>(&mut self, queue: &mut TimerQueue<E>, event: E) -> TimerHandle {
        self.cancel(queue);
        let handle = queue.schedule(self.delay, event);
        self.armed = Some(handle);
        handle
    }

    /// Drop the pending firing, if any.
    pub fn cancel<E>(&mut self, queue: &mut TimerQueue<E>) {
        if let Some(handle) = self.armed.take() {
            queue.cancel(handle);
        }
    }

    /// Whether a firing is pending.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Accept a firing. Returns false for stale handles from earlier arms.
    pub fn claim(&mut self, handle: TimerHandle) -> bool {
        if self.armed == Some(handle) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let start = Instant::now();
        let mut queue = TimerQueue::new(start);
        queue.schedule(ms(750), "hide");
        queue.schedule(ms(250), "show");
        queue.schedule(ms(250), "show-again");

        assert!(queue.advance(start + ms(100)).is_empty());
        let fired: Vec<_> = queue.advance(start + ms(800)).into_iter().map(|(_, e)| e).collect();
        assert_eq!(fired, vec!["show", "show-again", "hide"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let start = Instant::now();
        let mut queue = TimerQueue::new(start);
        let handle = queue.schedule(ms(10), ());
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.advance(start + ms(20)).is_empty());
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let start = Instant::now();
        let mut queue: TimerQueue<()> = TimerQueue::new(start + ms(50));
        queue.advance(start);
        assert_eq!(queue.now(), start + ms(50));
    }

    #[test]
    fn test_debounce_rearm_replaces_pending() {
        let start = Instant::now();
        let mut queue = TimerQueue::new(start);
        let mut debounce = Debounce::new(ms(250));

        let first = debounce.arm(&mut queue, 1);
        queue.advance(start + ms(200));
        let second = debounce.arm(&mut queue, 2);
        assert!(!queue.is_pending(first));

        let fired = queue.advance(start + ms(300));
        assert!(fired.is_empty());

        let fired = queue.advance(start + ms(450));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, second);
        assert!(!debounce.claim(first));
        assert!(debounce.claim(second));
        assert!(!debounce.is_armed());
    }
}
