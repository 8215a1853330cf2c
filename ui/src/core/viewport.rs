//! Viewport-size broadcast shared by every chart on a page.
//!
//! The app root owns one [`ViewportNotifier`] and provides it through context.
//! Charts subscribe on mount and hold the returned [`ViewportSubscription`];
//! dropping it (component teardown) unsubscribes. Listeners only read sizes,
//! so the notifier needs no write discipline beyond the single owner that
//! publishes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }

    /// Breakpoint, or `None` while the viewport has no drawable area.
    pub fn usable_breakpoint(&self) -> Option<Breakpoint> {
        (self.width >= 1.0 && self.height >= 1.0).then(|| self.breakpoint())
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Width buckets. Charts only re-render when the bucket changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
}

impl Breakpoint {
    pub const MEDIUM_MIN: f64 = 600.0;
    pub const WIDE_MIN: f64 = 1024.0;

    pub fn for_width(width: f64) -> Self {
        if width >= Self::WIDE_MIN {
            Self::Wide
        } else if width >= Self::MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Compact
        }
    }

    /// Edge length of a chart's square drawing area at this breakpoint.
    pub fn chart_size(self) -> f64 {
        match self {
            Self::Compact => 260.0,
            Self::Medium => 320.0,
            Self::Wide => 380.0,
        }
    }
}

type Listener = Rc<dyn Fn(ViewportSize)>;

struct Inner {
    current: ViewportSize,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Clone)]
pub struct ViewportNotifier {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for ViewportNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ViewportNotifier")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl PartialEq for ViewportNotifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for ViewportNotifier {
    fn default() -> Self {
        Self::new(ViewportSize::default())
    }
}

impl ViewportNotifier {
    pub fn new(initial: ViewportSize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn current(&self) -> ViewportSize {
        self.inner.borrow().current
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn subscribe(&self, listener: impl Fn(ViewportSize) + 'static) -> ViewportSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        ViewportSubscription {
            id,
            notifier: Rc::downgrade(&self.inner),
        }
    }

    /// Record `size` and broadcast it. Listeners run after the internal borrow
    /// is released, so they may subscribe or unsubscribe.
    pub fn publish(&self, size: ViewportSize) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == size {
                return;
            }
            inner.current = size;
            inner
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect()
        };

        for listener in listeners {
            listener(size);
        }
    }
}

/// Handle for one listener; unsubscribes on drop.
pub struct ViewportSubscription {
    id: u64,
    notifier: Weak<RefCell<Inner>>,
}

impl fmt::Debug for ViewportSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl ViewportSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for ViewportSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.notifier.upgrade() {
            inner
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Latest-wins gate for debounced resize notifications.
///
/// Each raw event calls [`ResizeDebounce::arm`] and waits the quiet period;
/// only the holder of the newest sequence number may publish afterwards.
#[derive(Debug, Default)]
pub struct ResizeDebounce {
    latest: Cell<u64>,
}

impl ResizeDebounce {
    pub const QUIET_MS: u64 = 150;

    pub fn arm(&self) -> u64 {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, sequence: u64) -> bool {
        self.latest.get() == sequence
    }
}

/// Tracks the breakpoint a chart last rendered at. `None` means the
/// viewport has no measurable area yet (nothing to draw into).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointWatch {
    current: Option<Breakpoint>,
}

impl BreakpointWatch {
    pub fn new(size: ViewportSize) -> Self {
        Self {
            current: size.usable_breakpoint(),
        }
    }

    pub fn current(&self) -> Option<Breakpoint> {
        self.current
    }

    /// Returns true when `size` moves the chart into a different bucket.
    pub fn observe(&mut self, size: ViewportSize) -> bool {
        let next = size.usable_breakpoint();
        if next == self.current {
            false
        } else {
            self.current = next;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_bucket_widths() {
        assert_eq!(Breakpoint::for_width(320.0), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(600.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(1440.0), Breakpoint::Wide);
    }

    #[test]
    fn subscribers_receive_changes_until_dropped() {
        let notifier = ViewportNotifier::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = notifier.subscribe(move |size| sink.borrow_mut().push(size.width));

        notifier.publish(ViewportSize::new(500.0, 400.0));
        notifier.publish(ViewportSize::new(500.0, 400.0));
        assert_eq!(*seen.borrow(), vec![500.0]);

        drop(sub);
        assert_eq!(notifier.listener_count(), 0);
        notifier.publish(ViewportSize::new(900.0, 400.0));
        assert_eq!(*seen.borrow(), vec![500.0]);
        assert_eq!(notifier.current().width, 900.0);
    }

    #[test]
    fn listeners_may_unsubscribe_while_notified() {
        let notifier = ViewportNotifier::default();
        let slot: Rc<RefCell<Option<ViewportSubscription>>> = Rc::new(RefCell::new(None));
        let inner_slot = slot.clone();
        let sub = notifier.subscribe(move |_| {
            inner_slot.borrow_mut().take();
        });
        slot.borrow_mut().replace(sub);
        notifier.publish(ViewportSize::new(10.0, 10.0));
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_notifier_is_harmless() {
        let notifier = ViewportNotifier::default();
        let sub = notifier.subscribe(|_| {});
        drop(notifier);
        sub.unsubscribe();
    }

    #[test]
    fn debounce_keeps_only_latest() {
        let gate = ResizeDebounce::default();
        let first = gate.arm();
        let second = gate.arm();
        assert!(!gate.is_latest(first));
        assert!(gate.is_latest(second));
    }

    #[test]
    fn breakpoint_watch_reports_crossings_only() {
        let mut watch = BreakpointWatch::new(ViewportSize::new(1300.0, 700.0));
        assert!(!watch.observe(ViewportSize::new(1100.0, 700.0)));
        assert!(watch.observe(ViewportSize::new(700.0, 700.0)));
        assert_eq!(watch.current(), Some(Breakpoint::Medium));
        assert!(watch.observe(ViewportSize::new(0.0, 0.0)));
        assert_eq!(watch.current(), None);
    }
}
