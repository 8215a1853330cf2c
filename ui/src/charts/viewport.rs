use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::platform::spawn_future;
use crate::core::timing;
use crate::core::viewport::{
    Breakpoint, BreakpointWatch, ResizeDebounce, ViewportNotifier, ViewportSize,
};

/// Measures the page area and broadcasts debounced size changes to every
/// chart below it.
#[component]
pub fn ViewportRoot(children: Element) -> Element {
    let notifier = use_context_provider(ViewportNotifier::default);
    let debounce = use_hook(|| Rc::new(ResizeDebounce::default()));

    rsx! {
        div {
            class: "viewport-root",
            onresize: move |evt| {
                let Ok(measured) = evt.get_content_box_size() else {
                    return;
                };
                let size = ViewportSize::new(measured.width, measured.height);
                let sequence = debounce.arm();
                let debounce = debounce.clone();
                let notifier = notifier.clone();
                spawn_future(async move {
                    timing::sleep_ms(ResizeDebounce::QUIET_MS).await;
                    if debounce.is_latest(sequence) {
                        tracing::debug!(width = size.width, height = size.height, "viewport resized");
                        notifier.publish(size);
                    }
                });
            },
            {children}
        }
    }
}

/// Current breakpoint of the surrounding [`ViewportRoot`]. `None` while the
/// viewport has no drawable area. The subscription lives as long as the
/// calling component.
pub fn use_breakpoint() -> Signal<Option<Breakpoint>> {
    let notifier = try_use_context::<ViewportNotifier>().unwrap_or_default();
    let start = BreakpointWatch::new(notifier.current());
    let breakpoint = use_signal(|| start.current());

    use_hook(move || {
        let watch = Cell::new(start);
        Rc::new(notifier.subscribe(move |size| {
            let mut next = watch.get();
            if next.observe(size) {
                watch.set(next);
                let mut signal = breakpoint;
                signal.set(next.current());
            }
        }))
    });

    breakpoint
}
