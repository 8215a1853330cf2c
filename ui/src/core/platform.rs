//! Task spawning shim shared by web and desktop builds.

use std::future::Future;

/// Spawn a future on the Dioxus runtime of the current component scope. The
/// task is dropped together with that scope.
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    dioxus::prelude::spawn(future);
}
