//! Timers used to step chart transitions and debounce resizes.

#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let ms = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Number of frames needed to cover `duration_ms` at `frame_ms` per frame.
pub fn frame_count(duration_ms: u64, frame_ms: u64) -> u64 {
    if frame_ms == 0 {
        return 1;
    }
    duration_ms.div_ceil(frame_ms).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_rounds_up() {
        assert_eq!(frame_count(750, 16), 47);
        assert_eq!(frame_count(0, 16), 1);
        assert_eq!(frame_count(10, 0), 1);
    }
}
