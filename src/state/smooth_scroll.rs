//! Eased page scrolling between section anchors

use std::time::{Duration, Instant};

/// Duration of a scroll to a section
pub const SCROLL_DURATION: Duration = Duration::from_millis(400);

/// An in-progress scroll from one offset to another
#[derive(Debug, Clone, Copy)]
pub struct SmoothScroll {
    from: u16,
    to: u16,
    start_time: Instant,
}

impl SmoothScroll {
    pub fn new(from: u16, to: u16) -> Self {
        Self::starting_at(from, to, Instant::now())
    }

    pub fn starting_at(from: u16, to: u16, start_time: Instant) -> Self {
        Self {
            from,
            to,
            start_time,
        }
    }

    /// Scroll offset at `now`
    pub fn offset_at(&self, now: Instant) -> u16 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= SCROLL_DURATION {
            return self.to;
        }
        let progress = elapsed.as_secs_f32() / SCROLL_DURATION.as_secs_f32();
        // Cubic ease-out: fast start, gentle landing
        let eased = simple_easing::cubic_out(progress);
        let distance = self.to as f32 - self.from as f32;
        (self.from as f32 + distance * eased).round().max(0.0) as u16
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= SCROLL_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin() {
        let start = Instant::now();
        let scroll = SmoothScroll::starting_at(10, 50, start);
        assert_eq!(scroll.offset_at(start), 10);
        assert!(!scroll.is_finished_at(start));
    }

    #[test]
    fn test_ends_at_target() {
        let start = Instant::now();
        let scroll = SmoothScroll::starting_at(10, 50, start);
        let end = start + SCROLL_DURATION;
        assert_eq!(scroll.offset_at(end), 50);
        assert!(scroll.is_finished_at(end));
        assert_eq!(scroll.offset_at(end + Duration::from_secs(1)), 50);
    }

    #[test]
    fn test_ease_out_is_past_halfway_at_midpoint() {
        let start = Instant::now();
        let scroll = SmoothScroll::starting_at(0, 100, start);
        let mid = scroll.offset_at(start + SCROLL_DURATION / 2);
        assert!(mid > 50 && mid < 100, "offset at midpoint was {mid}");
    }

    #[test]
    fn test_scrolls_upwards() {
        let start = Instant::now();
        let scroll = SmoothScroll::starting_at(80, 20, start);
        let mid = scroll.offset_at(start + SCROLL_DURATION / 2);
        assert!(mid < 80 && mid > 20);
        assert_eq!(scroll.offset_at(start + SCROLL_DURATION), 20);
    }
}
