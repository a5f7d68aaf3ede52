//! Header appearance driven by the page scroll offset

/// Rows scrolled before the header switches to its raised style
pub const SCROLL_THRESHOLD: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// At the top of the page
    #[default]
    Resting,
    /// Page scrolled past the threshold
    Raised,
}

impl HeaderStyle {
    pub fn for_scroll(scroll: u16) -> Self {
        if scroll > SCROLL_THRESHOLD {
            Self::Raised
        } else {
            Self::Resting
        }
    }
}

/// Recomputes the header style at most once per frame
#[derive(Debug, Clone, Default)]
pub struct HeaderScrollEffect {
    style: HeaderStyle,
    ticking: bool,
}

impl HeaderScrollEffect {
    pub fn style(&self) -> HeaderStyle {
        self.style
    }

    /// A scroll happened; schedule a recompute for the next frame
    pub fn request_tick(&mut self) {
        self.ticking = true;
    }

    /// Called once per frame; applies a pending recompute
    pub fn on_frame(&mut self, scroll: u16) -> bool {
        if !self.ticking {
            return false;
        }
        self.ticking = false;
        self.style = HeaderStyle::for_scroll(scroll);
        true
    }
}
