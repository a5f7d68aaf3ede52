//! Navigation items and the compact navigation menu

use crate::content::SectionId;

/// Terminal width below which the header collapses into a menu button
pub const NAV_BREAKPOINT: u16 = 80;

/// Where a navigation link leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Section(SectionId),
    Booking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub target: NavTarget,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Home",
        target: NavTarget::Section(SectionId::Home),
    },
    NavItem {
        label: "About",
        target: NavTarget::Section(SectionId::About),
    },
    NavItem {
        label: "Services",
        target: NavTarget::Section(SectionId::Services),
    },
    NavItem {
        label: "Approach",
        target: NavTarget::Section(SectionId::Approach),
    },
    NavItem {
        label: "Contact",
        target: NavTarget::Section(SectionId::Contact),
    },
    NavItem {
        label: "Book a Session",
        target: NavTarget::Booking,
    },
];

/// Whether the header should collapse into a menu button
pub fn is_compact(width: u16) -> bool {
    width < NAV_BREAKPOINT
}

/// Compact navigation menu shown on narrow terminals
///
/// The menu's items are a copy of [`NAV_ITEMS`], made the first time the
/// menu opens and reused afterwards.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    items: Option<Vec<NavItem>>,
    open: bool,
    pub selected: usize,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self) -> &[NavItem] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.items.get_or_insert_with(|| NAV_ITEMS.to_vec());
            self.open = true;
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn select_next(&mut self) {
        let count = self.items().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.items().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    /// Follow a link: returns its item and closes the menu
    pub fn activate(&mut self, index: usize) -> Option<NavItem> {
        if !self.open {
            return None;
        }
        let item = self.items().get(index).copied();
        if item.is_some() {
            self.close();
        }
        item
    }

    /// A click landed somewhere; close if it was outside the navigation area
    pub fn click(&mut self, inside_nav: bool) {
        if self.open && !inside_nav {
            self.close();
        }
    }
}
