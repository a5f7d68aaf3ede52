//! Page layout: the marketing sections flattened into wrapped rows

use crate::content::{ImageAsset, SectionId, SECTIONS};

/// One rendered row of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLine {
    Heading(String),
    Text(String),
    /// Row `row` of image number `image`
    Image { image: usize, row: u16 },
    Blank,
}

/// Position of a deferred image within the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSlot {
    pub asset: ImageAsset,
    pub top: u16,
}

/// Page content wrapped for a given width
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub lines: Vec<PageLine>,
    pub anchors: Vec<(SectionId, u16)>,
    pub images: Vec<ImageSlot>,
}

impl PageLayout {
    /// Lay out every section for the given content width
    pub fn build(width: u16) -> Self {
        let wrap_width = (width.saturating_sub(4) as usize).max(20);
        let mut layout = Self {
            width,
            ..Self::default()
        };

        for section in SECTIONS {
            layout.anchors.push((section.id, layout.height()));
            layout.lines.push(PageLine::Heading(section.title.to_string()));
            layout.lines.push(PageLine::Blank);

            for paragraph in section.paragraphs {
                layout
                    .lines
                    .extend(wrap_text(paragraph, wrap_width).into_iter().map(PageLine::Text));
                layout.lines.push(PageLine::Blank);
            }

            if let Some(asset) = section.image {
                let image = layout.images.len();
                layout.images.push(ImageSlot {
                    asset,
                    top: layout.height(),
                });
                layout
                    .lines
                    .extend((0..asset.height).map(|row| PageLine::Image { image, row }));
                layout.lines.push(PageLine::Blank);
            }

            layout.lines.push(PageLine::Blank);
        }

        layout
    }

    pub fn height(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }

    /// First row of a section
    pub fn anchor(&self, id: SectionId) -> Option<u16> {
        self.anchors
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, row)| *row)
    }

    /// Largest scroll offset that still fills the viewport
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height().saturating_sub(viewport_height)
    }
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
