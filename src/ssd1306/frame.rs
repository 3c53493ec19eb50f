//! Frame buffer and GDDRAM regions.

/// Panel width, in columns.
pub const WIDTH: usize = 128;
/// Panel height, in pages of eight rows.
pub const PAGES: usize = 8;
/// Bytes covering the whole panel.
pub const FRAME_BYTES: usize = WIDTH * PAGES;

/// Index of the highest column.
pub const LAST_COLUMN: u8 = (WIDTH - 1) as u8;
/// Index of the highest page.
pub const LAST_PAGE: u8 = (PAGES - 1) as u8;

/// Rectangle of GDDRAM, bounds included.
///
/// The byte count is derived from the bounds, so the address window sent to
/// the controller and the DMA length cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    first_column: u8,
    last_column: u8,
    first_page: u8,
    last_page: u8,
}

impl Region {
    /// The whole panel.
    pub const FULL: Self = Self::new(0, LAST_COLUMN, 0, LAST_PAGE);

    /// Creates a region from its inclusive bounds.
    ///
    /// # Panics
    ///
    /// Panics if a bound is reversed or lies outside the panel. Regions are
    /// meant to be built in constants, where this fails the build instead.
    pub const fn new(first_column: u8, last_column: u8, first_page: u8, last_page: u8) -> Self {
        assert!(first_column <= last_column && last_column <= LAST_COLUMN);
        assert!(first_page <= last_page && last_page <= LAST_PAGE);
        Self {
            first_column,
            last_column,
            first_page,
            last_page,
        }
    }

    /// Region starting at `column`/`page`, `width` columns by `pages` pages.
    pub const fn spanning(column: u8, width: usize, page: u8, pages: usize) -> Self {
        Self::new(
            column,
            column + width as u8 - 1,
            page,
            page + pages as u8 - 1,
        )
    }

    /// `[first, last]` column, as sent with the column address command.
    pub const fn columns(&self) -> [u8; 2] {
        [self.first_column, self.last_column]
    }

    /// `[first, last]` page, as sent with the page address command.
    pub const fn pages(&self) -> [u8; 2] {
        [self.first_page, self.last_page]
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        (self.last_column - self.first_column) as usize + 1
    }

    /// Number of pages.
    pub const fn height(&self) -> usize {
        (self.last_page - self.first_page) as usize + 1
    }

    /// Bytes needed to fill the region.
    pub const fn len(&self) -> usize {
        self.width() * self.height()
    }
}

/// Linear buffer holding the bytes of the staged region.
///
/// Staged bytes always start at the beginning of the buffer, which is where
/// the DMA transfer reads from.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    bytes: [u8; FRAME_BYTES],
    region: Region,
}

impl FrameBuffer {
    /// Blank buffer staging the whole panel.
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
            region: Region::FULL,
        }
    }

    /// Selects `region` and returns the bytes to fill for it.
    pub fn stage(&mut self, region: Region) -> &mut [u8] {
        self.region = region;
        &mut self.bytes[..region.len()]
    }

    /// Bytes of the staged region, in transfer order.
    pub fn staged(&self) -> &[u8] {
        &self.bytes[..self.region.len()]
    }

    /// Region selected by the latest [`stage`](Self::stage).
    pub fn region(&self) -> Region {
        self.region
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_region_covers_the_buffer() {
        assert_eq!(Region::FULL.len(), FRAME_BYTES);
        assert_eq!(Region::FULL.columns(), [0, 127]);
        assert_eq!(Region::FULL.pages(), [0, 7]);
    }

    #[test]
    fn length_is_derived_from_bounds() {
        let region = Region::spanning(40, 72, 5, 2);
        assert_eq!(region.columns(), [40, 111]);
        assert_eq!(region.pages(), [5, 6]);
        assert_eq!(region.len(), 144);

        assert_eq!(Region::new(112, 127, 7, 7).len(), 16);
    }

    #[test]
    fn staging_exposes_the_start_of_the_buffer() {
        let mut frame = FrameBuffer::new();
        frame.stage(Region::FULL).fill(0xAA);

        let icon = Region::new(96, 111, 7, 7);
        let staged = frame.stage(icon);
        assert_eq!(staged.len(), 16);
        staged.fill(0x55);

        assert_eq!(frame.region(), icon);
        assert_eq!(frame.staged(), &[0x55; 16]);
    }

    #[test]
    #[should_panic]
    fn out_of_panel_region_is_rejected() {
        let _ = Region::new(0, 127, 0, 8);
    }
}
