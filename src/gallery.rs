//! Bounded ring of frozen-frame thumbnails.

use std::collections::VecDeque;

use image::imageops::{self, FilterType};
use image::RgbaImage;

pub const GALLERY_CAPACITY: usize = 9;
pub const THUMBNAIL_SIZE: u32 = 200;

/// FIFO with oldest-first eviction. Entries are never mutated once pushed.
#[derive(Debug, Clone)]
pub struct GalleryRing<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for GalleryRing<T> {
    fn default() -> Self {
        Self::with_capacity(GALLERY_CAPACITY)
    }
}

impl<T> GalleryRing<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends `entry` and hands back the evicted oldest entry, if any, so
    /// the caller can release whatever backs it.
    pub fn push(&mut self, entry: T) -> Option<T> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Downscales a frame to a `size`x`size` thumbnail (bilinear). The
/// thumbnail is what gets re-exported, not the original frame.
pub fn thumbnail(frame: &RgbaImage, size: u32) -> RgbaImage {
    imageops::resize(frame, size, size, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn evicts_oldest_and_keeps_order() {
        let mut ring = GalleryRing::default();
        for i in 1..=9 {
            assert_eq!(ring.push(i), None);
        }
        assert_eq!(ring.push(10), Some(1));
        assert_eq!(ring.len(), 9);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), (2..=10).collect::<Vec<_>>());
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut ring = GalleryRing::with_capacity(0);
        assert_eq!(ring.push('a'), None);
        assert_eq!(ring.push('b'), Some('a'));
        assert_eq!(ring.get(0), Some(&'b'));
    }

    #[test]
    fn thumbnails_are_square() {
        let frame = RgbaImage::from_pixel(640, 360, Rgba([10, 20, 30, 255]));
        let thumb = thumbnail(&frame, THUMBNAIL_SIZE);
        assert_eq!(thumb.dimensions(), (200, 200));
        assert_eq!(thumb.get_pixel(100, 100).0, [10, 20, 30, 255]);
    }
}
