use image::{Rgba, RgbaImage};

use patternstudio::gallery::{thumbnail, GalleryRing, GALLERY_CAPACITY, THUMBNAIL_SIZE};
use patternstudio::timing::{set_frozen, toggle_freeze, Clock, FreezeEdge};
use patternstudio::{Mode, StudioConfig, StudioState};

/// Mirrors the front end: every `Captured` edge adds one thumbnail.
fn press(state: &mut StudioState, ring: &mut GalleryRing<RgbaImage>, frame: &RgbaImage) {
    if toggle_freeze(state) == FreezeEdge::Captured {
        ring.push(thumbnail(frame, THUMBNAIL_SIZE));
    }
}

#[test]
fn each_freeze_captures_once() {
    let mut state = StudioState::new(&StudioConfig::default(), 640.0, 360.0);
    let mut ring = GalleryRing::default();
    let frame = RgbaImage::from_pixel(640, 360, Rgba([10, 20, 30, 255]));

    press(&mut state, &mut ring, &frame);
    assert!(state.frozen);
    assert_eq!(set_frozen(&mut state, true), None);
    press(&mut state, &mut ring, &frame);
    assert!(!state.frozen);
    press(&mut state, &mut ring, &frame);

    assert_eq!(ring.len(), 2);
    assert_eq!(ring.get(0).unwrap().dimensions(), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
}

#[test]
fn frozen_clock_holds_time() {
    let clock = Clock::default();
    let mut state = StudioState::new(&StudioConfig::default(), 640.0, 360.0);
    state = clock.tick(state);
    let before = state.cosmic.time;
    toggle_freeze(&mut state);
    state = (0..10).fold(state, |s, _| clock.tick(s));
    assert_eq!(state.cosmic.time, before);

    toggle_freeze(&mut state);
    state.set_mode(Mode::Pixelated);
    state = clock.tick(state);
    assert_eq!(state.cosmic.time, before);
}

#[test]
fn ring_keeps_the_newest_captures() {
    let mut ring = GalleryRing::default();
    let mut evicted = Vec::new();
    for i in 0..GALLERY_CAPACITY + 3 {
        evicted.extend(ring.push(i));
    }
    assert_eq!(ring.len(), GALLERY_CAPACITY);
    assert_eq!(evicted, vec![0, 1, 2]);
    let kept: Vec<usize> = ring.iter().copied().collect();
    assert_eq!(kept, (3..GALLERY_CAPACITY + 3).collect::<Vec<_>>());
}
