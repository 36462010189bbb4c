//! Background rotation.
//!
//! The display layer owns the timer. On each tick of `slideshow_interval` seconds it
//! asks [`next_index`] which photo to show next.

use crate::model::PhotoMode;

/// The photo index to show after `current`.
///
/// - `Manual` never moves on its own.
/// - `Slideshow` walks the photos in order and wraps.
/// - `Random` picks any other photo, derived from `seed`.
///
/// Out-of-range `current` values are clamped first. Returns 0 for an empty list.
pub fn next_index(mode: PhotoMode, len: usize, current: usize, seed: u64) -> usize {
    if len == 0 {
        return 0;
    }
    let current = current.min(len - 1);
    match mode {
        PhotoMode::Manual => current,
        PhotoMode::Slideshow => (current + 1) % len,
        PhotoMode::Random => {
            if len == 1 {
                return 0;
            }
            // Choose among the other len - 1 photos so the background always changes.
            let pick = (splitmix64(seed) % (len as u64 - 1)) as usize;
            if pick >= current {
                pick + 1
            } else {
                pick
            }
        }
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single() {
        for mode in [PhotoMode::Manual, PhotoMode::Slideshow, PhotoMode::Random] {
            assert_eq!(next_index(mode, 0, 3, 42), 0);
            assert_eq!(next_index(mode, 1, 0, 42), 0);
        }
    }

    #[test]
    fn slideshow_wraps() {
        assert_eq!(next_index(PhotoMode::Slideshow, 3, 0, 0), 1);
        assert_eq!(next_index(PhotoMode::Slideshow, 3, 2, 0), 0);
        assert_eq!(next_index(PhotoMode::Slideshow, 3, 9, 0), 0);
    }

    #[test]
    fn manual_stays_put() {
        assert_eq!(next_index(PhotoMode::Manual, 4, 2, 7), 2);
        assert_eq!(next_index(PhotoMode::Manual, 4, 10, 7), 3);
    }

    #[test]
    fn random_always_moves_and_stays_in_range() {
        for seed in 0..200u64 {
            let next = next_index(PhotoMode::Random, 5, 2, seed);
            assert!(next < 5);
            assert_ne!(next, 2);
        }
    }
}
