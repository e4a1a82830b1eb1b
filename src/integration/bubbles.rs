//! Bubble seeding from tracked loops.
//!
//! The physics and rendering side owns the bubbles once seeded; this module
//! only decides how many to spawn for a microphone level and where.

use std::f32::consts::PI;

use rand::Rng;
use tracing::trace;

use crate::tracker::{TrackedLoop, random_point_in_polygon};

/// Upper bound for [`BubbleSpawner::with_bubbles_per_volume`].
pub const MAX_BUBBLES_PER_VOLUME: f32 = 100.0;

/// Initial state for one physics bubble, in scene units centered on the
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeed {
    pub id: u64,
    /// Loop the bubble was blown through, if that loop has an id yet
    pub loop_id: Option<u64>,
    pub position: [f32; 3],
    /// Euler angles in radians
    pub rotation: [f32; 3],
    pub scale: f32,
}

/// Spawns bubbles inside tracked loops while the input volume is above a
/// noise threshold.
#[derive(Debug, Clone)]
pub struct BubbleSpawner {
    noise_threshold: f32,
    bubbles_per_volume: f32,
    next_id: u64,
}

impl Default for BubbleSpawner {
    fn default() -> Self {
        Self {
            noise_threshold: 0.05,
            bubbles_per_volume: 5.0,
            next_id: 0,
        }
    }
}

impl BubbleSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum volume, clamped to `[0.01, 0.99]`.
    pub fn with_noise_threshold(mut self, threshold: f32) -> Self {
        self.noise_threshold = threshold.clamp(0.01, 0.99);
        self
    }

    /// Set bubbles spawned per unit volume, clamped to
    /// `[0, MAX_BUBBLES_PER_VOLUME]`. NaN counts as zero.
    pub fn with_bubbles_per_volume(mut self, rate: f32) -> Self {
        self.bubbles_per_volume = rate.max(0.0).min(MAX_BUBBLES_PER_VOLUME);
        self
    }

    pub fn noise_threshold(&self) -> f32 {
        self.noise_threshold
    }

    /// Seed bubbles for one frame.
    ///
    /// `volume` is the normalized microphone level in `[0, 1]`. Each bubble
    /// picks a loop uniformly at random and starts at a uniform point inside
    /// its contour.
    pub fn spawn<R: Rng>(
        &mut self,
        volume: f32,
        loops: &[TrackedLoop],
        rng: &mut R,
    ) -> Vec<BubbleSeed> {
        if volume.is_nan() || volume <= self.noise_threshold || loops.is_empty() {
            return Vec::new();
        }

        let count = (volume.min(1.0) * self.bubbles_per_volume).ceil() as usize;
        let mut seeds = Vec::with_capacity(count);
        for _ in 0..count {
            let lp = &loops[rng.gen_range(0..loops.len())];
            let Some(p) = random_point_in_polygon(&lp.points, rng) else {
                continue;
            };
            seeds.push(BubbleSeed {
                id: self.next_id,
                loop_id: lp.id,
                position: [p.x - 0.5, 0.5 - p.y, rng.gen_range(-0.5..0.0)],
                rotation: [
                    rng.gen_range(0.0..PI),
                    rng.gen_range(0.0..PI),
                    rng.gen_range(0.0..PI),
                ],
                scale: rng.gen_range(0.025..0.05),
            });
            self.next_id += 1;
        }
        trace!(volume, spawned = seeds.len(), "bubbles seeded");
        seeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{LoopCandidate, LoopKind, Point, point_in_polygon};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square_loop(cx: f32, cy: f32) -> TrackedLoop {
        let points = vec![
            Point::new(cx - 0.05, cy - 0.05),
            Point::new(cx + 0.05, cy - 0.05),
            Point::new(cx + 0.05, cy + 0.05),
            Point::new(cx - 0.05, cy + 0.05),
        ];
        TrackedLoop::new(LoopCandidate::new(points, LoopKind::ThumbIndex).unwrap())
    }

    #[test]
    fn test_quiet_input_spawns_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = BubbleSpawner::new();
        let loops = vec![square_loop(0.5, 0.5)];
        assert!(spawner.spawn(0.05, &loops, &mut rng).is_empty());
        assert!(spawner.spawn(0.8, &[], &mut rng).is_empty());
        assert!(spawner.spawn(f32::NAN, &loops, &mut rng).is_empty());
    }

    #[test]
    fn test_spawn_count_and_placement() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawner = BubbleSpawner::new();
        let loops = vec![square_loop(0.3, 0.3)];

        let seeds = spawner.spawn(0.5, &loops, &mut rng);
        // ceil(0.5 * 5)
        assert_eq!(seeds.len(), 3);
        for seed in &seeds {
            let p = Point::new(seed.position[0] + 0.5, 0.5 - seed.position[1]);
            assert!(point_in_polygon(&p, &loops[0].points));
            assert!((-0.5..0.0).contains(&seed.position[2]));
            assert!((0.025..0.05).contains(&seed.scale));
            assert!(seed.rotation.iter().all(|r| (0.0..PI).contains(r)));
        }

        let ids: Vec<u64> = seeds.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let more = spawner.spawn(0.1, &loops, &mut rng);
        assert_eq!(more[0].id, 3);
    }

    #[test]
    fn test_spawn_count_is_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        let loops = vec![square_loop(0.5, 0.5)];

        let mut spawner = BubbleSpawner::new().with_bubbles_per_volume(f32::INFINITY);
        let seeds = spawner.spawn(f32::INFINITY, &loops, &mut rng);
        assert_eq!(seeds.len(), MAX_BUBBLES_PER_VOLUME as usize);

        let mut spawner = BubbleSpawner::new().with_bubbles_per_volume(f32::NAN);
        assert!(spawner.spawn(0.8, &loops, &mut rng).is_empty());
    }

    #[test]
    fn test_noise_threshold_clamped() {
        assert_eq!(BubbleSpawner::new().with_noise_threshold(2.0).noise_threshold(), 0.99);
        assert_eq!(BubbleSpawner::new().with_noise_threshold(0.0).noise_threshold(), 0.01);
    }
}
