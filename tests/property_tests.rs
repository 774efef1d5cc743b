use proptest::prelude::*;
use swatch::{ColorClusterer, Init, PixelExtractor};

/// (width, height, channels, raw bytes) for a small random RGB or RGBA image.
fn image() -> impl Strategy<Value = (u32, u32, usize, Vec<u8>)> {
    (1u32..7, 1u32..7, prop_oneof![Just(3usize), Just(4usize)]).prop_flat_map(|(w, h, c)| {
        let len = (w * h) as usize * c;
        (Just(w), Just(h), Just(c), prop::collection::vec(any::<u8>(), len))
    })
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

proptest! {
    #[test]
    fn prop_result_shape_and_populations(
        (w, h, c, raw) in image(),
        k_pick in 0usize..64,
        seed in any::<u64>(),
    ) {
        let pixels = PixelExtractor::extract(&raw, w, h, c).unwrap();
        let n = pixels.len();
        // Skip if there is no valid k
        if n >= 2 {
            let k = 2 + k_pick % (n - 1);
            let result = ColorClusterer::new(k).with_seed(seed).cluster(&pixels).unwrap();

            prop_assert_eq!(result.populations().len(), k);
            prop_assert_eq!(result.populations().iter().sum::<usize>(), n);
            prop_assert_eq!(result.labels().len(), n);
            prop_assert!(result.labels().iter().all(|&l| l < k));

            let q = result.quantized();
            prop_assert_eq!(q.len(), n);
            prop_assert_eq!((q.width(), q.height(), q.channels()), (w, h, pixels.channels()));
            for (px, &label) in q.iter().zip(result.labels()) {
                prop_assert_eq!(px, result.colors()[label].as_slice());
            }
            for centroid in result.centroids() {
                prop_assert!(centroid.iter().all(|&v| (0.0..=255.0).contains(&v)));
            }
        }
    }

    #[test]
    fn prop_converged_assignment_is_a_fixed_point(
        (w, h, c, raw) in image(),
        seed in any::<u64>(),
    ) {
        let pixels = PixelExtractor::extract(&raw, w, h, c).unwrap();
        if pixels.len() >= 3 {
            let result = ColorClusterer::new(3).with_seed(seed).cluster(&pixels).unwrap();
            if result.status().converged() {
                for (point, &label) in pixels.to_points().iter().zip(result.labels()) {
                    let mut best = 0;
                    let mut best_dist = f32::INFINITY;
                    for (j, centroid) in result.centroids().iter().enumerate() {
                        let d = squared_distance(point, centroid);
                        if d < best_dist {
                            best = j;
                            best_dist = d;
                        }
                    }
                    prop_assert_eq!(best, label);
                }
            }
        }
    }

    #[test]
    fn prop_k_equal_to_distinct_colors_recovers_them(
        colors in prop::collection::hash_set(any::<[u8; 3]>(), 2..6),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
        seed in any::<u64>(),
    ) {
        let colors: Vec<[u8; 3]> = colors.into_iter().collect();
        let k = colors.len();

        // Every color appears at least once, followed by random repeats.
        let mut expected = vec![1usize; k];
        let mut raw: Vec<u8> = colors.iter().flatten().copied().collect();
        for pick in &picks {
            let i = pick.index(k);
            expected[i] += 1;
            raw.extend_from_slice(&colors[i]);
        }
        let n = raw.len() / 3;
        let pixels = PixelExtractor::extract(&raw, n as u32, 1, 3).unwrap();

        for init in [Init::FirstDistinct, Init::Random, Init::PlusPlus] {
            let result = ColorClusterer::new(k)
                .with_init(init)
                .with_seed(seed)
                .cluster(&pixels)
                .unwrap();

            prop_assert!(result.status().converged());
            prop_assert_eq!(result.quantized(), &pixels);
            prop_assert_eq!(result.inertia(), 0.0);

            let mut found: Vec<(Vec<u8>, usize)> = result
                .palette()
                .into_iter()
                .map(|s| (s.color, s.population))
                .collect();
            found.sort();
            let mut want: Vec<(Vec<u8>, usize)> = colors
                .iter()
                .map(|c| c.to_vec())
                .zip(expected.iter().copied())
                .collect();
            want.sort();
            prop_assert_eq!(found, want);
        }
    }
}
