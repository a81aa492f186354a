//! Property-based tests for grainwarp-core.
//!
//! Filter stability over the whole depth range, the output hard cap, seam
//! crossfades and the bypass band, using proptest for randomized parameters.

use proptest::prelude::*;
use grainwarp_core::{StretchConfig, StretchParameters, ToneFilter, TrigMode, stretch};

const FULL_SCALE: f32 = 32767.0;

fn config_for(sample_rate_index: usize, polynomial: bool) -> StretchConfig {
    let rates = [22050.0, 44100.0, 48000.0, 96000.0];
    let trig = if polynomial {
        TrigMode::Polynomial
    } else {
        TrigMode::Libm
    };
    StretchConfig::default()
        .with_sample_rate(rates[sample_rate_index % rates.len()])
        .with_trig(trig)
}

/// Parameters plus a source long enough for them.
fn stretch_case() -> impl Strategy<Value = (StretchParameters, Vec<i16>)> {
    (1usize..64, 1usize..64, 1usize..512, 1usize..256, 0.25f32..3.0f32).prop_flat_map(
        |(block_in, block_out, target, pitched, pitch)| {
            let params = StretchParameters::new(block_in, block_out, target, pitched, pitch)
                .expect("strategy produces valid parameters");
            let len = params.required_source_samples();
            (Just(params), prop::collection::vec(any::<i16>(), len))
        },
    )
}

fn render(params: &StretchParameters, source: &[i16], depth: f32, canary: i16) -> (Vec<i16>, usize) {
    let mut out = vec![canary; params.target_samples + 16];
    let bytes = stretch(
        out.as_mut_slice(),
        source,
        params,
        1.0,
        depth,
        &StretchConfig::default(),
    )
    .unwrap();
    (out, bytes / 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// A full-scale impulse stays bounded and dies away for every depth,
    /// sample rate and trig mode.
    #[test]
    fn impulse_response_is_bounded(
        depth in -1.0f32..=1.0f32,
        sr in 0usize..4,
        polynomial in any::<bool>(),
    ) {
        let config = config_for(sr, polynomial);
        let mut filter = ToneFilter::new(depth, &config).unwrap();
        prop_assert!(filter.coefficients().is_stable());

        let mut last = filter.process(FULL_SCALE);
        for _ in 0..2048 {
            last = filter.process(0.0);
            prop_assert!(last.is_finite());
            prop_assert!(last.abs() <= 4.0 * FULL_SCALE);
        }
        prop_assert!(last.abs() < 1.0, "impulse tail {} at depth {}", last, depth);
    }

    /// A full-scale step never runs away.
    #[test]
    fn step_response_is_bounded(
        depth in -1.0f32..=1.0f32,
        sr in 0usize..4,
        polynomial in any::<bool>(),
    ) {
        let config = config_for(sr, polynomial);
        let mut filter = ToneFilter::new(depth, &config).unwrap();
        for _ in 0..2048 {
            let y = filter.process(FULL_SCALE);
            prop_assert!(y.is_finite());
            prop_assert!(y.abs() <= 4.0 * FULL_SCALE);
        }
    }

    /// Nothing is written past `target_samples` and the byte count agrees.
    #[test]
    fn output_never_exceeds_target((params, source) in stretch_case(), depth in -1.0f32..=1.0f32) {
        let (out, written) = render(&params, &source, depth, 0x5a5a);
        prop_assert!(written <= params.target_samples);
        prop_assert!(written <= params.block_count() * params.stretch_block_output_samples);
        prop_assert!(out[written..].iter().all(|&s| s == 0x5a5a));
    }

    /// Unfiltered output stays inside the source's range: direct reads copy
    /// samples and seam blends are convex combinations of them.
    #[test]
    fn crossfade_stays_within_source_range((params, source) in stretch_case()) {
        let (out, written) = render(&params, &source, 0.0, 0);
        let lo = *source.iter().min().unwrap();
        let hi = *source.iter().max().unwrap();
        for &s in &out[..written] {
            prop_assert!(s >= lo && s <= hi, "{} outside [{}, {}]", s, lo, hi);
        }
    }

    /// The last sample of a stretched block with a successor lands on the
    /// successor's first source sample.
    #[test]
    fn crossfade_lands_on_next_block((params, source) in stretch_case()) {
        prop_assume!(params.stretch_block_input_samples != params.stretch_block_output_samples);
        prop_assume!(params.stretch_block_output_samples >= 2);
        let (out, written) = render(&params, &source, 0.0, 0);

        let block_in = params.stretch_block_input_samples;
        let block_out = params.stretch_block_output_samples;
        let rate = f64::from(params.pitch_rate);
        let mut k = 1;
        while k * block_in < params.pitched_samples && k * block_out <= written {
            let next = source[(rate * (k * block_in) as f64) as usize];
            prop_assert_eq!(out[k * block_out - 1], next, "seam {}", k);
            k += 1;
        }
    }

    /// Inside a seam blend, and across the seam itself, consecutive samples
    /// move by at most a linear ramp's step: the source span divided by the
    /// blend length, plus one for rounding.
    #[test]
    fn crossfade_steps_are_bounded((params, source) in stretch_case()) {
        prop_assume!(params.stretch_block_input_samples != params.stretch_block_output_samples);
        let (out, written) = render(&params, &source, 0.0, 0);

        let window = StretchConfig::default().interpolation_window;
        let block_in = params.stretch_block_input_samples;
        let block_out = params.stretch_block_output_samples;
        let lo = i32::from(*source.iter().min().unwrap());
        let hi = i32::from(*source.iter().max().unwrap());
        let span = f64::from(hi - lo);

        let mut k = 0;
        while (k + 1) * block_in < params.pitched_samples {
            let mut ramp = (window - 1).min(block_out);
            // The very first output has no predecessor and is read directly.
            if k == 0 && block_out < window {
                ramp -= 1;
            }
            if ramp > 0 {
                let bound = span / ramp as f64 + 1.0;
                let start = k * block_out;
                for pos in (start + block_out - ramp)..=(start + block_out) {
                    if pos == 0 || pos >= written {
                        continue;
                    }
                    let step = (i32::from(out[pos]) - i32::from(out[pos - 1])).abs();
                    prop_assert!(
                        f64::from(step) <= bound,
                        "step {} at {} exceeds {} (block {})", step, pos, bound, k
                    );
                }
            }
            k += 1;
        }
    }

    /// Depths inside the bypass band render bit-identically to depth 0.
    #[test]
    fn bypass_band_matches_zero_depth(
        (params, source) in stretch_case(),
        depth in -0.0099f32..0.0099f32,
    ) {
        let (a, na) = render(&params, &source, depth, 0);
        let (b, nb) = render(&params, &source, 0.0, 0);
        prop_assert_eq!(na, nb);
        prop_assert_eq!(a, b);
    }

    /// Equal blocks, unit pitch, unit volume and no filter copy the source.
    #[test]
    fn unity_settings_copy_source(
        block in 1usize..64,
        pitched in 1usize..256,
        target_frac in 0.01f64..=1.0f64,
        source in prop::collection::vec(any::<i16>(), 256),
    ) {
        let block = block.min(pitched);
        let target = ((pitched as f64 * target_frac) as usize).max(1);
        let params = StretchParameters::new(block, block, target, pitched, 1.0).unwrap();
        let (out, written) = render(&params, &source, 0.0, 0);
        prop_assert_eq!(written, target);
        prop_assert_eq!(&out[..target], &source[..target]);
    }
}
