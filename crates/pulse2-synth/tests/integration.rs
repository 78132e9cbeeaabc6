//! Integration tests for pulse2-synth crate.
//!
//! Tests cover phase accumulation, exact mix formulas, hard sync, gain
//! smoothing, block-boundary control updates, and robustness against
//! hostile inputs.

use pulse2_core::semitones_to_ratio;
use pulse2_synth::{
    Channels, ControlUpdate, HEADROOM, ParamFrame, PhaseAccumulator, Posted, VoiceEngine,
    VoiceInputs, VoiceParam, Waveform,
};

const SR: f32 = 48000.0;

fn voice() -> VoiceEngine {
    VoiceEngine::new(SR).unwrap()
}

fn render(voice: &mut VoiceEngine, inputs: &VoiceInputs<'_>, len: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; len];
    voice.render(inputs, &mut out);
    out
}

// ---------------------------------------------------------------------------
// 1. Phase accumulation
// ---------------------------------------------------------------------------

#[test]
fn increment_at_440_hz() {
    let mut v = voice();
    render(&mut v, &VoiceInputs::default(), 1);
    assert!((v.phases().osc1 - 0.0091667).abs() < 1e-6);
}

#[test]
fn wraps_between_sample_109_and_110() {
    let mut v = voice();
    let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[440.0]);

    render(&mut v, &inputs, 109);
    let before = v.phases().osc1;
    assert!(before > 0.999 && before < 1.0, "phase after 109 samples: {before}");

    render(&mut v, &inputs, 1);
    let after = v.phases().osc1;
    assert!((after - (110.0 * 440.0 / SR - 1.0)).abs() < 1e-4, "phase after 110: {after}");
}

#[test]
fn phase_is_periodic_and_bounded() {
    let mut v = voice();
    // 480 Hz at 48 kHz: one cycle every 100 samples
    let frame = ParamFrame {
        base_freq: 480.0,
        ..ParamFrame::default()
    };

    for cycle in 1..=20 {
        for _ in 0..100 {
            v.process(&frame);
            let p = v.phases();
            for phase in [p.osc1, p.osc2, p.sub] {
                assert!((0.0..1.0).contains(&phase), "phase {phase} escaped");
            }
        }
        let p = v.phases().osc1;
        let distance = p.min(1.0 - p);
        assert!(distance < 1e-3, "cycle {cycle}: phase {p} not back at 0");
    }
}

#[test]
fn block_size_does_not_change_output() {
    let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[311.0]);

    let mut whole = voice();
    let one = render(&mut whole, &inputs, 512);

    let mut split = voice();
    let mut two = render(&mut split, &inputs, 100);
    two.extend(render(&mut split, &inputs, 412));

    assert_eq!(one, two);
}

#[test]
fn dense_lane_matches_constant() {
    let lane = vec![523.25f32; 256];
    let mut a = voice();
    let mut b = voice();
    let constant = render(
        &mut a,
        &VoiceInputs::default().with(VoiceParam::BaseFrequency, &[523.25]),
        256,
    );
    let dense = render(
        &mut b,
        &VoiceInputs::default().with(VoiceParam::BaseFrequency, &lane),
        256,
    );
    assert_eq!(constant, dense);
}

// ---------------------------------------------------------------------------
// 2. Mix formulas
// ---------------------------------------------------------------------------

#[test]
fn single_saw_output_is_exact() {
    let mut v = voice();
    v.set_gains_immediate(Channels::new(1.0, 0.0, 0.0));
    let inputs = VoiceInputs::default()
        .with(VoiceParam::Osc1Gain, &[1.0])
        .with(VoiceParam::Osc2Gain, &[0.0])
        .with(VoiceParam::SubGain, &[0.0]);

    let out = render(&mut v, &inputs, 1024);

    let mut reference = PhaseAccumulator::new();
    let dt = 440.0 / SR;
    for (i, &sample) in out.iter().enumerate() {
        let (phase, _) = reference.advance(440.0, SR);
        let expected = HEADROOM * Waveform::Saw.sample(phase, dt);
        assert_eq!(sample, expected, "sample {i}");
    }
}

#[test]
fn ring_output_is_exact_product() {
    let mut v = voice();
    v.apply_update(&ControlUpdate {
        ring_mod: Some(true),
        ..ControlUpdate::default()
    });
    v.set_gains_immediate(Channels::new(0.3, 0.9, 0.0));
    let inputs = VoiceInputs::default().with(VoiceParam::SubGain, &[0.0]);

    let out = render(&mut v, &inputs, 1024);

    let f2 = 440.0 * semitones_to_ratio(7);
    let mut osc1 = PhaseAccumulator::new();
    let mut osc2 = PhaseAccumulator::new();
    for (i, &sample) in out.iter().enumerate() {
        let (p1, _) = osc1.advance(440.0, SR);
        let (p2, _) = osc2.advance(f2, SR);
        let s1 = Waveform::Saw.sample(p1, 440.0 / SR);
        let s2 = Waveform::Saw.sample(p2, f2 / SR);
        assert_eq!(sample, HEADROOM * (s1 * s2), "sample {i}");
    }
}

#[test]
fn ring_ignores_main_gain_automation() {
    let ring = ControlUpdate {
        ring_mod: Some(true),
        ..ControlUpdate::default()
    };
    let sweep: Vec<f32> = (0..512).map(|i| i as f32 / 511.0).collect();

    let mut a = voice();
    a.apply_update(&ring);
    let flat = render(&mut a, &VoiceInputs::default(), 512);

    let mut b = voice();
    b.apply_update(&ring);
    let swept = render(
        &mut b,
        &VoiceInputs::default()
            .with(VoiceParam::Osc1Gain, &sweep)
            .with(VoiceParam::Osc2Gain, &[0.0]),
        512,
    );

    assert_eq!(flat, swept);
}

#[test]
fn ring_mode_still_smooths_sub_gain() {
    let mut v = voice();
    v.apply_update(&ControlUpdate {
        ring_mod: Some(true),
        ..ControlUpdate::default()
    });
    render(
        &mut v,
        &VoiceInputs::default().with(VoiceParam::SubGain, &[1.0]),
        48,
    );
    let sub = v.gains().sub;
    assert!(sub > 0.35 && sub < 1.0, "sub gain jumped or stalled: {sub}");
}

// ---------------------------------------------------------------------------
// 3. Hard sync
// ---------------------------------------------------------------------------

#[test]
fn hard_sync_zeroes_osc2_on_every_osc1_wrap() {
    let mut v = voice();
    v.apply_update(&ControlUpdate {
        sync: Some(true),
        osc2_semitones: Some(5),
        ..ControlUpdate::default()
    });
    let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[1234.0]);

    let mut wraps = 0;
    let mut block = [0.0f32; 1];
    for _ in 0..4800 {
        let before = v.phases().osc1;
        v.render(&inputs, &mut block);
        if v.phases().osc1 < before {
            wraps += 1;
            assert_eq!(v.phases().osc2, 0.0);
        }
    }
    assert!(wraps > 100);
}

#[test]
fn without_sync_osc2_runs_free() {
    let mut v = voice();
    let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[1234.0]);
    let mut block = [0.0f32; 1];
    let mut saw_nonzero = false;
    for _ in 0..4800 {
        let before = v.phases().osc1;
        v.render(&inputs, &mut block);
        if v.phases().osc1 < before && v.phases().osc2 != 0.0 {
            saw_nonzero = true;
        }
    }
    assert!(saw_nonzero);
}

// ---------------------------------------------------------------------------
// 4. Gain smoothing
// ---------------------------------------------------------------------------

#[test]
fn gain_step_converges_without_overshoot() {
    let mut v = voice();
    let inputs = VoiceInputs::default()
        .with(VoiceParam::Osc1Gain, &[0.0])
        .with(VoiceParam::Osc2Gain, &[1.0]);

    let mut prev = v.gains();
    let mut block = [0.0f32; 1];
    for _ in 0..4800 {
        v.render(&inputs, &mut block);
        let g = v.gains();
        assert!(g.osc1 <= prev.osc1 && g.osc1 >= 0.0);
        assert!(g.osc2 >= prev.osc2 && g.osc2 <= 1.0);
        prev = g;
    }
    assert!(prev.osc1 < 1e-4);
    assert!(prev.osc2 > 1.0 - 1e-4);
}

// ---------------------------------------------------------------------------
// 5. Control updates
// ---------------------------------------------------------------------------

#[test]
fn rejected_field_keeps_previous_value() {
    let mut v = voice();
    v.apply_update(&ControlUpdate {
        osc1_kind: Some(Waveform::Triangle),
        ..ControlUpdate::default()
    });
    // A message whose osc1 kind failed validation arrives without that field
    v.apply_update(&ControlUpdate {
        osc1_kind: None,
        osc2_semitones: Some(-7),
        ..ControlUpdate::default()
    });
    assert_eq!(v.control().osc1_kind, Waveform::Triangle);
    assert_eq!(v.control().osc2_semitones, -7);
}

#[test]
fn updates_only_land_at_block_boundaries() {
    let mut v = voice();
    let tx = v.connect_control();

    render(&mut v, &VoiceInputs::default(), 64);
    tx.post(ControlUpdate {
        osc1_kind: Some(Waveform::Square),
        ..ControlUpdate::default()
    });
    assert_eq!(v.control().osc1_kind, Waveform::Saw);

    render(&mut v, &VoiceInputs::default(), 64);
    assert_eq!(v.control().osc1_kind, Waveform::Square);
}

#[test]
fn burst_between_blocks_is_merged() {
    let mut v = voice();
    let tx = v.connect_control();

    assert_eq!(
        tx.post(ControlUpdate {
            osc1_semitones: Some(12),
            sync: Some(true),
            ..ControlUpdate::default()
        }),
        Posted::Queued
    );
    assert_eq!(
        tx.post(ControlUpdate {
            osc1_semitones: Some(-12),
            ..ControlUpdate::default()
        }),
        Posted::Merged
    );

    render(&mut v, &VoiceInputs::default(), 32);
    assert_eq!(v.control().osc1_semitones, -12);
    assert!(v.control().sync);
    assert!(!tx.is_pending());
}

#[test]
fn control_thread_can_post_while_rendering() {
    let mut v = voice();
    let tx = v.connect_control();

    let producer = std::thread::spawn(move || {
        for i in 0..200 {
            let kind = Waveform::ALL[i % 3];
            tx.post(ControlUpdate {
                osc2_kind: Some(kind),
                osc2_semitones: Some(i as i32),
                ..ControlUpdate::default()
            });
        }
        tx
    });

    let mut block = [0.0f32; 32];
    while !producer.is_finished() {
        v.render(&VoiceInputs::default(), &mut block);
        assert!(block.iter().all(|s| s.is_finite()));
    }
    let _tx = producer.join().unwrap();
    v.render(&VoiceInputs::default(), &mut block);

    assert_eq!(v.control().osc2_semitones, 199);
    assert_eq!(v.control().osc2_kind, Waveform::ALL[199 % 3]);
}

// ---------------------------------------------------------------------------
// 6. Robustness
// ---------------------------------------------------------------------------

#[test]
fn extreme_offsets_clamp_frequencies() {
    for semis in [i32::MAX, i32::MIN, 400, -400] {
        let mut v = voice();
        v.apply_update(&ControlUpdate {
            osc1_semitones: Some(semis),
            osc2_semitones: Some(semis),
            ..ControlUpdate::default()
        });
        let inputs = VoiceInputs::default()
            .with(VoiceParam::Osc2Detune, &[100.0])
            .with(VoiceParam::LfoPitch, &[200.0]);
        let out = render(&mut v, &inputs, 2048);
        assert!(out.iter().all(|s| s.is_finite()), "semis {semis}");
        let p = v.phases();
        assert!((0.0..1.0).contains(&p.osc1) && (0.0..1.0).contains(&p.osc2));
    }
}

#[test]
fn hostile_lanes_render_finite_blocks() {
    let nasty = [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -1e30, 1e30, 0.0];
    let mut v = voice();
    let mut inputs = VoiceInputs::default();
    for param in VoiceParam::ALL {
        inputs = inputs.with(param, &nasty);
    }
    let out = render(&mut v, &inputs, 256);
    assert_eq!(out.len(), 256);
    assert!(out.iter().all(|s| s.is_finite()));
}

#[test]
fn low_sample_rate_keeps_phase_in_range() {
    let mut v = VoiceEngine::new(8000.0).unwrap();
    let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[20000.0]);
    let out = render(&mut v, &inputs, 512);
    assert!(out.iter().all(|s| s.is_finite()));
    let p = v.phases();
    for phase in [p.osc1, p.osc2, p.sub] {
        assert!((0.0..1.0).contains(&phase), "phase {phase}");
    }
}

#[test]
fn degenerate_sample_rates_never_render_nan() {
    assert!(VoiceEngine::new(1e-40).is_err());

    // Smallest rates that still pass construction give huge but finite increments
    for sr in [1e-30, 1e-3, 1.0] {
        let mut v = VoiceEngine::new(sr).unwrap();
        let inputs = VoiceInputs::default().with(VoiceParam::BaseFrequency, &[20000.0]);
        let out = render(&mut v, &inputs, 64);
        assert!(out.iter().all(|s| s.is_finite()), "sr {sr}: {out:?}");
        let p = v.phases();
        for phase in [p.osc1, p.osc2, p.sub] {
            assert!((0.0..1.0).contains(&phase), "sr {sr}: phase {phase}");
        }
    }
}

#[test]
fn empty_block_is_a_no_op() {
    let mut v = voice();
    let tx = v.connect_control();
    tx.post(ControlUpdate {
        ring_mod: Some(true),
        ..ControlUpdate::default()
    });
    v.render(&VoiceInputs::default(), &mut []);
    assert_eq!(v.phases(), Channels::new(0.0, 0.0, 0.0));
    // The update is still consumed at the boundary
    assert!(v.control().ring_mod);
}
