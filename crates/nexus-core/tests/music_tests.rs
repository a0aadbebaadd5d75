// Integration tests for note selection and pitch conversion.

use nexus_core::music::{random_note, SCALE_MIDI};
use nexus_core::{midi_to_hz, NoteLength};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn midi_to_hz_matches_a4_and_octave() {
    let a4 = midi_to_hz(69.0);
    assert!((a4 - 440.0).abs() < 1e-4);
    let a5 = midi_to_hz(81.0);
    assert!((a5 - 880.0).abs() < 1e-3);
    assert!((a5 / a4 - 2.0).abs() < 1e-4);
}

#[test]
fn midi_to_hz_is_monotonic_over_range() {
    let mut prev = midi_to_hz(20.0);
    for m in 21..=100 {
        let f = midi_to_hz(m as f32);
        assert!(f > prev, "frequency not increasing at midi {m}");
        prev = f;
    }
}

#[test]
fn note_lengths_are_ordered() {
    assert!(NoteLength::Quarter.duration_sec() > NoteLength::Eighth.duration_sec());
    assert!(NoteLength::Eighth.duration_sec() > NoteLength::Sixteenth.duration_sec());
    for length in NoteLength::ALL {
        assert!(length.duration_sec() > 0.0);
    }
}

#[test]
fn random_notes_stay_on_the_scale() {
    let mut rng = StdRng::seed_from_u64(42);
    let allowed: Vec<f32> = SCALE_MIDI.iter().map(|m| midi_to_hz(*m as f32)).collect();
    let durations = [0.5, 0.25, 0.125];

    for _ in 0..200 {
        let note = random_note(&mut rng);
        assert!(
            allowed.iter().any(|f| (f - note.frequency_hz).abs() < 1e-3),
            "frequency {} not in the scale",
            note.frequency_hz
        );
        assert!((0.5..=1.0).contains(&note.velocity));
        assert!(durations.contains(&note.duration_sec));
    }
}
