use rand::prelude::*;

/// Length of a triggered note on the ambient grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteLength {
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteLength {
    pub const ALL: [NoteLength; 3] = [NoteLength::Quarter, NoteLength::Eighth, NoteLength::Sixteenth];

    /// Seconds at the fixed 120 BPM ambient tempo.
    pub fn duration_sec(self) -> f32 {
        match self {
            NoteLength::Quarter => 0.5,
            NoteLength::Eighth => 0.25,
            NoteLength::Sixteenth => 0.125,
        }
    }
}

/// Pentatonic-flavoured scale the synth picks from: C4 D4 E4 G4 A4 C5 D5 E5.
pub const SCALE_MIDI: [i32; 8] = [60, 62, 64, 67, 69, 72, 74, 76];

/// One note handed to the audio collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoteEvent {
    pub frequency_hz: f32,
    pub velocity: f32,
    pub duration_sec: f32,
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

pub fn random_note(rng: &mut StdRng) -> NoteEvent {
    let midi = *SCALE_MIDI.choose(rng).unwrap_or(&60);
    let length = *NoteLength::ALL.choose(rng).unwrap_or(&NoteLength::Quarter);
    NoteEvent {
        frequency_hz: midi_to_hz(midi as f32),
        velocity: rng.gen::<f32>() * 0.5 + 0.5,
        duration_sec: length.duration_sec(),
    }
}
