//! Starter templates and reusable pattern snippets.
//!
//! The desk seeds slot A with a dark-wave template and slot B with a
//! house template so a duo can start playing immediately. The snippet
//! builders produce fragments in the pattern language the external
//! server speaks; they are plain string builders, no pattern algebra
//! happens here.

use crate::slot::Slot;

/// Starter code for slot A.
pub const DARK_WAVE_STARTER: &str = r#"// Dark Wave Starter Template
stack(
  note("c2").slow(4),                    // Bass
  seq("c3 e3 g3").fast(2).offbeat(0.5), // Arpeggio
  s("bd [~ sd] hh").slow(2)             // Drums
).reverb(0.6)"#;

/// Starter code for slot B.
pub const HOUSE_STARTER: &str = r#"// House Starter Template
stack(
  note("c2").slow(4),                   // Kick
  note("c1").every(2).offbeat(0.5),     // Bass
  note("f#5").fast(4),                  // Hi-hat
  chord("c4 e4 g4").every(4)            // Chord
).delay(0.5)"#;

/// The starter template loaded into a slot at startup.
pub fn starter_for(slot: Slot) -> &'static str {
    match slot {
        Slot::A => DARK_WAVE_STARTER,
        Slot::B => HOUSE_STARTER,
    }
}

/// Dark-wave snippet builders.
pub mod dark_wave {
    pub fn bass(note: &str) -> String {
        format!(r#"note("{note}").slow(4).gain(0.7)"#)
    }

    pub fn arpeggio(notes: &str) -> String {
        format!(r#"seq("{notes}").fast(2).offbeat(0.5)"#)
    }

    pub fn drum() -> String {
        r#"s("bd sd [~ hh] hh").slow(2)"#.to_string()
    }

    pub fn pad(chord: &str) -> String {
        format!(r#"chord("{chord}").slow(8).gain(0.4)"#)
    }
}

/// House snippet builders.
pub mod house {
    pub fn kick() -> String {
        r#"note("c2").slow(4)"#.to_string()
    }

    pub fn bass(note: &str) -> String {
        format!(r#"note("{note}").every(2).offbeat(0.5)"#)
    }

    pub fn chord(chord: &str) -> String {
        format!(r#"chord("{chord}").every(4)"#)
    }

    pub fn hat() -> String {
        r#"note("f#5").fast(4)"#.to_string()
    }

    pub fn clap() -> String {
        r#"note("d2").every(2).offbeat(1)"#.to_string()
    }
}

/// Cross-genre snippet builders.
pub mod fusion {
    pub fn hybrid_bass(dark_note: &str, house_note: &str) -> String {
        format!(r#"stack(note("{dark_note}").slow(2), note("{house_note}").fast(2))"#)
    }

    pub fn rhythmic_blend() -> String {
        r#"s("bd [~ sd] hh").slow(1) + s("[~ cp] cp").fast(2)"#.to_string()
    }
}

/// Effect wrappers applied around an existing snippet.
pub mod effects {
    pub fn with_reverb(pattern: &str, size: f64) -> String {
        format!("{pattern}.reverb({size})")
    }

    pub fn with_delay(pattern: &str, time: f64, feedback: f64) -> String {
        format!("{pattern}.delay({time}).delayfb({feedback})")
    }

    pub fn with_filter(pattern: &str, freq: f64, q: f64) -> String {
        format!("{pattern}.cutoff({freq}).resonance({q})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starters_are_distinct_and_nonempty() {
        assert!(!DARK_WAVE_STARTER.is_empty());
        assert!(!HOUSE_STARTER.is_empty());
        assert_ne!(starter_for(Slot::A), starter_for(Slot::B));
    }

    #[test]
    fn test_builders_embed_their_arguments() {
        assert_eq!(dark_wave::bass("c2"), r#"note("c2").slow(4).gain(0.7)"#);
        assert!(house::bass("c1").contains("c1"));
        assert!(fusion::hybrid_bass("c1", "c2").starts_with("stack("));
    }

    #[test]
    fn test_effect_wrappers_append_to_the_pattern() {
        let base = house::kick();
        let wet = effects::with_reverb(&base, 0.8);
        assert!(wet.starts_with(&base));
        assert!(wet.ends_with(".reverb(0.8)"));
    }
}
