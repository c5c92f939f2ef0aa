// 📿 Mala Counter - Decorative 108-bead japa counter
//
// Purely ornamental bookkeeping: a bead tally that rolls over at the
// traditional 108-count mala boundary, plus the count of completed malas.
// The tally is never persisted; the selected chant phrase is (see prefs).

/// Beads on a traditional mala
pub const MALA_SIZE: u32 = 108;

/// Built-in chant phrases offered by the counter widget
pub const CHANT_PHRASES: &[&str] = &[
    "ॐ",
    "ॐ नमः शिवाय",
    "श्री राम जय राम जय जय राम",
    "ॐ गं गणपतये नमः",
    "हरे कृष्ण",
];

pub struct MalaCounter {
    /// Bead position within the current mala, 0..MALA_SIZE
    tally: u32,

    /// Full malas completed this session
    completed: u32,

    /// Index into CHANT_PHRASES
    phrase_index: usize,

    /// True only on the advance that closed a mala, until the next
    /// advance or reset; lets the display show bead 108 instead of 0
    just_completed: bool,
}

impl MalaCounter {
    pub fn new() -> Self {
        MalaCounter {
            tally: 0,
            completed: 0,
            phrase_index: 0,
            just_completed: false,
        }
    }

    /// Restore the persisted chant phrase selection. Unknown phrases fall
    /// back to the first built-in one.
    pub fn with_phrase(phrase: &str) -> Self {
        let phrase_index = CHANT_PHRASES
            .iter()
            .position(|p| *p == phrase)
            .unwrap_or(0);
        MalaCounter {
            tally: 0,
            completed: 0,
            phrase_index,
            just_completed: false,
        }
    }

    /// Advance one bead. Crossing the 108th bead rolls the tally back to
    /// zero and completes a mala.
    pub fn advance(&mut self) {
        self.tally += 1;
        if self.tally >= MALA_SIZE {
            self.tally = 0;
            self.completed += 1;
            self.just_completed = true;
        } else {
            self.just_completed = false;
        }
    }

    /// Clear the bead tally, keeping completed malas
    pub fn reset(&mut self) {
        self.tally = 0;
        self.just_completed = false;
    }

    /// Clear everything
    pub fn reset_all(&mut self) {
        self.tally = 0;
        self.completed = 0;
        self.just_completed = false;
    }

    /// Select the next chant phrase, wrapping around the built-in list
    pub fn next_phrase(&mut self) {
        self.phrase_index = (self.phrase_index + 1) % CHANT_PHRASES.len();
    }

    pub fn phrase(&self) -> &'static str {
        CHANT_PHRASES[self.phrase_index]
    }

    pub fn tally(&self) -> u32 {
        self.tally
    }

    /// Bead position for display. Shows 108 on the advance that closed
    /// a mala, and 0 for a fresh or reset counter.
    pub fn bead_display(&self) -> u32 {
        if self.just_completed {
            MALA_SIZE
        } else {
            self.tally
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Fraction of the current mala completed, for gauges. Holds at 1.0
    /// on the closing bead so the gauge fills before wrapping.
    pub fn progress(&self) -> f64 {
        if self.just_completed {
            1.0
        } else {
            f64::from(self.tally) / f64::from(MALA_SIZE)
        }
    }

    /// Total beads counted this session
    pub fn total_beads(&self) -> u64 {
        u64::from(self.completed) * u64::from(MALA_SIZE) + u64::from(self.tally)
    }
}

impl Default for MalaCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let counter = MalaCounter::new();
        assert_eq!(counter.tally(), 0);
        assert_eq!(counter.completed(), 0);
        assert_eq!(counter.phrase(), CHANT_PHRASES[0]);
    }

    #[test]
    fn test_advance() {
        let mut counter = MalaCounter::new();
        counter.advance();
        counter.advance();
        assert_eq!(counter.tally(), 2);
        assert_eq!(counter.total_beads(), 2);
    }

    #[test]
    fn test_mala_rollover_at_108() {
        let mut counter = MalaCounter::new();
        for _ in 0..MALA_SIZE {
            counter.advance();
        }

        // The 108th bead completes the mala and rolls the tally over
        assert_eq!(counter.tally(), 0);
        assert_eq!(counter.completed(), 1);
        assert_eq!(counter.total_beads(), 108);

        // The 109th advance lands on bead 1 of the next cycle
        counter.advance();
        assert_eq!(counter.tally(), 1);
        assert_eq!(counter.completed(), 1);
    }

    #[test]
    fn test_reset_keeps_completed_malas() {
        let mut counter = MalaCounter::new();
        for _ in 0..(MALA_SIZE + 10) {
            counter.advance();
        }
        assert_eq!(counter.completed(), 1);
        assert_eq!(counter.tally(), 10);

        counter.reset();
        assert_eq!(counter.tally(), 0);
        assert_eq!(counter.completed(), 1);

        counter.reset_all();
        assert_eq!(counter.completed(), 0);
    }

    #[test]
    fn test_phrase_cycling() {
        let mut counter = MalaCounter::new();
        counter.next_phrase();
        assert_eq!(counter.phrase(), CHANT_PHRASES[1]);

        for _ in 0..CHANT_PHRASES.len() - 1 {
            counter.next_phrase();
        }
        assert_eq!(counter.phrase(), CHANT_PHRASES[0]);
    }

    #[test]
    fn test_restore_persisted_phrase() {
        let counter = MalaCounter::with_phrase("हरे कृष्ण");
        assert_eq!(counter.phrase(), "हरे कृष्ण");

        // Unknown phrase falls back to the default
        let counter = MalaCounter::with_phrase("something else");
        assert_eq!(counter.phrase(), CHANT_PHRASES[0]);
    }

    #[test]
    fn test_bead_display_tracks_the_tally() {
        let mut counter = MalaCounter::new();
        assert_eq!(counter.bead_display(), 0);

        counter.advance();
        assert_eq!(counter.bead_display(), 1);
    }

    #[test]
    fn test_bead_display_shows_closing_bead() {
        let mut counter = MalaCounter::new();
        for _ in 0..MALA_SIZE {
            counter.advance();
        }

        // Tally rolled to 0, but the display holds on the closing bead
        assert_eq!(counter.bead_display(), MALA_SIZE);
        assert!((counter.progress() - 1.0).abs() < 1e-9);

        // The next advance starts the new cycle at bead 1
        counter.advance();
        assert_eq!(counter.bead_display(), 1);

        // A reset after a completed mala goes back to 0, not 108
        for _ in 1..MALA_SIZE {
            counter.advance();
        }
        counter.reset();
        assert_eq!(counter.bead_display(), 0);
        assert!((counter.progress()).abs() < 1e-9);
    }

    #[test]
    fn test_progress_fraction() {
        let mut counter = MalaCounter::new();
        for _ in 0..54 {
            counter.advance();
        }
        assert!((counter.progress() - 0.5).abs() < 1e-9);
    }
}
