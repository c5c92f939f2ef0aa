// 📜 Verse Reader - Book-flip pagination state machine
//
// Tracks the ephemeral reading state for one open scripture: current verse
// index, direction of the last page turn (the UI animates the flip from
// it), single-page vs. list view, and the fullscreen flag. The session is
// discarded when the reader closes; nothing here is persisted.

use crate::content::{Scripture, Verse};

/// Direction of the most recent page turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Forward,
    Backward,
}

/// Single page view, or the "show more" full list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderView {
    Single,
    List,
}

pub struct ReaderSession {
    scripture: Scripture,
    current: usize,
    direction: FlipDirection,
    view: ReaderView,
    fullscreen: bool,
}

impl ReaderSession {
    /// Open a scripture at its first verse.
    ///
    /// Returns None for an unavailable scripture (no verses) — the caller
    /// shows the "coming soon" placeholder instead of a reader.
    pub fn open(scripture: &Scripture) -> Option<Self> {
        if !scripture.is_available() {
            return None;
        }

        Some(ReaderSession {
            scripture: scripture.clone(),
            current: 0,
            direction: FlipDirection::Forward,
            view: ReaderView::Single,
            fullscreen: false,
        })
    }

    // ========================================================================
    // PAGE TURNS
    // ========================================================================

    /// Turn to the next verse. Clamps at the last page — a book, not a
    /// carousel. Direction is recorded even for a clamped turn.
    pub fn flip_forward(&mut self) {
        self.direction = FlipDirection::Forward;
        if self.current + 1 < self.scripture.verse_count() {
            self.current += 1;
        }
    }

    /// Turn to the previous verse. Clamps at the first page.
    pub fn flip_backward(&mut self) {
        self.direction = FlipDirection::Backward;
        if self.current > 0 {
            self.current -= 1;
        }
    }

    /// Jump directly to a verse (from the "show more" list). Out-of-range
    /// indices are ignored. Direction reflects which way the jump went.
    pub fn go_to(&mut self, index: usize) {
        if index >= self.scripture.verse_count() || index == self.current {
            return;
        }
        self.direction = if index > self.current {
            FlipDirection::Forward
        } else {
            FlipDirection::Backward
        };
        self.current = index;
        self.view = ReaderView::Single;
    }

    // ========================================================================
    // VIEW TOGGLES
    // ========================================================================

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ReaderView::Single => ReaderView::List,
            ReaderView::List => ReaderView::Single,
        };
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn scripture(&self) -> &Scripture {
        &self.scripture
    }

    pub fn current_verse(&self) -> &Verse {
        // open() guarantees at least one verse
        &self.scripture.verses[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> FlipDirection {
        self.direction
    }

    pub fn view(&self) -> ReaderView {
        self.view
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn at_first(&self) -> bool {
        self.current == 0
    }

    pub fn at_last(&self) -> bool {
        self.current + 1 == self.scripture.verse_count()
    }

    /// 1-based position and total, for "verse i of n" displays
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.scripture.verse_count())
    }

    /// Display label for the current verse. Verse 0 is the opening couplet
    /// and carries its own label rather than "Verse 0".
    pub fn verse_label(&self, couplet_label: &str, verse_label: &str) -> String {
        let verse = self.current_verse();
        if verse.is_opening() {
            couplet_label.to_string()
        } else {
            format!("{} {}", verse_label, verse.number)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLibrary;

    fn open_chalisa() -> ReaderSession {
        let library = ContentLibrary::load().unwrap();
        let chalisa = library.scripture("hanuman-chalisa").unwrap();
        ReaderSession::open(chalisa).unwrap()
    }

    #[test]
    fn test_open_starts_at_first_verse() {
        let session = open_chalisa();
        assert_eq!(session.current_index(), 0);
        assert!(session.at_first());
        assert!(session.current_verse().is_opening());
        assert_eq!(session.view(), ReaderView::Single);
        assert!(!session.is_fullscreen());
    }

    #[test]
    fn test_open_unavailable_scripture() {
        let library = ContentLibrary::load().unwrap();
        let gita = library.scripture("bhagavad-gita-12").unwrap();
        assert!(ReaderSession::open(gita).is_none());
    }

    #[test]
    fn test_flip_forward_and_backward() {
        let mut session = open_chalisa();

        session.flip_forward();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.direction(), FlipDirection::Forward);

        session.flip_backward();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.direction(), FlipDirection::Backward);
    }

    #[test]
    fn test_flip_clamps_at_both_ends() {
        let mut session = open_chalisa();
        let (_, total) = session.progress();

        // Clamp at the front; direction still recorded
        session.flip_backward();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.direction(), FlipDirection::Backward);

        // Walk past the end
        for _ in 0..total + 5 {
            session.flip_forward();
        }
        assert!(session.at_last());
        assert_eq!(session.current_index(), total - 1);
    }

    #[test]
    fn test_go_to_from_list_view() {
        let mut session = open_chalisa();
        session.toggle_view();
        assert_eq!(session.view(), ReaderView::List);

        session.go_to(3);
        assert_eq!(session.current_index(), 3);
        assert_eq!(session.direction(), FlipDirection::Forward);
        // Jumping closes the list back to the single page
        assert_eq!(session.view(), ReaderView::Single);

        session.go_to(1);
        assert_eq!(session.direction(), FlipDirection::Backward);

        // Out of range is ignored
        session.go_to(999);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_toggles() {
        let mut session = open_chalisa();

        session.toggle_fullscreen();
        assert!(session.is_fullscreen());
        session.toggle_fullscreen();
        assert!(!session.is_fullscreen());

        session.toggle_view();
        session.toggle_view();
        assert_eq!(session.view(), ReaderView::Single);
    }

    #[test]
    fn test_verse_label_for_opening_couplet() {
        let mut session = open_chalisa();

        assert_eq!(session.verse_label("Doha", "Verse"), "Doha");

        session.flip_forward();
        assert_eq!(session.verse_label("Doha", "Verse"), "Verse 1");
    }

    #[test]
    fn test_progress() {
        let mut session = open_chalisa();
        let (pos, total) = session.progress();
        assert_eq!(pos, 1);
        assert_eq!(total, 6);

        session.flip_forward();
        assert_eq!(session.progress(), (2, 6));
    }
}
