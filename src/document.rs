//! Document host capability
//!
//! The suggestion core never owns document content. It reads the caret and
//! the current text block through [`DocumentHost`] and writes only through
//! [`DocumentHost::insert_text`].

/// Linear character offset into the host document
pub type Position = usize;

/// Read/write operations the suggestion core needs from an editor
pub trait DocumentHost {
    /// Current caret position
    fn caret(&self) -> Position;

    /// Plain text of the block (paragraph) the caret sits in
    fn current_block_text(&self) -> String;

    /// Whether the caret's parent block holds plain text
    fn is_caret_in_text_block(&self) -> bool {
        true
    }

    /// Whether the caret sits at the very end of its text block
    fn is_caret_at_block_end(&self) -> bool;

    /// Insert `text` at `position` as a single edit
    fn insert_text(&mut self, text: &str, position: Position);
}

/// What caused a document change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The user typed or deleted text
    Input,
    /// Content changed through code (accepting a suggestion, loading a file)
    Programmatic,
    /// The caret moved without an edit
    Selection,
}
