//! # Edit Session
//!
//! Tracks one user's edit of the selected node.
//!
//! ```text
//! Viewing ──begin_edit──▶ Editing ──save──▶ Saving ──ok──▶ Viewing
//!    ▲                     │  ▲                 │
//!    └──cancel / selection─┘  └──────failed─────┘
//! ```
//!
//! The session never holds the document. The caller passes the current
//! document text to [`EditSession::save`], and the text-editor store, the
//! graph view and the selection owner are reached through [`Collaborators`].

use json_edit_path::{format_path, Path, PathStep};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::coerce::coerce;
use crate::errors::EditError;
use crate::mutator::apply_with;
use crate::projection::to_text_with;
use crate::types::{EditOptions, NodeShape, Selection};

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing,
    /// Only held while [`EditSession::save`] runs.
    Saving,
}

/// The parts of the application a successful save has to reach.
pub trait Collaborators {
    /// Replace the authoritative document text.
    fn replace_document(&mut self, text: &str);

    /// Announce that the document was replaced, so derived views can rebuild.
    fn document_replaced(&mut self, text: &str);

    /// Drop the current selection; it points into the old document.
    fn clear_selection(&mut self);
}

/// What an edit was started on. Fixed for the whole edit.
#[derive(Debug, Clone)]
struct EditTarget {
    path: Path,
    shape: NodeShape,
}

/// Single edit session for the node open in the editor.
#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
    text: String,
    error: Option<String>,
    target: Option<EditTarget>,
    options: EditOptions,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_options(EditOptions::default())
    }

    pub fn with_options(options: EditOptions) -> Self {
        Self {
            state: SessionState::Viewing,
            text: String::new(),
            error: None,
            target: None,
            options,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Message of the last failed save, while the edit is still open.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current edit text. Empty while viewing.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leaf/composite shape of the node being edited.
    pub fn shape(&self) -> Option<NodeShape> {
        self.target.as_ref().map(|t| t.shape)
    }

    /// Path of the node being edited.
    pub fn path(&self) -> Option<&[PathStep]> {
        self.target.as_ref().map(|t| t.path.as_slice())
    }

    /// Start editing `selection`, seeding the text from its projection.
    ///
    /// Leaf-ness is taken from these rows and kept until the edit ends.
    /// Calling this while already editing restarts the edit.
    pub fn begin_edit(&mut self, selection: &Selection) {
        let shape = selection.shape();
        debug!(path = %format_path(&selection.path), ?shape, "begin edit");
        self.text = to_text_with(&selection.rows, &self.options);
        self.error = None;
        self.target = Some(EditTarget {
            path: selection.path.clone(),
            shape,
        });
        self.state = SessionState::Editing;
    }

    /// Replace the edit text. Ignored unless editing.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.state == SessionState::Editing {
            self.text = text.into();
        } else {
            debug!(state = ?self.state, "ignoring text outside an edit");
        }
    }

    /// Save the edit into `document` and hand the result to `host`.
    ///
    /// On success the new document text is returned and also pushed to
    /// `host`, the selection is cleared and the session goes back to
    /// viewing. On failure nothing reaches `host`; the edit text is kept,
    /// the error message is recorded and the session stays in editing.
    ///
    /// # Errors
    ///
    /// `EditError::NotEditing` if no edit is open, otherwise whatever
    /// reading the text or applying it to `document` failed with.
    #[instrument(skip_all, fields(path = tracing::field::Empty))]
    pub fn save<C>(&mut self, document: &str, host: &mut C) -> Result<String, EditError>
    where
        C: Collaborators + ?Sized,
    {
        let target = match (&self.state, &self.target) {
            (SessionState::Editing, Some(target)) => target.clone(),
            _ => return Err(EditError::NotEditing),
        };
        tracing::Span::current().record("path", format_path(&target.path).as_str());

        self.state = SessionState::Saving;
        let result = read_edit(&self.text, target.shape)
            .and_then(|value| apply_with(document, &target.path, value, &self.options));

        match result {
            Ok(new_document) => {
                host.replace_document(&new_document);
                host.document_replaced(&new_document);
                host.clear_selection();
                self.reset();
                debug!("saved");
                Ok(new_document)
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.error = Some(e.to_string());
                self.state = SessionState::Editing;
                Err(e)
            }
        }
    }

    /// Drop the edit without touching the document.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Editing {
            debug!("edit cancelled");
        }
        self.reset();
    }

    /// The selection changed underneath the session (another node picked,
    /// or the editor closed). Any open edit is discarded.
    pub fn selection_changed(&mut self) {
        if self.state != SessionState::Viewing {
            debug!(state = ?self.state, "selection changed, discarding edit");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = SessionState::Viewing;
        self.text.clear();
        self.error = None;
        self.target = None;
    }
}

/// Read edited text back into a value for a node of the given shape.
///
/// Leaves go through [`coerce`] against the original row type; composites
/// must be a JSON fragment.
pub fn read_edit(text: &str, shape: NodeShape) -> Result<Value, EditError> {
    match shape {
        NodeShape::Leaf { ty } => coerce(text, ty.into()),
        NodeShape::Composite => {
            serde_json::from_str(text).map_err(|e| EditError::InvalidFragment(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NodeRow, ValueType};
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        replaced: Vec<String>,
        notified: Vec<String>,
        cleared: usize,
    }

    impl Collaborators for Recorder {
        fn replace_document(&mut self, text: &str) {
            self.replaced.push(text.to_string());
        }

        fn document_replaced(&mut self, text: &str) {
            self.notified.push(text.to_string());
        }

        fn clear_selection(&mut self) {
            self.cleared += 1;
        }
    }

    fn leaf_selection() -> Selection {
        Selection::new(vec![NodeRow::leaf(json!(30))], vec!["age".into()])
    }

    #[test]
    fn starts_viewing() {
        let session = EditSession::new();
        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.error(), None);
        assert_eq!(session.text(), "");
        assert_eq!(session.shape(), None);
    }

    #[test]
    fn begin_edit_seeds_text() {
        let mut session = EditSession::new();
        session.begin_edit(&leaf_selection());
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.text(), "30");
        assert_eq!(session.shape(), Some(NodeShape::Leaf { ty: ValueType::Number }));
        assert_eq!(session.path(), Some(&[PathStep::from("age")][..]));
    }

    #[test]
    fn save_leaf_success() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        session.set_text("31");

        let out = session.save(r#"{"age": 30}"#, &mut host).unwrap();
        assert_eq!(out, "{\n  \"age\": 31\n}");
        assert_eq!(host.replaced, vec![out.clone()]);
        assert_eq!(host.notified, vec![out]);
        assert_eq!(host.cleared, 1);
        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.text(), "");
        assert_eq!(session.error(), None);
    }

    #[test]
    fn save_failure_keeps_text_and_sets_error() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        session.set_text("thirty");

        let err = session.save(r#"{"age": 30}"#, &mut host).unwrap_err();
        assert_eq!(err, EditError::InvalidNumber("thirty".into()));
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.text(), "thirty");
        assert_eq!(session.error(), Some("Invalid number: \"thirty\""));
        assert!(host.replaced.is_empty());
        assert!(host.notified.is_empty());
        assert_eq!(host.cleared, 0);
    }

    #[test]
    fn retry_after_failure_clears_error() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        session.set_text("x");
        assert!(session.save("{}", &mut host).is_err());
        session.set_text("5");
        assert!(session.save("{}", &mut host).is_ok());
        assert_eq!(session.error(), None);
        assert_eq!(host.replaced, vec!["{\n  \"age\": 5\n}".to_string()]);
    }

    #[test]
    fn malformed_document_leaves_host_untouched() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        let err = session.save("{not json", &mut host).unwrap_err();
        assert!(matches!(err, EditError::MalformedDocument(_)));
        assert!(host.replaced.is_empty());
        assert_eq!(session.state(), SessionState::Editing);
        assert!(session.error().unwrap().starts_with("Malformed document: "));
    }

    #[test]
    fn composite_invalid_fragment() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        let sel = Selection::new(vec![NodeRow::field("a", &json!(1))], vec![]);
        session.begin_edit(&sel);
        session.set_text("{\"a\": ");
        let err = session.save("{\"a\": 1}", &mut host).unwrap_err();
        assert!(matches!(err, EditError::InvalidFragment(_)));
        assert_eq!(session.text(), "{\"a\": ");
    }

    #[test]
    fn cancel_discards_edit() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        session.set_text("99");
        session.cancel();
        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.text(), "");
        assert_eq!(session.save("{}", &mut host), Err(EditError::NotEditing));
        assert!(host.replaced.is_empty());
    }

    #[test]
    fn selection_change_resets_from_any_state() {
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        session.begin_edit(&leaf_selection());
        session.set_text("bad");
        assert!(session.save("{}", &mut host).is_err());
        session.selection_changed();
        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.error(), None);
        assert_eq!(session.path(), None);
    }

    #[test]
    fn set_text_ignored_while_viewing() {
        let mut session = EditSession::new();
        session.set_text("ignored");
        assert_eq!(session.text(), "");
    }

    #[test]
    fn shape_is_fixed_at_begin_edit() {
        // A leaf stays a leaf even if the text looks like an object.
        let mut session = EditSession::new();
        let mut host = Recorder::default();
        let sel = Selection::new(vec![NodeRow::leaf(json!("s"))], vec!["k".into()]);
        session.begin_edit(&sel);
        session.set_text("{\"x\": 1}");
        let out = session.save("{}", &mut host).unwrap();
        let doc: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc, json!({"k": "{\"x\": 1}"}));
    }

    #[test]
    fn read_edit_dispatch() {
        assert_eq!(read_edit("7", NodeShape::Leaf { ty: ValueType::Number }).unwrap(), json!(7));
        assert_eq!(read_edit("{\"a\":1}", NodeShape::Composite).unwrap(), json!({"a": 1}));
        assert!(matches!(
            read_edit("nope", NodeShape::Composite),
            Err(EditError::InvalidFragment(_))
        ));
    }
}
