//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Rendering functions return strings; the `display_*` helpers only print.

use console::style;

use crate::session::{AnnotationSession, SessionState};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Render the session for the terminal.
///
/// Pure function of the session; calling it repeatedly has no effect.
///
/// # Arguments
/// * `session` - The session to render
pub fn render_session(session: &AnnotationSession) -> String {
    match session.state() {
        SessionState::Editing => format!(
            "Current Version: {}\nNew Version: {}\n\nPlease supply an annotation\n{}",
            session.current(),
            session.proposed(),
            render_input(session)
        ),
        SessionState::Confirmed => format!(
            "\n  {} Updated version to {}\n",
            style("✓").color256(42),
            session.proposed()
        ),
        SessionState::Failed(error) => format!(
            "\n  {} Failed to create tag {}: {}\n",
            style("✗").red(),
            session.proposed(),
            error
        ),
        SessionState::Cancelled => format!(
            "\n  Tag creation cancelled, {} was not created\n",
            session.proposed()
        ),
    }
}

/// Input line with a block cursor; the placeholder is shown dimmed while the
/// buffer is empty.
fn render_input(session: &AnnotationSession) -> String {
    let input = session.input();
    if input.is_empty() {
        return format!(
            "> {}{}",
            style(" ").reverse(),
            style(session.placeholder()).dim()
        );
    }

    let (before, after) = input.split_at_cursor();
    let mut rest = after.chars();
    let under_cursor = rest.next().unwrap_or(' ');
    format!(
        "> {}{}{}",
        before,
        style(under_cursor).reverse(),
        rest.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use crate::error::Result;
    use crate::session::{InputKey, TagCreator};

    struct Succeeding;

    impl TagCreator for Succeeding {
        fn create_tag(&self, _version: &Version, _annotation: &str) -> Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl TagCreator for Failing {
        fn create_tag(&self, version: &Version, _annotation: &str) -> Result<()> {
            Err(crate::error::GitVersionError::TagExists(version.to_string()))
        }
    }

    fn session() -> AnnotationSession {
        AnnotationSession::new(
            Version::new(1, 2, 3),
            Version::new(1, 2, 4).with_label("rc1"),
            "docs: typo",
        )
    }

    #[test]
    fn test_render_editing() {
        let frame = render_session(&session());
        assert!(frame.starts_with("Current Version: v1.2.3\nNew Version: v1.2.4-rc1\n"));
        assert!(frame.contains("Please supply an annotation"));
        assert!(frame.contains("docs: typo"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let s = session();
        assert_eq!(render_session(&s), render_session(&s));
    }

    #[test]
    fn test_render_typed_text() {
        let mut s = session();
        for c in "Release".chars() {
            s.handle_key(InputKey::Char(c), &Succeeding);
        }
        let frame = render_session(&s);
        assert!(frame.contains("Release"));
        assert!(!frame.contains("docs: typo"));
    }

    #[test]
    fn test_render_confirmed() {
        let mut s = session();
        s.handle_key(InputKey::Right, &Succeeding);
        s.handle_key(InputKey::Enter, &Succeeding);
        let frame = render_session(&s);
        assert!(frame.contains("Updated version to v1.2.4-rc1"));
        assert!(!frame.contains("Current Version"));
    }

    #[test]
    fn test_render_failed() {
        let mut s = session();
        s.handle_key(InputKey::Enter, &Failing);
        let frame = render_session(&s);
        assert!(frame.contains("Failed to create tag v1.2.4-rc1"));
        assert!(frame.contains("already exists"));
    }

    #[test]
    fn test_render_cancelled() {
        let mut s = session();
        s.handle_key(InputKey::Escape, &Succeeding);
        assert!(render_session(&s).contains("cancelled"));
    }

    #[test]
    fn test_display_helpers() {
        // Visual verification - output goes to stdout/stderr
        display_error("test error");
        display_success("test success");
    }
}
