// src/ports/text.rs
use crate::domain::Note;
use anyhow::{Context, Result};

/// Terminal rendering of the note collection.
#[derive(Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    pub fn new() -> Self {
        Self
    }

    /// One line per note: id, name, description and the image URL if any.
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes\n".to_string();
        }

        let id_width = notes
            .iter()
            .map(|n| n.id().map_or(1, str::len))
            .max()
            .unwrap_or(1);
        let name_width = notes.iter().map(|n| n.name.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        for note in notes {
            let line = format!(
                "{:<id_width$}  {:<name_width$}  {}",
                note.id().unwrap_or("-"),
                note.name,
                first_line(&note.description),
            );
            out.push_str(line.trim_end());
            if let Some(image) = note.image.as_deref().filter(|i| !i.is_empty()) {
                out.push_str("  [");
                out.push_str(image);
                out.push(']');
            }
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self, notes: &[Note]) -> Result<String> {
        serde_json::to_string_pretty(notes).context("Failed to serialize notes to JSON")
    }
}

fn first_line(text: &str) -> &str {
    text.lines().map(str::trim).find(|line| !line.is_empty()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, name: &str, description: &str, image: Option<&str>) -> Note {
        Note {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn given_no_notes_when_rendering_then_says_so() {
        assert_eq!(TextPresenter::new().render_list(&[]), "No notes\n");
    }

    #[test]
    fn given_notes_when_rendering_then_aligns_columns_and_shows_image() {
        // Arrange
        let notes = vec![
            note("1", "a", "d1", None),
            note("22", "bbb", "line one\nline two", Some("https://x/b")),
        ];

        // Act
        let out = TextPresenter::new().render_list(&notes);

        // Assert
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "1   a    d1");
        assert_eq!(lines[1], "22  bbb  line one  [https://x/b]");
    }

    #[test]
    fn given_notes_when_rendering_json_then_uses_wire_field_names() -> Result<()> {
        let json = TextPresenter::new().render_json(&[note("1", "a", "d1", Some(""))])?;

        assert!(json.contains(r#""id": "1""#));
        assert!(json.contains(r#""name": "a""#));
        assert!(json.contains(r#""description": "d1""#));
        assert!(json.contains(r#""image": """#));
        Ok(())
    }
}
