// src/ports/html.rs
use crate::application::NotesView;
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_card(&self, note: &Note) -> String {
        let image = match note.image.as_deref().filter(|image| !image.is_empty()) {
            Some(src) => format!(
                r#"<img class="note-image" src="{}" alt="visual aid for {}">"#,
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(&note.name)
            ),
            None => String::new(),
        };
        let id = note.id.as_deref().unwrap_or(&note.name);

        format!(
            r#"        <div class="card" data-note-id="{id}">
            {image}
            <div class="note-body">
                <h5>{name}</h5>
                <span>{description}</span>
            </div>
        </div>
"#,
            id = encode_double_quoted_attribute(id),
            image = image,
            name = encode_text(&note.name),
            description = encode_text(&note.description),
        )
    }

    #[instrument(level = "debug", skip(self, view), fields(count = view.notes.len()))]
    pub fn render(&self, view: &NotesView) -> String {
        let cards: String = view.notes.iter().map(|note| self.render_card(note)).collect();
        let failure = match &view.last_failure {
            Some(message) => format!(
                r#"    <div class="failure">{}</div>
"#,
                encode_text(message)
            ),
            None => String::new(),
        };
        let empty = if view.notes.is_empty() {
            r#"        <p class="empty">No notes yet</p>
"#
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>My Notes App</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
            text-align: center;
        }}
        .card {{
            display: flex;
            gap: 1rem;
            align-items: flex-start;
            background: white;
            border-radius: 8px;
            padding: 1rem;
            margin: 1rem 0;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            text-align: left;
        }}
        .note-image {{
            width: 70%;
            max-width: 25rem;
        }}
        .failure {{
            background: #fdecea;
            color: #611a15;
            padding: 0.5rem 1rem;
            border-radius: 4px;
        }}
    </style>
</head>
<body>
    <h1>My Notes App</h1>
{failure}    <h2>Current Notes</h2>
    <div class="notes">
{cards}{empty}    </div>
</body>
</html>"#,
            failure = failure,
            cards = cards,
            empty = empty,
        )
    }
}
