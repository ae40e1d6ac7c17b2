use cloudnotes::application::NotesView;
use cloudnotes::domain::Note;
use cloudnotes::ports::HtmlPresenter;

fn note(id: &str, name: &str, image: Option<&str>) -> Note {
    Note {
        id: Some(id.to_string()),
        name: name.to_string(),
        description: format!("about {name}"),
        image: image.map(str::to_string),
    }
}

#[test]
fn given_notes_with_images_when_rendering_then_includes_image_tags() {
    // Arrange
    let view = NotesView {
        notes: vec![note("2", "b", Some("https://x/b"))],
        ..NotesView::default()
    };

    // Act
    let html = HtmlPresenter::new().render(&view);

    // Assert
    assert!(html.contains(r#"src="https://x/b""#));
    assert!(html.contains(r#"alt="visual aid for b""#));
    assert!(html.contains("<h5>b</h5>"));
    assert!(html.contains("about b"));
}

#[test]
fn given_note_with_empty_image_when_rendering_then_omits_image_tag() {
    let view = NotesView {
        notes: vec![note("1", "a", Some(""))],
        ..NotesView::default()
    };

    let html = HtmlPresenter::new().render(&view);

    assert!(!html.contains("<img"));
    assert!(html.contains(r#"data-note-id="1""#));
}

#[test]
fn given_empty_view_when_rendering_then_shows_placeholder() {
    let html = HtmlPresenter::new().render(&NotesView::default());

    assert!(html.contains("My Notes App"));
    assert!(html.contains("No notes yet"));
}

#[test]
fn given_recorded_failure_when_rendering_then_shows_failure_banner() {
    let view = NotesView {
        last_failure: Some("delete failed: <boom>".to_string()),
        ..NotesView::default()
    };

    let html = HtmlPresenter::new().render(&view);

    assert!(html.contains(r#"<div class="failure">delete failed: &lt;boom&gt;</div>"#));
}

#[test]
fn given_several_notes_when_rendering_then_keeps_order() {
    let view = NotesView {
        notes: vec![note("3", "c", None), note("1", "a", None)],
        ..NotesView::default()
    };

    let html = HtmlPresenter::new().render(&view);

    let c = html.find("<h5>c</h5>").expect("c rendered");
    let a = html.find("<h5>a</h5>").expect("a rendered");
    assert!(c < a);
}
