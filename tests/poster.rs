use patternstudio::color::Rgb;
use patternstudio::poster::surface::FontFace;
use patternstudio::poster::{DisplayList, PatternImage, PosterEditor, PosterSize};

fn pattern() -> PatternImage {
    PatternImage {
        corner: Rgb::new(0.2, 0.3, 0.4),
    }
}

fn draw(editor: &PosterEditor) -> DisplayList {
    let (width, height) = editor.dimensions();
    let mut list = DisplayList::new(width, height);
    editor.render(&mut list, &pattern());
    list
}

/// Baseline of the first title glyph, relative to the poster height.
fn title_baseline(list: &DisplayList, height: u32) -> f64 {
    let (_, _, y, _) = list
        .texts()
        .filter(|(_, _, _, style)| style.font.face == FontFace::Grotesk)
        .max_by(|a, b| a.3.font.size.total_cmp(&b.3.font.size))
        .expect("a title glyph");
    y / height as f64
}

#[test]
fn layout_scales_with_print_size() {
    for pattern_type in ["cosmic", "pixelated"] {
        let mut editor = PosterEditor::new(pattern_type).unwrap();
        let a4 = title_baseline(&draw(&editor), editor.dimensions().1);
        editor.select_size(PosterSize::A3);
        let a3 = title_baseline(&draw(&editor), editor.dimensions().1);
        assert!((a4 - a3).abs() < 1e-9, "{pattern_type}: {a4} vs {a3}");
    }
}

#[test]
fn rendering_is_repeatable() {
    let mut editor = PosterEditor::new("cosmic").unwrap();
    editor.set_field("title", "Nebula").unwrap();
    assert_eq!(draw(&editor).ops(), draw(&editor).ops());
}

#[test]
fn size_changes_keep_template_and_fields() {
    let mut editor = PosterEditor::new("pixelated").unwrap();
    editor.set_field("title", "Night Shift").unwrap();
    let template = editor.template().id;
    let values = editor.values().clone();

    editor.select_size(PosterSize::from_key("a3"));
    editor.select_size(PosterSize::from_key("a2"));

    assert_eq!(editor.size(), PosterSize::A2);
    assert_eq!(editor.dimensions(), (4961, 7016));
    assert_eq!(editor.template().id, template);
    assert_eq!(editor.values(), &values);
    assert_eq!(
        editor.download_name(42),
        format!("poster-{template}-A2-42.png")
    );
}

#[test]
fn switching_template_reseeds_fields() {
    let mut editor = PosterEditor::new("cosmic").unwrap();
    editor.set_field("title", "Changed").unwrap();
    editor.select_template("concert");
    assert_eq!(editor.template().id, "concert");
    editor.select_template("abstract");
    assert_ne!(editor.values().get("title"), "Changed");
}

#[test]
fn unknown_pattern_type_has_no_editor() {
    assert!(PosterEditor::new("plasma").is_err());
}
