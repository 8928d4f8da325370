use super::*;

#[test]
fn non_font_bytes_are_rejected() {
    let path = std::env::temp_dir().join(format!(
        "portrait_gallery_not_a_font_{}.ttf",
        std::process::id()
    ));
    std::fs::write(&path, b"definitely not a font").unwrap();
    let err = CaptionFont::from_path(&path).unwrap_err();
    assert!(matches!(err, GalleryError::Config(_)));
    std::fs::remove_file(&path).ok();
}

#[test]
fn empty_database_yields_no_font() {
    let db = usvg::fontdb::Database::new();
    assert!(CaptionFont::from_database(&db).is_none());
}

#[test]
fn system_font_if_present_has_bytes() {
    let Some(font) = CaptionFont::from_system() else {
        return;
    };
    assert!(!font.bytes.is_empty());
}

fn push_face(db: &mut fontdb::Database, family: &str, monospaced: bool, weight: fontdb::Weight) {
    db.push_face_info(fontdb::FaceInfo {
        id: fontdb::ID::dummy(),
        source: fontdb::Source::Binary(Arc::new(family.as_bytes().to_vec())),
        index: 0,
        families: vec![(family.to_string(), fontdb::Language::English_UnitedStates)],
        post_script_name: family.replace(' ', ""),
        style: fontdb::Style::Normal,
        weight,
        stretch: fontdb::Stretch::Normal,
        monospaced,
    });
}

fn chosen_family(db: &fontdb::Database) -> String {
    let font = CaptionFont::from_database(db).unwrap();
    String::from_utf8(font.bytes.to_vec()).unwrap()
}

#[test]
fn dejavu_sans_wins_over_earlier_unrelated_faces() {
    let mut db = fontdb::Database::new();
    push_face(&mut db, "DejaVu Math TeX Gyre", false, fontdb::Weight::NORMAL);
    push_face(&mut db, "DejaVu Sans Mono", true, fontdb::Weight::NORMAL);
    push_face(&mut db, "DejaVu Serif", false, fontdb::Weight::NORMAL);
    push_face(&mut db, "DejaVu Sans", false, fontdb::Weight::NORMAL);
    assert_eq!(chosen_family(&db), "DejaVu Sans");
}

#[test]
fn preferred_family_beats_fallback_list() {
    let mut db = fontdb::Database::new();
    push_face(&mut db, "Noto Sans", false, fontdb::Weight::NORMAL);
    push_face(&mut db, PREFERRED_CAPTION_FAMILY, false, fontdb::Weight::NORMAL);
    assert_eq!(chosen_family(&db), PREFERRED_CAPTION_FAMILY);
}

#[test]
fn last_resort_skips_monospace_and_bold_faces() {
    let mut db = fontdb::Database::new();
    push_face(&mut db, "Obscure Mono", true, fontdb::Weight::NORMAL);
    push_face(&mut db, "Obscure Sans Heavy", false, fontdb::Weight::BOLD);
    push_face(&mut db, "Obscure Math", false, fontdb::Weight::NORMAL);
    push_face(&mut db, "Obscure Sans", false, fontdb::Weight::NORMAL);
    assert_eq!(chosen_family(&db), "Obscure Sans");

    let mut no_sans = fontdb::Database::new();
    push_face(&mut no_sans, "Obscure Mono", true, fontdb::Weight::NORMAL);
    push_face(&mut no_sans, "Obscure Serif", false, fontdb::Weight::NORMAL);
    assert_eq!(chosen_family(&no_sans), "Obscure Serif");
}

#[test]
fn unreadable_font_file_is_config_error() {
    let err = CaptionFont::from_path(Path::new("/definitely/missing/font.ttf")).unwrap_err();
    assert!(matches!(err, GalleryError::Config(_)));
}
