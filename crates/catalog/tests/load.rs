use std::io::Write;

use catalog::{Catalog, CatalogError};

#[test]
fn test_load_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "{}", Catalog::builtin().to_json()).unwrap();

    let c = Catalog::load(f.path()).unwrap();
    assert_eq!(c.len(), 17);
    assert_eq!(c.get(4).unwrap().label, "Potato Early blight");
}

#[test]
fn test_missing_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let res = Catalog::load_or_empty(&dir.path().join("classes.json"));

    assert!(res.is_degraded());
    assert!(matches!(res.issue, Some(CatalogError::Io { .. })));
    assert!(res.value.is_empty());
}

#[test]
fn test_malformed_file_degrades_to_empty() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "[\"not\", \"an\", \"object\"]").unwrap();

    let res = Catalog::load_or_empty(f.path());
    assert!(matches!(res.issue, Some(CatalogError::Parse(_))));
    assert_eq!(res.into_value(), Catalog::default());
}
