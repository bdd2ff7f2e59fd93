//! Tests for ManifestService and Catalog::from_manifest

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use parcel::application::services::ManifestService;
use parcel::application::ApplicationError;
use parcel::domain::{DomainError, Money, Sellable, ValidationError};
use parcel::infrastructure::traits::{FileSystem, RealFileSystem};

const GAMER_MANIFEST: &str = r#"
[[product]]
name = "Mechanical Keyboard"
price = "99.99"

[[product]]
name = "Gaming Mouse"
price = 49.5

[[product]]
name = "7.1 Surround Headset"
price = 120

[[product]]
name = "XXL Mousepad"
price = "25.00"

[[bundle]]
name = "The Pro-Gamer Bundle"
items = ["Mechanical Keyboard", "Gaming Mouse", "7.1 Surround Headset"]

[[bundle]]
name = "Main Shipping Crate"
items = ["XXL Mousepad", "The Pro-Gamer Bundle"]
"#;

/// Helper to create temp manifest files for testing
fn create_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write manifest");
    path
}

fn service() -> ManifestService {
    ManifestService::new(Arc::new(RealFileSystem))
}

/// In-memory filesystem holding a fixed set of files.
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[test]
fn given_gamer_manifest_when_loading_then_prices_match_reference() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_manifest(&temp, "shop.toml", GAMER_MANIFEST);

    // Act
    let catalog = service().load(&path).unwrap();

    // Assert
    assert_eq!(catalog.len(), 6);
    let bundle = catalog.require("The Pro-Gamer Bundle").unwrap();
    let shipping = catalog.require("Main Shipping Crate").unwrap();
    assert_eq!(bundle.price(), Money::from_cents(26949));
    assert_eq!(shipping.price(), Money::from_cents(29449));
}

#[test]
fn given_gamer_manifest_when_loading_then_only_crate_is_root() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(&temp, "shop.toml", GAMER_MANIFEST);

    let catalog = service().load(&path).unwrap();
    let roots: Vec<String> = catalog.roots().iter().map(Sellable::name).collect();

    assert_eq!(roots, vec!["Main Shipping Crate"]);
}

#[test]
fn given_item_in_two_bundles_when_loading_then_it_is_shared() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(
        &temp,
        "shared.toml",
        r#"
[[product]]
name = "Cable"
price = "5"

[[bundle]]
name = "Left"
items = ["Cable"]

[[bundle]]
name = "Right"
items = ["Cable", "Cable"]
"#,
    );

    let catalog = service().load(&path).unwrap();
    let cable = catalog.require("Cable").unwrap();
    let left = catalog.get_box("Left").unwrap();
    let right = catalog.get_box("Right").unwrap();

    assert!(left.children()[0].ptr_eq(&cable));
    assert!(right.children()[1].ptr_eq(&cable));
    assert_eq!(right.price(), Money::from_cents(1000));
    assert_eq!(catalog.roots().len(), 2);
}

#[test]
fn given_unknown_item_when_loading_then_domain_error() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(
        &temp,
        "unknown.toml",
        r#"
[[bundle]]
name = "Box"
items = ["Ghost"]
"#,
    );

    let result = service().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::UnknownItem { ref bundle, ref item }))
            if bundle == "Box" && item == "Ghost"
    ));
}

#[test]
fn given_product_and_bundle_with_same_name_when_loading_then_duplicate_error() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(
        &temp,
        "dup.toml",
        r#"
[[product]]
name = "Kit"
price = "1"

[[bundle]]
name = "Kit"
"#,
    );

    let result = service().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::DuplicateName(ref n))) if n == "Kit"
    ));
}

#[test]
fn given_bundles_containing_each_other_when_loading_then_cycle_error() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(
        &temp,
        "cycle.toml",
        r#"
[[bundle]]
name = "A"
items = ["B"]

[[bundle]]
name = "B"
items = ["A"]
"#,
    );

    let result = service().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Cycle { .. }))
    ));
}

#[test]
fn given_negative_price_when_loading_then_validation_error() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(
        &temp,
        "negative.toml",
        "[[product]]\nname = \"Refund\"\nprice = \"-1.00\"\n",
    );

    let result = service().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Validation(
            ValidationError::NegativePrice { .. }
        )))
    ));
}

#[test]
fn given_malformed_toml_when_loading_then_manifest_error_names_path() {
    let temp = TempDir::new().unwrap();
    let path = create_manifest(&temp, "broken.toml", "[[product]\nname = ");

    let err = service().load(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Manifest { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_missing_file_when_loading_then_not_found_error() {
    let result = service().load(Path::new("/nonexistent/shop.toml"));

    assert!(matches!(
        result,
        Err(ApplicationError::ManifestNotFound { ref message, .. }) if message == "file not found"
    ));
}

#[test]
fn given_directory_when_loading_then_not_found_error() {
    let temp = TempDir::new().unwrap();

    let result = service().load(temp.path());

    assert!(matches!(
        result,
        Err(ApplicationError::ManifestNotFound { ref message, .. }) if message == "not a file"
    ));
}

#[test]
fn given_in_memory_filesystem_when_loading_then_reads_through_trait() {
    let path = PathBuf::from("/virtual/shop.toml");
    let fs = MemoryFileSystem {
        files: HashMap::from([(path.clone(), GAMER_MANIFEST.to_string())]),
    };
    let service = ManifestService::new(Arc::new(fs));

    let manifest = service.read(&path).unwrap();
    assert_eq!(manifest.products.len(), 4);
    assert_eq!(manifest.bundles.len(), 2);

    let catalog = service.load(&path).unwrap();
    assert_eq!(
        catalog.require("Main Shipping Crate").unwrap().price(),
        Money::from_cents(29449)
    );
}
