//! Integration tests for dataset loading and feature extraction.

mod common;

use hogbench_classifiers::config::HogConfig;
use hogbench_classifiers::data_handling::{format_class_list, load_dataset, ClassCount};
use hogbench_classifiers::features::extract_features;
use hogbench_classifiers::Error;

// ---------------------------------------------------------------------------
// Feature extraction
// ---------------------------------------------------------------------------

#[test]
fn feature_length_is_constant_across_images() {
    let dir = tempfile::tempdir().unwrap();
    let config = HogConfig::default();

    let a = dir.path().join("a.png");
    let b = dir.path().join("b.jpg");
    common::striped_image(true, 0).save(&a).unwrap();
    image::RgbImage::from_pixel(200, 90, image::Rgb([5, 200, 40]))
        .save(&b)
        .unwrap();

    let fa = extract_features(&a, &config).unwrap();
    let fb = extract_features(&b, &config).unwrap();
    assert_eq!(fa.len(), config.feature_len());
    assert_eq!(fb.len(), fa.len());
}

#[test]
fn corrupt_image_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    match extract_features(&path, &HogConfig::default()) {
        Err(Error::ImageDecode { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected ImageDecode, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Dataset loading
// ---------------------------------------------------------------------------

#[test]
fn single_class_loads_every_image() {
    let dir = tempfile::tempdir().unwrap();
    common::write_class(dir.path(), "owl", 4, true, "png");

    let dataset = load_dataset(dir.path(), &HogConfig::default()).unwrap();
    assert_eq!(dataset.n_samples(), 4);
    assert_eq!(dataset.n_features(), 324);
    assert_eq!(dataset.labels.len(), 4);
    assert!(dataset.labels.iter().all(|l| l == "owl"));
}

#[test]
fn non_image_files_and_root_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    common::write_class(dir.path(), "cat", 2, true, "jpg");
    common::write_class(dir.path(), "dog", 3, false, "png");
    std::fs::write(dir.path().join("README.txt"), b"notes").unwrap();
    std::fs::write(dir.path().join("cat").join("notes.txt"), b"x").unwrap();
    // upper-case extensions are not samples
    common::striped_image(true, 1)
        .save_with_format(dir.path().join("cat").join("IMG.JPG"), image::ImageFormat::Jpeg)
        .unwrap();

    let dataset = load_dataset(dir.path(), &HogConfig::default()).unwrap();
    assert_eq!(dataset.n_samples(), 5);
    assert_eq!(
        dataset.class_counts,
        vec![
            ClassCount {
                class_name: "cat".to_string(),
                count: 2
            },
            ClassCount {
                class_name: "dog".to_string(),
                count: 3
            },
        ]
    );
    assert_eq!(format_class_list(&dataset.class_names()), "['cat', 'dog']");
}

#[test]
fn empty_class_directories_give_empty_dataset_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("cat")).unwrap();
    std::fs::write(dir.path().join("cat").join("readme.md"), b"x").unwrap();

    let err = load_dataset(dir.path(), &HogConfig::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset));
}

#[test]
fn missing_root_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = load_dataset(&missing, &HogConfig::default()).unwrap_err();
    match &err {
        Error::MissingDataset(p) => assert_eq!(p, &missing),
        other => panic!("expected MissingDataset, got {:?}", other),
    }
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn format_is_read_from_contents_not_extension() {
    let dir = tempfile::tempdir().unwrap();
    common::write_class(dir.path(), "cat", 2, true, "png");
    // PNG bytes behind a .jpg name
    common::striped_image(true, 3)
        .save_with_format(dir.path().join("cat").join("a.jpg"), image::ImageFormat::Png)
        .unwrap();

    let dataset = load_dataset(dir.path(), &HogConfig::default()).unwrap();
    assert_eq!(dataset.n_samples(), 3);
    assert_eq!(dataset.class_counts[0].count, 3);
}

#[test]
fn corrupt_image_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    common::write_class(dir.path(), "cat", 2, true, "png");
    std::fs::write(dir.path().join("cat").join("zz_bad.png"), b"garbage").unwrap();

    let err = load_dataset(dir.path(), &HogConfig::default()).unwrap_err();
    assert!(matches!(err, Error::ImageDecode { .. }));
}
