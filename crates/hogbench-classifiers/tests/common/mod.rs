//! Synthetic image folders shared by the integration tests.
#![allow(dead_code)]

use std::path::Path;

use image::{Rgb, RgbImage};

/// Stripes whose direction depends on the class, so HOG can tell them apart.
pub fn striped_image(vertical: bool, phase: u32) -> RgbImage {
    RgbImage::from_fn(48, 40, |x, y| {
        let t = if vertical { x } else { y };
        let v = if ((t + phase) / 4) % 2 == 0 { 30 } else { 220 };
        Rgb([v, v, (v / 2) as u8])
    })
}

/// Write `count` images named `img_<i>.<ext>` into `root/class_name`.
pub fn write_class(root: &Path, class_name: &str, count: u32, vertical: bool, ext: &str) {
    let dir = root.join(class_name);
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        striped_image(vertical, i)
            .save(dir.join(format!("img_{}.{}", i, ext)))
            .unwrap();
    }
}

/// The two-class scenario: `cat` (vertical stripes) and `dog` (horizontal),
/// five JPEGs each.
pub fn cat_dog_dataset(root: &Path) {
    write_class(root, "cat", 5, true, "jpg");
    write_class(root, "dog", 5, false, "jpg");
}
