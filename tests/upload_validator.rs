mod common;

use lelana_moderation::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::Cursor;

#[test]
fn test_save_all_from_files_on_disk() {
    let source_dir = tempfile::tempdir().unwrap();
    let target_dir = tempfile::tempdir().unwrap();

    let png_path = source_dir.path().join("pantai.png");
    let gif_path = source_dir.path().join("animasi.gif");
    std::fs::write(&png_path, common::PNG).unwrap();
    std::fs::write(&gif_path, common::GIF).unwrap();

    let mut batch = vec![
        SeekableUpload::new("pantai.png", File::open(&png_path).unwrap()),
        SeekableUpload::new("animasi.gif", File::open(&gif_path).unwrap()),
    ];

    let validator = UploadValidator::new(target_dir.path(), UploadPolicy::default());
    let saved = validator.save_all(&mut batch).unwrap();

    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].original_name, "pantai.png");
    assert_eq!(saved[1].content_type, "image/gif");
    // Peeking must not have consumed the stream.
    assert_eq!(
        std::fs::read(target_dir.path().join(&saved[0].filename)).unwrap(),
        common::PNG
    );
    assert_eq!(saved[1].size, common::GIF.len() as u64);
}

#[test]
fn test_large_payload_is_written_in_full() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = common::JPEG.to_vec();
    data.resize(64 * 1024, 0xAB);

    let mut batch = vec![SeekableUpload::new("big.jpg", Cursor::new(data.clone()))];
    let saved = UploadValidator::new(dir.path(), UploadPolicy::default())
        .save_all(&mut batch)
        .unwrap();

    assert_eq!(saved[0].size, data.len() as u64);
    assert_eq!(std::fs::read(dir.path().join(&saved[0].filename)).unwrap(), data);
}

#[test]
fn test_rejection_leaves_directory_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("existing.png"), common::PNG).unwrap();

    let mut batch = vec![
        InMemoryUpload::new("a.png", common::PNG),
        InMemoryUpload::new("b.png", b"\0\x01\x02\x03binary".to_vec()),
    ];
    let err = UploadValidator::new(dir.path(), UploadPolicy::default())
        .save_all(&mut batch)
        .unwrap_err();

    assert!(matches!(
        err,
        UploadError::Rejected { ref detected, .. } if detected == "application/octet-stream"
    ));
    assert_eq!(common::stored_files(dir.path()), vec!["existing.png"]);
}

#[test]
fn test_names_are_unique_across_batches() {
    let dir = tempfile::tempdir().unwrap();
    let validator = UploadValidator::new(dir.path(), UploadPolicy::default());

    let mut names = HashSet::new();
    for _ in 0..20 {
        let mut batch = vec![InMemoryUpload::new("foto.png", common::PNG)];
        let saved = validator.save_all(&mut batch).unwrap();
        assert!(names.insert(saved[0].filename.clone()));
    }

    assert_eq!(common::stored_files(dir.path()).len(), 20);
}

#[test]
fn test_custom_policy_accepts_webp() {
    let dir = tempfile::tempdir().unwrap();
    let webp = b"RIFF\x24\0\0\0WEBPVP8 ".to_vec();

    let mut batch = vec![InMemoryUpload::new("a.webp", webp.clone())];
    assert!(
        UploadValidator::new(dir.path(), UploadPolicy::default())
            .save_all(&mut batch)
            .is_err()
    );

    let policy = UploadPolicy::new(["image/webp"]);
    let mut batch = vec![InMemoryUpload::new("a.webp", webp)];
    let saved = UploadValidator::new(dir.path(), policy)
        .save_all(&mut batch)
        .unwrap();
    assert_eq!(saved[0].content_type, "image/webp");
}
