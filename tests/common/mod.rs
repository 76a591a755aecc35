#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use lelana_moderation::api::routes::api_routes;
use lelana_moderation::prelude::*;
use std::path::Path;
use tempfile::TempDir;

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";
pub const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0\x01\x01\0\0\x01\0\x01\0\0";
pub const GIF: &[u8] = b"GIF89a\x01\0\x01\0\x80\0\0\xFF\xFF\xFF\0\0\0";
pub const PHP: &[u8] = b"<?php system($_GET['cmd']); ?>";

pub const TEST_BODY_LIMIT: usize = 1024 * 1024;

/// Words used by tests instead of the full built-in list.
pub fn test_words() -> BannedWordSet {
    BannedWordSet::from_words(["foo", "anjing", "bangsat", "camel jockey"])
}

/// State backed by a fresh scratch upload folder.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn create_test_state() -> (AppState, TempDir) {
    create_test_state_with_policy(UploadPolicy::default())
}

pub fn create_test_state_with_policy(policy: UploadPolicy) -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        CensorEngine::new(test_words()),
        UploadValidator::new(dir.path(), policy),
        "/static/uploads",
    );
    (state, dir)
}

pub fn api_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest("/api", api_routes(TEST_BODY_LIMIT))
        .with_state(state);
    TestServer::new(app).unwrap()
}

pub fn photo(filename: &str, data: &[u8]) -> Part {
    Part::bytes(data.to_vec()).file_name(filename)
}

pub fn photo_form(files: &[(&str, &[u8])]) -> MultipartForm {
    files
        .iter()
        .fold(MultipartForm::new(), |form, (name, data)| {
            form.add_part("foto", photo(name, data))
        })
}

pub fn stored_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
