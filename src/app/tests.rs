use super::*;
use crate::config::{ConfigFile, ConfigOverrides};
use crate::models::BatchItem;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_test_app(root: &Path) -> App {
    let file = ConfigFile {
        token_secret: Some("app-test-secret".to_string()),
        root: Some(root.to_path_buf()),
        default_path: Some(root.to_path_buf()),
        ..Default::default()
    };
    App::new(&Config::resolve(file, &ConfigOverrides::default(), None).unwrap())
}

fn token_for(app: &App, left: &Path, right: &Path) -> String {
    app.issue_token(&PanelState::new(left.to_path_buf(), right.to_path_buf()))
        .unwrap()
}

fn items(names: &[&str]) -> Vec<BatchItem> {
    names.iter().map(|name| BatchItem::new(*name)).collect()
}

fn names(listing: &crate::models::DirectoryListing) -> Vec<String> {
    listing
        .dirs
        .iter()
        .map(|d| d.name.clone())
        .chain(listing.files.iter().map(|f| f.name.clone()))
        .collect()
}

/// 토큰 없이 진입하면 두 패널 모두 기본 경로
#[test]
fn test_bootstrap_without_token_uses_default_path() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("hello.txt"), "hi").unwrap();
    let app = make_test_app(temp.path());

    let response = app.bootstrap(None).unwrap();

    assert_eq!(response.left_panel, response.right_panel);
    assert!(response.left_panel.has_file("hello.txt"));
    let state = app.restore_state(Some(&response.token)).unwrap();
    assert_eq!(state.paths(), (temp.path(), temp.path()));
}

/// 유효하지 않은 토큰은 토큰이 없는 것과 같다
#[test]
fn test_bootstrap_with_invalid_token_falls_back() {
    let temp = TempDir::new().unwrap();
    let app = make_test_app(temp.path());

    let response = app.bootstrap(Some("garbage")).unwrap();
    let state = app.restore_state(Some(&response.token)).unwrap();

    assert_eq!(state, app.default_state());
}

/// 유효한 토큰이면 토큰의 경로와 UI 상태를 유지
#[test]
fn test_bootstrap_with_token_keeps_state() {
    let temp = TempDir::new().unwrap();
    let right = temp.path().join("right");
    fs::create_dir_all(&right).unwrap();
    fs::write(right.join("r.txt"), "r").unwrap();
    let app = make_test_app(temp.path());

    let mut state = PanelState::new(temp.path().to_path_buf(), right.clone());
    state.active_panel = PanelIndex::Right;
    state.active_element_index = 3;
    let token = app.issue_token(&state).unwrap();

    let response = app.bootstrap(Some(&token)).unwrap();

    assert!(response.right_panel.has_file("r.txt"));
    assert!(response.left_panel.has_dir("right"));
    assert_eq!(app.restore_state(Some(&response.token)).unwrap(), state);
}

/// 토큰 경로가 사라졌으면 무효 토큰으로 취급
#[test]
fn test_restore_state_rejects_vanished_path() {
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("gone");
    fs::create_dir_all(&gone).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), &gone);
    fs::remove_dir(&gone).unwrap();

    match app.restore_state(Some(&token)) {
        Err(TwinPanelError::InvalidToken) => {}
        other => panic!("expected InvalidToken, got {:?}", other),
    }
}

/// 루트 밖 경로를 담은 토큰은 무효
#[test]
fn test_restore_state_rejects_path_outside_root() {
    let temp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), outside.path());

    assert!(matches!(
        app.restore_state(Some(&token)),
        Err(TwinPanelError::InvalidToken)
    ));
}

#[test]
fn test_change_dir_requires_token() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("sub")).unwrap();
    let app = make_test_app(temp.path());

    match app.change_dir(None, PanelIndex::Left, "sub") {
        Err(TwinPanelError::InvalidToken) => {}
        other => panic!("expected InvalidToken, got {:?}", other),
    }
}

/// `..` 이동이 세 단계 중첩에서 정확히 부모로 돌아간다
#[test]
fn test_change_dir_up_three_levels() {
    let temp = TempDir::new().unwrap();
    let deep = temp.path().join("l1/l2/l3");
    fs::create_dir_all(&deep).unwrap();
    let app = make_test_app(temp.path());
    let mut token = token_for(&app, &deep, temp.path());

    let expected = [
        temp.path().join("l1/l2"),
        temp.path().join("l1"),
        temp.path().to_path_buf(),
    ];
    for parent in expected {
        let response = app.change_dir(Some(&token), PanelIndex::Left, "..").unwrap();
        token = response.token;
        let state = app.restore_state(Some(&token)).unwrap();
        assert_eq!(state.path(PanelIndex::Left), parent.as_path());
        assert_eq!(state.path(PanelIndex::Right), temp.path());
    }
}

#[test]
fn test_change_dir_sets_active_panel() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join("sub/inner.txt"), "i").unwrap();
    let app = make_test_app(temp.path());
    let mut state = app.default_state();
    state.active_element_index = 5;
    let token = app.issue_token(&state).unwrap();

    let response = app.change_dir(Some(&token), PanelIndex::Right, "sub").unwrap();

    assert!(response.dir_content.has_file("inner.txt"));
    let state = app.restore_state(Some(&response.token)).unwrap();
    assert_eq!(state.active_panel, PanelIndex::Right);
    assert_eq!(state.active_element_index, 0);
}

#[test]
fn test_change_dir_to_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("f.txt"), "x").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    match app.change_dir(Some(&token), PanelIndex::Left, "f.txt") {
        Err(TwinPanelError::NotADirectory { .. }) => {}
        other => panic!("expected NotADirectory, got {:?}", other),
    }
}

#[test]
fn test_file_content() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("read.txt"), "line one   \r\nline two").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    let response = app
        .file_content(Some(&token), PanelIndex::Left, "read.txt")
        .unwrap();
    assert_eq!(response.file_content, "line one\nline two");

    match app.file_content(Some(&token), PanelIndex::Left, "missing.txt") {
        Err(TwinPanelError::ItemNotFound { name }) => assert_eq!(name, "missing.txt"),
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
}

/// 같은 디렉토리를 보는 두 패널은 함께 새로고침된다
#[test]
fn test_create_file_reloads_both_panels_when_shared() {
    let temp = TempDir::new().unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    let response = app
        .create_file(Some(&token), PanelIndex::Left, "new.txt")
        .unwrap();

    assert!(response.success);
    let left = response.reloaded.left.as_ref().expect("left reloaded");
    let right = response.reloaded.right.as_ref().expect("right reloaded");
    assert!(left.has_file("new.txt"));
    assert!(right.has_file("new.txt"));
}

#[test]
fn test_create_directory_reloads_only_target_when_separate() {
    let temp = TempDir::new().unwrap();
    let other = temp.path().join("other");
    fs::create_dir_all(&other).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), &other);

    let response = app
        .create_directory(Some(&token), PanelIndex::Right, "made")
        .unwrap();

    assert!(response.success);
    assert!(response.reloaded.left.is_none());
    assert!(response.reloaded.right.as_ref().unwrap().has_dir("made"));
    assert!(other.join("made").is_dir());
}

#[test]
fn test_create_existing_name_is_conflict() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("taken"), "x").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    for result in [
        app.create_directory(Some(&token), PanelIndex::Left, "taken"),
        app.create_file(Some(&token), PanelIndex::Left, "taken"),
    ] {
        match result {
            Err(TwinPanelError::AlreadyExists { name }) => assert_eq!(name, "taken"),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }
    }
}

#[test]
fn test_create_rejects_path_names() {
    let temp = TempDir::new().unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    for name in ["../escape", "a/b", "", ".."] {
        match app.create_directory(Some(&token), PanelIndex::Left, name) {
            Err(TwinPanelError::InvalidName { .. }) => {}
            other => panic!("expected InvalidName for {:?}, got {:?}", name, other),
        }
    }
}

#[test]
fn test_update_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("edit.txt"), "before").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    let response = app
        .update_file(Some(&token), PanelIndex::Left, "edit.txt", "after")
        .unwrap();
    assert!(response.success);
    assert_eq!(fs::read_to_string(temp.path().join("edit.txt")).unwrap(), "after");

    match app.update_file(Some(&token), PanelIndex::Left, "nope.txt", "x") {
        Err(TwinPanelError::ItemNotFound { .. }) => {}
        other => panic!("expected ItemNotFound, got {:?}", other),
    }
    assert!(!temp.path().join("nope.txt").exists());
}

/// 이름 충돌 시 원본은 그대로 남는다
#[test]
fn test_rename_conflict_leaves_original() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("old.txt"), "old").unwrap();
    fs::write(temp.path().join("existing.txt"), "existing").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    match app.rename(Some(&token), PanelIndex::Left, "old.txt", "existing.txt") {
        Err(err @ TwinPanelError::AlreadyExists { .. }) => {
            assert!(err.to_string().contains("already exists"));
        }
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(temp.path().join("old.txt")).unwrap(), "old");
    assert_eq!(
        fs::read_to_string(temp.path().join("existing.txt")).unwrap(),
        "existing"
    );
}

#[test]
fn test_rename_success_reloads_panel() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("folder")).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), temp.path());

    let response = app
        .rename(Some(&token), PanelIndex::Right, "folder", "renamed")
        .unwrap();

    assert!(response.success);
    let right = response.reloaded.right.as_ref().unwrap();
    assert!(right.has_dir("renamed"));
    assert!(!right.has_dir("folder"));
    assert!(response.reloaded.left.is_some());
}

/// 배치 삭제: 없는 항목만 실패 목록에 남는다
#[test]
fn test_delete_batch() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::create_dir_all(temp.path().join("bdir/x")).unwrap();
    let other = temp.path().join("other");
    fs::create_dir_all(&other).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), &other);

    let response = app
        .delete_batch(
            Some(&token),
            PanelIndex::Left,
            &items(&["a.txt", "bdir", "ghost"]),
        )
        .unwrap();

    assert_eq!(response.failed_items, vec!["ghost".to_string()]);
    assert!(!response.success);
    assert!(!temp.path().join("a.txt").exists());
    assert!(!temp.path().join("bdir").exists());
    assert_eq!(
        names(response.reloaded.left.as_ref().unwrap()),
        vec!["..".to_string(), "other".to_string()]
    );
    assert!(response.reloaded.right.is_none());
}

/// 반대편 패널이 보고 있던 디렉토리를 지우면 그 패널은 상위로 물러난다
#[test]
fn test_delete_batch_retreats_sibling_panel() {
    let temp = TempDir::new().unwrap();
    let doomed = temp.path().join("doomed");
    fs::create_dir_all(doomed.join("deeper")).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), &doomed.join("deeper"));

    let response = app
        .delete_batch(Some(&token), PanelIndex::Left, &items(&["doomed"]))
        .unwrap();

    assert!(response.success);
    assert!(response.reloaded.right.is_some());
    let state = app.restore_state(Some(&response.token)).unwrap();
    assert_eq!(state.path(PanelIndex::Right), temp.path());
}

/// 이동 충돌: 두 파일 모두 그대로
#[test]
fn test_move_batch_conflict() {
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(&left).unwrap();
    fs::create_dir_all(&right).unwrap();
    fs::write(left.join("x.txt"), "left").unwrap();
    fs::write(right.join("x.txt"), "right").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, &left, &right);

    let response = app
        .move_batch(Some(&token), PanelIndex::Left, &items(&["x.txt"]))
        .unwrap();

    assert_eq!(response.failed_items, vec!["x.txt".to_string()]);
    assert_eq!(fs::read_to_string(left.join("x.txt")).unwrap(), "left");
    assert_eq!(fs::read_to_string(right.join("x.txt")).unwrap(), "right");
    assert!(response.reloaded.left.is_some());
    assert!(response.reloaded.right.is_some());
}

#[test]
fn test_move_and_copy_batch_reload_both_panels() {
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(left.join("dir")).unwrap();
    fs::create_dir_all(&right).unwrap();
    fs::write(left.join("m.txt"), "m").unwrap();
    fs::write(left.join("dir/c.txt"), "c").unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, &left, &right);

    let moved = app
        .move_batch(Some(&token), PanelIndex::Left, &items(&["m.txt"]))
        .unwrap();
    assert!(moved.success);
    assert!(moved.failed_items.is_empty());
    assert!(!moved.reloaded.left.as_ref().unwrap().has_file("m.txt"));
    assert!(moved.reloaded.right.as_ref().unwrap().has_file("m.txt"));

    let copied = app
        .copy_batch(Some(&moved.token), PanelIndex::Left, &items(&["dir"]))
        .unwrap();
    assert!(copied.success);
    assert!(copied.reloaded.left.as_ref().unwrap().has_dir("dir"));
    assert!(copied.reloaded.right.as_ref().unwrap().has_dir("dir"));
    assert!(right.join("dir/c.txt").is_file());
}

#[test]
fn test_batch_requires_valid_token() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let app = make_test_app(temp.path());

    let result = app.delete_batch(Some("forged"), PanelIndex::Left, &items(&["a.txt"]));

    assert!(matches!(result, Err(TwinPanelError::InvalidToken)));
    assert!(temp.path().join("a.txt").exists());
}

/// 작업이 반영된 뒤 목록을 읽지 못한 패널은 응답에서만 빠진다
#[cfg(unix)]
#[test]
fn test_unlistable_panel_is_left_out_of_reload() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let hidden = temp.path().join("hidden");
    fs::create_dir_all(&hidden).unwrap();
    let app = make_test_app(temp.path());
    let token = token_for(&app, temp.path(), &hidden);

    // 쓰기/진입은 되지만 목록은 읽을 수 없는 디렉토리
    fs::set_permissions(&hidden, fs::Permissions::from_mode(0o300)).unwrap();
    let privileged = fs::read_dir(&hidden).is_ok();

    if !privileged {
        let response = app
            .create_file(Some(&token), PanelIndex::Right, "made.txt")
            .unwrap();

        assert!(response.success);
        assert!(response.reloaded.right.is_none());
        assert!(hidden.join("made.txt").is_file());
        assert!(app.restore_state(Some(&response.token)).is_ok());
    }

    fs::set_permissions(&hidden, fs::Permissions::from_mode(0o755)).unwrap();
}
