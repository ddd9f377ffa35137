use crate::models::file_entry::{DirEntry, DirectoryListing, FileEntry, PARENT_ENTRY_NAME};
use crate::models::operation::{FsOperation, ItemKind};
use crate::utils::error::{Result, TwinPanelError};
use crate::utils::formatter::{format_ctime, normalize_line_endings};
use crate::utils::path_names::{normalize_lexically, validate_entry_name, validate_relative_path};
use std::fs::{self, File, FileTimes, Metadata, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// 파일 시스템 접근 래퍼
///
/// 모든 작업은 패널의 현재 경로(base)와 단일 세그먼트 이름으로 이루어지며,
/// 결과 경로는 항상 `root` 내부로 제한된다.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    /// 새 인스턴스 생성
    pub fn new(root: PathBuf) -> Self {
        Self {
            root: normalize_lexically(&root),
        }
    }

    /// 허용 루트 경로
    pub fn root(&self) -> &Path {
        &self.root
    }

    // === 존재 확인 (I/O 에러 시 false) ===

    /// 경로 존재 확인
    #[allow(clippy::unused_self)]
    pub fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// 디렉토리 여부 확인
    #[allow(clippy::unused_self)]
    pub fn is_directory(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    /// 일반 파일 여부 확인
    #[allow(clippy::unused_self)]
    pub fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// 루트 내부 경로인지 확인 (정규화된 경로 기준)
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    /// 토큰에서 복원된 패널 경로 검증
    ///
    /// 절대 경로이고, 정규화되어 있으며, 루트 내부의 존재하는 디렉토리여야 한다.
    pub fn ensure_panel_path(&self, path: &Path) -> Result<()> {
        if !path.is_absolute() || normalize_lexically(path) != path {
            return Err(TwinPanelError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !self.contains(path) {
            return Err(TwinPanelError::OutsideRoot {
                path: path.to_path_buf(),
            });
        }
        if !self.is_directory(path) {
            return Err(TwinPanelError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// 패널 경로 + 이름으로 항목 경로 생성
    pub fn entry_path(&self, base: &Path, name: &str) -> Result<PathBuf> {
        let name = validate_entry_name(name)?;
        Ok(base.join(name))
    }

    /// 항목 분류 (파일 / 디렉토리 / 없음)
    ///
    /// 이름이 유효하지 않으면 `NotFound`로 취급한다.
    pub fn classify(&self, base: &Path, name: &str) -> ItemKind {
        let Ok(path) = self.entry_path(base, name) else {
            return ItemKind::NotFound;
        };
        if self.is_file(&path) {
            ItemKind::File
        } else if self.is_directory(&path) {
            ItemKind::Directory
        } else {
            ItemKind::NotFound
        }
    }

    // === 목록 / 탐색 ===

    /// 디렉토리 읽기
    ///
    /// `..` 엔트리가 항상 맨 앞에 오고, 나머지는 디렉토리/파일로 분류되어
    /// 이름순으로 정렬된다. 목록 자체를 읽을 수 없을 때만 에러를 반환한다.
    pub fn list_directory(&self, path: &Path) -> Result<DirectoryListing> {
        // 1. 디렉토리 여부 확인
        if !self.is_directory(path) {
            return Err(TwinPanelError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        // 2. 디렉토리 읽기
        let read_dir = fs::read_dir(path)
            .map_err(|e| TwinPanelError::from_io(e, path, TwinPanelError::Io))?;

        // 3. 부모 엔트리 (루트에서는 자기 자신의 시간)
        let parent = path.parent().unwrap_or(path);
        let parent_created = fs::metadata(parent)
            .map(|m| created_time(&m))
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        // 4. 각 엔트리 분류
        for entry in read_dir {
            // 에러 발생 시 해당 엔트리는 스킵
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            let Ok(metadata) = fs::metadata(&entry_path) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let created = format_ctime(created_time(&metadata));

            if metadata.is_dir() {
                dirs.push(DirEntry { name, created });
            } else {
                files.push(FileEntry {
                    name,
                    size: metadata.len(),
                    created,
                });
            }
        }

        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.insert(
            0,
            DirEntry {
                name: PARENT_ENTRY_NAME.to_string(),
                created: format_ctime(parent_created),
            },
        );

        Ok(DirectoryListing { dirs, files })
    }

    /// 디렉토리 이동 경로 계산
    ///
    /// `base/relative`를 정규화한 절대 경로가 루트 내부의 디렉토리일 때만 성공한다.
    pub fn change_directory(&self, base: &Path, relative: &str) -> Result<PathBuf> {
        let relative = validate_relative_path(relative)?;
        let resolved = normalize_lexically(&base.join(relative));

        if !self.contains(&resolved) {
            return Err(TwinPanelError::OutsideRoot { path: resolved });
        }
        if !self.is_directory(&resolved) {
            return Err(TwinPanelError::NotADirectory { path: resolved });
        }
        Ok(resolved)
    }

    // === 파일 내용 ===

    /// 파일 내용 읽기 (UTF-8 텍스트만 지원)
    ///
    /// 각 줄의 끝 공백을 제거하고 `\n`으로 합친 문자열을 반환한다.
    pub fn read_file(&self, base: &Path, name: &str) -> Result<String> {
        let path = self.entry_path(base, name)?;
        if !self.is_file(&path) {
            return Err(TwinPanelError::ItemNotFound {
                name: name.to_string(),
            });
        }

        let bytes =
            fs::read(&path).map_err(|e| TwinPanelError::from_io(e, &path, TwinPanelError::Io))?;
        let text = String::from_utf8(bytes).map_err(|_| TwinPanelError::NotText {
            path: path.clone(),
        })?;

        Ok(normalize_line_endings(&text))
    }

    /// 파일 내용 전체 덮어쓰기
    pub fn write_file(&self, base: &Path, name: &str, content: &str) -> Result<()> {
        let path = self.entry_path(base, name)?;
        fs::write(&path, content).map_err(|e| TwinPanelError::from_io(e, &path, TwinPanelError::Io))
    }

    // === 생성 / 이름 변경 ===

    /// 새 디렉토리 생성
    pub fn create_directory(&self, base: &Path, name: &str) -> Result<()> {
        let path = self.entry_path(base, name)?;
        if self.exists(&path) {
            return Err(TwinPanelError::FileExists { path });
        }

        fs::create_dir(&path).map_err(|e| TwinPanelError::from_io(e, &path, TwinPanelError::Io))
    }

    /// 빈 파일 생성
    pub fn create_file(&self, base: &Path, name: &str) -> Result<()> {
        let path = self.entry_path(base, name)?;

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map(|_| ())
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    TwinPanelError::FileExists { path: path.clone() }
                } else {
                    TwinPanelError::from_io(e, &path, TwinPanelError::Io)
                }
            })
    }

    /// 파일/디렉토리 이름 변경
    pub fn rename(&self, base: &Path, old_name: &str, new_name: &str) -> Result<()> {
        let src = self.entry_path(base, old_name)?;
        let dest = self.entry_path(base, new_name)?;

        if !self.exists(&src) {
            return Err(TwinPanelError::PathNotFound { path: src });
        }
        if self.exists(&dest) {
            return Err(TwinPanelError::FileExists { path: dest });
        }

        fs::rename(&src, &dest).map_err(|e| {
            TwinPanelError::from_io(e, &src, |e| TwinPanelError::RenameFailed {
                src: src.clone(),
                dest: dest.clone(),
                reason: e.to_string(),
            })
        })
    }

    // === 삭제 ===

    /// 단일 파일 삭제
    pub fn delete_file(&self, base: &Path, name: &str) -> Result<()> {
        let path = self.entry_path(base, name)?;
        if !self.is_file(&path) {
            return Err(TwinPanelError::PathNotFound { path });
        }

        fs::remove_file(&path).map_err(|e| {
            TwinPanelError::from_io(e, &path, |e| TwinPanelError::DeleteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })
        })
    }

    /// 디렉토리 재귀 삭제
    ///
    /// `.`과 `..`은 파일 시스템 상태와 무관하게 항상 거부한다.
    pub fn delete_directory(&self, base: &Path, name: &str) -> Result<()> {
        if name == "." || name == ".." {
            return Err(TwinPanelError::ProtectedEntry {
                name: name.to_string(),
            });
        }

        let path = self.entry_path(base, name)?;
        if !self.is_directory(&path) {
            return Err(TwinPanelError::NotADirectory { path });
        }

        fs::remove_dir_all(&path).map_err(|e| {
            TwinPanelError::from_io(e, &path, |e| TwinPanelError::DeleteFailed {
                path: path.clone(),
                reason: e.to_string(),
            })
        })
    }

    // === 이동 / 복사 ===

    /// 소스 패널의 항목을 대상 패널로 이동/복사
    ///
    /// 대상에 같은 이름이 있으면 덮어쓰지 않고 실패한다.
    pub fn move_or_copy(
        &self,
        source_base: &Path,
        target_base: &Path,
        name: &str,
        mode: FsOperation,
    ) -> Result<()> {
        let src = self.entry_path(source_base, name)?;
        let dest = self.entry_path(target_base, name)?;

        if !self.exists(&src) {
            return Err(TwinPanelError::PathNotFound { path: src });
        }
        if self.exists(&dest) {
            return Err(TwinPanelError::FileExists { path: dest });
        }

        match mode {
            FsOperation::Move => self.move_path(&src, &dest),
            FsOperation::CopyFile => self.copy_file(&src, &dest).map_err(|err| {
                discard_partial_copy(&dest);
                err
            }),
            FsOperation::CopyDir => self.copy_directory(&src, &dest).map_err(|err| {
                discard_partial_copy(&dest);
                err
            }),
            FsOperation::DeleteFile | FsOperation::DeleteDir => {
                Err(TwinPanelError::InvalidBody(format!(
                    "{:?} is not a move/copy operation",
                    mode
                )))
            }
        }
    }

    /// 파일 복사 (수정 시간 보존)
    #[allow(clippy::unused_self)]
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<()> {
        let copy_failed = |e: std::io::Error| TwinPanelError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        };

        fs::copy(src, dest).map_err(|e| TwinPanelError::from_io(e, dest, copy_failed))?;

        // 시간 정보 복사는 실패해도 복사 자체는 성공으로 본다
        if let Ok(metadata) = fs::metadata(src) {
            let mut times = FileTimes::new();
            if let Ok(modified) = metadata.modified() {
                times = times.set_modified(modified);
            }
            if let Ok(accessed) = metadata.accessed() {
                times = times.set_accessed(accessed);
            }
            if let Ok(file) = File::options().write(true).open(dest) {
                let _ = file.set_times(times);
            }
        }

        Ok(())
    }

    /// 디렉토리 재귀 복사
    fn copy_directory(&self, src: &Path, dest: &Path) -> Result<()> {
        // 자기 자신 내부로 복사하면 무한 재귀
        if is_recursive_path(src, dest) {
            return Err(TwinPanelError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: "destination is inside the source directory".to_string(),
            });
        }

        fs::create_dir(dest).map_err(|e| {
            TwinPanelError::from_io(e, dest, |e| TwinPanelError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());

            if entry_path.is_dir() {
                self.copy_directory(&entry_path, &dest_path)?;
            } else {
                self.copy_file(&entry_path, &dest_path)?;
            }
        }

        Ok(())
    }

    /// 파일/디렉토리 이동
    ///
    /// 먼저 rename을 시도하고, 다른 파일 시스템일 때만 복사 후 삭제한다.
    /// 실패하면 대상에 아무것도 남기지 않는다.
    fn move_path(&self, src: &Path, dest: &Path) -> Result<()> {
        let is_dir = self.is_directory(src);
        let move_failed = |reason: String| TwinPanelError::MoveFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason,
        };

        if is_dir && is_recursive_path(src, dest) {
            return Err(move_failed(
                "destination is inside the source directory".to_string(),
            ));
        }

        match fs::rename(src, dest) {
            Ok(()) => return Ok(()),
            Err(e) if !is_cross_device(&e) => {
                return Err(TwinPanelError::from_io(e, src, |e| {
                    move_failed(e.to_string())
                }));
            }
            Err(_) => {}
        }

        // 다른 파일 시스템: 복사 후 원본 삭제
        let copied = if is_dir {
            self.copy_directory(src, dest)
        } else {
            self.copy_file(src, dest)
        };
        if let Err(err) = copied {
            discard_partial_copy(dest);
            return Err(err);
        }

        let removed = if is_dir {
            fs::remove_dir_all(src)
        } else {
            fs::remove_file(src)
        };
        let Err(e) = removed else {
            return Ok(());
        };

        // 원본 삭제 실패: 일부 지워진 원본을 복사본으로 되살린 뒤 복사본 제거
        if is_dir {
            if let Err(restore_err) = restore_tree(dest, src) {
                tracing::error!(
                    src = %src.display(),
                    dest = %dest.display(),
                    error = %restore_err,
                    "failed to restore source after move, keeping the copy"
                );
                return Err(move_failed(format!(
                    "Failed to remove source after copy: {}",
                    e
                )));
            }
        }
        discard_partial_copy(dest);
        Err(move_failed(format!(
            "Failed to remove source after copy: {}",
            e
        )))
    }
}

/// rename 실패 원인이 파일 시스템 경계인지
fn is_cross_device(err: &std::io::Error) -> bool {
    // EXDEV / ERROR_NOT_SAME_DEVICE
    #[cfg(windows)]
    const CROSS_DEVICE: i32 = 17;
    #[cfg(not(windows))]
    const CROSS_DEVICE: i32 = 18;

    err.raw_os_error() == Some(CROSS_DEVICE)
}

/// 실패한 복사/이동이 만든 대상 제거
fn discard_partial_copy(dest: &Path) {
    let removed = match fs::symlink_metadata(dest) {
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(dest),
        Ok(_) => fs::remove_file(dest),
        Err(_) => return,
    };
    if let Err(e) = removed {
        tracing::warn!(path = %dest.display(), error = %e, "failed to remove partial copy");
    }
}

/// `from` 트리에만 있는 항목을 `to`로 다시 복사 (기존 항목은 그대로)
fn restore_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(to).is_err() {
        fs::create_dir(to)?;
    }
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            restore_tree(&entry.path(), &target)?;
        } else if fs::symlink_metadata(&target).is_err() {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// 생성 시간 (없으면 수정 시간 fallback)
fn created_time(metadata: &Metadata) -> SystemTime {
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    metadata.created().unwrap_or(modified)
}

/// 대상 경로가 소스 디렉토리 자신 또는 그 하위인지 (정규화된 경로 기준)
fn is_recursive_path(src: &Path, dest: &Path) -> bool {
    normalize_lexically(dest).starts_with(normalize_lexically(src))
}
