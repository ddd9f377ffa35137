use serde::Serialize;

/// 부모 디렉토리를 나타내는 가상 엔트리 이름
pub const PARENT_ENTRY_NAME: &str = "..";

/// 디렉토리 엔트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// 디렉토리 이름
    pub name: String,
    /// 생성 시간 (ctime 형식 문자열)
    #[serde(rename = "created_date")]
    pub created: String,
}

/// 파일 엔트리
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// 파일 이름
    pub name: String,
    /// 바이트 단위 크기
    pub size: u64,
    /// 생성 시간 (ctime 형식 문자열)
    #[serde(rename = "created_date")]
    pub created: String,
}

/// 한 패널의 디렉토리 목록
///
/// `dirs[0]`은 항상 `..` 엔트리이다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub dirs: Vec<DirEntry>,
    pub files: Vec<FileEntry>,
}

impl DirectoryListing {
    /// 디렉토리 이름 존재 여부 (`..` 제외)
    pub fn has_dir(&self, name: &str) -> bool {
        self.dirs
            .iter()
            .skip(1)
            .any(|entry| entry.name == name)
    }

    /// 파일 이름 존재 여부
    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|entry| entry.name == name)
    }

    /// 전체 엔트리 수 (`..` 제외)
    pub fn len(&self) -> usize {
        self.dirs.len().saturating_sub(1) + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
