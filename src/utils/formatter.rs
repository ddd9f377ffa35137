// Formatters - 타임스탬프, 텍스트 정규화

use chrono::{DateTime, Local};
use std::time::SystemTime;

/// 시스템 시간을 ctime 형식으로 포맷팅
///
/// 항상 "Mon Oct 19 14:03:22 2026" 형식 (24자, 일(day)은 공백 패딩)
pub fn format_ctime(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// 각 줄 끝 공백을 제거하고 `\n`으로 다시 합친다
///
/// `\r\n` 줄바꿈도 `\n`으로 정규화된다.
pub fn normalize_line_endings(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
