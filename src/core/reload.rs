use crate::models::panel_state::{PanelIndex, PanelState};

/// 작업 후 새 목록을 보내야 하는 패널 계산
///
/// 작업 대상 패널과, 대상 패널과 경로가 같은 패널을 포함한다.
/// 결과는 인덱스 순으로 정렬되며 중복이 없다.
pub fn panels_to_reload(state: &PanelState, targeted: &[PanelIndex]) -> Vec<PanelIndex> {
    PanelIndex::ALL
        .into_iter()
        .filter(|panel| {
            targeted
                .iter()
                .any(|target| target == panel || state.path(*target) == state.path(*panel))
        })
        .collect()
}
