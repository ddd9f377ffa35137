// Core Layer - 패널 상태 토큰, 배치 작업, 새로고침 정책
pub mod dispatcher;
pub mod reload;
pub mod token;

pub use dispatcher::OperationDispatcher;
pub use reload::panels_to_reload;
pub use token::{TokenCodec, TOKEN_HEADER};
