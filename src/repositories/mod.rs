//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 현재는 토큰 레지스트리 저장소만 포함합니다.
//! 저장소 인스턴스는 기동 시 한 번 만들어 레지스트리에 주입됩니다.

pub mod tokens;
