//! 토큰 감사 로그
//!
//! 토큰 발급/갱신/로그아웃/폐기를 `token_audit` 로그 타깃에 한 줄씩 기록합니다.
//! 정책에 따라 비활성화하거나 사용자명을 고정 문자열로 가릴 수 있습니다.
//!
//! ```text
//! [INFO  token_audit] event=login username=*** backend=memory
//! [INFO  token_audit] event=logout username=alice revoked=true
//! ```
//!
//! 로그 타깃이 분리되어 있으므로 `RUST_LOG=info,token_audit=off`처럼
//! 감사 로그만 따로 걸러낼 수 있습니다.

/// 감사 로그 타깃
pub const AUDIT_TARGET: &str = "token_audit";

/// 사용자명 마스킹 시 출력되는 고정 문자열
pub const MASKED_USERNAME: &str = "***";

/// 감사 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    Login,
    Refresh,
    Logout,
    Revoke,
}

impl AuditEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEvent::Login => "login",
            AuditEvent::Refresh => "refresh",
            AuditEvent::Logout => "logout",
            AuditEvent::Revoke => "revoke",
        }
    }
}

/// 정책이 적용된 감사 로거
#[derive(Debug, Clone, Copy)]
pub struct TokenAuditLogger {
    enabled: bool,
    mask_username: bool,
}

impl TokenAuditLogger {
    pub fn new(enabled: bool, mask_username: bool) -> Self {
        Self { enabled, mask_username }
    }

    /// 아무것도 기록하지 않는 로거
    pub fn disabled() -> Self {
        Self::new(false, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 이벤트 한 건을 기록합니다. 비활성화 상태면 아무 일도 하지 않습니다.
    pub fn record(&self, event: AuditEvent, username: &str, context: &[(&str, String)]) {
        if let Some(line) = self.format(event, username, context) {
            log::info!(target: AUDIT_TARGET, "{}", line);
        }
    }

    /// 기록될 한 줄을 만듭니다. 비활성화 상태면 `None`
    pub fn format(&self, event: AuditEvent, username: &str, context: &[(&str, String)]) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let shown = if self.mask_username { MASKED_USERNAME } else { username };
        let mut line = format!("event={} username={}", event.as_str(), shown);
        for (key, value) in context {
            line.push_str(&format!(" {}={}", key, value));
        }
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_line_includes_context() {
        let audit = TokenAuditLogger::new(true, false);
        let line = audit
            .format(AuditEvent::Logout, "alice", &[("revoked", "true".to_string())])
            .unwrap();

        assert_eq!(line, "event=logout username=alice revoked=true");
    }

    #[test]
    fn test_audit_masks_username() {
        let audit = TokenAuditLogger::new(true, true);
        let line = audit.format(AuditEvent::Login, "alice", &[]).unwrap();

        assert_eq!(line, "event=login username=***");
        assert!(!line.contains("alice"));
    }

    #[test]
    fn test_disabled_audit_emits_nothing() {
        let audit = TokenAuditLogger::disabled();

        assert!(!audit.is_enabled());
        assert!(audit.format(AuditEvent::Revoke, "alice", &[]).is_none());
        // 비활성화 상태에서도 호출은 안전해야 함
        audit.record(AuditEvent::Revoke, "alice", &[]);
    }
}
