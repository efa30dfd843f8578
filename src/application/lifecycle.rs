//! Generation Lifecycle - 生成过程状态机
//!
//! Idle → Generating → {Success, Error} → Generating ...
//!
//! 不变量:
//! - 同一会话同时最多一个请求在途，Generating 期间的重复触发被拒绝
//! - 只有 Generating 能迁移到 Success / Error
//! - Error 不影响此前成功的结果

use std::collections::VecDeque;

use super::error::SpeechError;

/// 生命周期状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleStatus {
    Idle,
    Generating,
    Success,
    Error(String),
}

impl LifecycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Generating => "generating",
            Self::Success => "success",
            Self::Error(_) => "error",
        }
    }
}

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// 用户可见的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

const MAX_PENDING_NOTIFICATIONS: usize = 32;

#[derive(Debug)]
pub struct GenerationLifecycle {
    status: LifecycleStatus,
    notifications: VecDeque<Notification>,
}

impl Default for GenerationLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationLifecycle {
    pub fn new() -> Self {
        Self {
            status: LifecycleStatus::Idle,
            notifications: VecDeque::new(),
        }
    }

    pub fn status(&self) -> &LifecycleStatus {
        &self.status
    }

    pub fn is_generating(&self) -> bool {
        self.status == LifecycleStatus::Generating
    }

    /// 开始一次生成
    ///
    /// 文本为空或已有请求在途时拒绝，状态保持不变
    pub fn begin(&mut self, text: &str) -> Result<(), SpeechError> {
        if self.is_generating() {
            return Err(SpeechError::Busy);
        }
        if text.is_empty() {
            return Err(SpeechError::validation("Text is required."));
        }

        self.transition(LifecycleStatus::Generating);
        Ok(())
    }

    /// 生成成功；不在 Generating 时忽略并返回 false
    pub fn succeed(&mut self) -> bool {
        if !self.settle() {
            return false;
        }
        self.transition(LifecycleStatus::Success);
        self.notify(NotificationLevel::Success, "Audio generated successfully!");
        true
    }

    /// 生成失败；不在 Generating 时忽略并返回 false
    pub fn fail(&mut self, error: &SpeechError) -> bool {
        if !self.settle() {
            return false;
        }
        let message = error.user_message();
        self.transition(LifecycleStatus::Error(message.clone()));
        self.notify(NotificationLevel::Error, message);
        true
    }

    fn settle(&self) -> bool {
        if !self.is_generating() {
            tracing::debug!(
                status = self.status.as_str(),
                "Ignoring completion outside generation"
            );
            return false;
        }
        true
    }

    fn transition(&mut self, next: LifecycleStatus) {
        tracing::debug!(from = self.status.as_str(), to = next.as_str(), "Lifecycle transition");
        self.status = next;
    }

    /// 发出通知
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotificationLevel::Error => tracing::warn!(message = %message, "Notification"),
            _ => tracing::info!(message = %message, "Notification"),
        }
        if self.notifications.len() == MAX_PENDING_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(Notification { level, message });
    }

    /// 取出全部待展示通知
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path() {
        let mut lifecycle = GenerationLifecycle::new();
        assert_eq!(lifecycle.status(), &LifecycleStatus::Idle);

        lifecycle.begin("Hello").unwrap();
        assert!(lifecycle.is_generating());

        assert!(lifecycle.succeed());
        assert_eq!(lifecycle.status(), &LifecycleStatus::Success);
        assert_eq!(
            lifecycle.last_notification().unwrap().level,
            NotificationLevel::Success
        );
    }

    #[test]
    fn test_repeat_begin_rejected_while_generating() {
        let mut lifecycle = GenerationLifecycle::new();
        lifecycle.begin("Hello").unwrap();
        assert_eq!(lifecycle.begin("Hello"), Err(SpeechError::Busy));
        assert!(lifecycle.is_generating());
    }

    #[test]
    fn test_empty_text_guard() {
        let mut lifecycle = GenerationLifecycle::new();
        assert!(matches!(lifecycle.begin(""), Err(SpeechError::Validation(_))));
        assert_eq!(lifecycle.status(), &LifecycleStatus::Idle);
    }

    #[test]
    fn test_error_then_retry() {
        let mut lifecycle = GenerationLifecycle::new();
        lifecycle.begin("Hello").unwrap();
        assert!(lifecycle.fail(&SpeechError::upstream(500, "boom")));
        assert_eq!(lifecycle.status(), &LifecycleStatus::Error("boom".to_string()));

        let notes = lifecycle.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "boom");
        assert_eq!(notes[0].level, NotificationLevel::Error);

        lifecycle.begin("Hello").unwrap();
        assert!(lifecycle.succeed());
    }

    #[test]
    fn test_completion_outside_generation_is_ignored() {
        let mut lifecycle = GenerationLifecycle::new();
        assert!(!lifecycle.succeed());
        assert_eq!(lifecycle.status(), &LifecycleStatus::Idle);

        lifecycle.begin("one").unwrap();
        assert!(lifecycle.succeed());
        assert!(!lifecycle.fail(&SpeechError::Busy));
        assert_eq!(lifecycle.status(), &LifecycleStatus::Success);
        assert_eq!(lifecycle.drain_notifications().len(), 1);
    }

    #[test]
    fn test_notification_queue_is_bounded() {
        let mut lifecycle = GenerationLifecycle::new();
        for i in 0..(MAX_PENDING_NOTIFICATIONS + 5) {
            lifecycle.notify(NotificationLevel::Info, format!("n{}", i));
        }
        let notes = lifecycle.drain_notifications();
        assert_eq!(notes.len(), MAX_PENDING_NOTIFICATIONS);
        assert_eq!(notes[0].message, "n5");
    }
}
