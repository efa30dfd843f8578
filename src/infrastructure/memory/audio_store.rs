//! In-Memory Audio Store Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::AudioStorePort;
use crate::domain::audio::AudioHandle;

/// 内存音频注册表
pub struct InMemoryAudioStore {
    entries: DashMap<AudioHandle, Arc<[u8]>>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryAudioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioStorePort for InMemoryAudioStore {
    fn register(&self, bytes: Arc<[u8]>) -> AudioHandle {
        let handle = AudioHandle::new();
        let size = bytes.len();
        self.entries.insert(handle, bytes);
        tracing::debug!(handle = %handle, audio_size = size, "Audio registered");
        handle
    }

    fn resolve(&self, handle: &AudioHandle) -> Option<Arc<[u8]>> {
        self.entries.get(handle).map(|entry| entry.value().clone())
    }

    fn revoke(&self, handle: &AudioHandle) -> bool {
        let removed = self.entries.remove(handle).is_some();
        if removed {
            tracing::debug!(handle = %handle, "Audio revoked");
        }
        removed
    }

    fn live_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_resolve_revoke() {
        let store = InMemoryAudioStore::new();
        let handle = store.register(Arc::from(&b"abc"[..]));

        assert_eq!(store.live_count(), 1);
        assert_eq!(store.resolve(&handle).as_deref(), Some(&b"abc"[..]));

        assert!(store.revoke(&handle));
        assert!(store.resolve(&handle).is_none());
        assert!(!store.revoke(&handle));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let store = InMemoryAudioStore::new();
        let a = store.register(Arc::from(&b"x"[..]));
        let b = store.register(Arc::from(&b"x"[..]));
        assert_ne!(a, b);
        assert_eq!(store.live_count(), 2);
    }
}
