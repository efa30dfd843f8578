//! Audio Store Port - 可撤销音频引用注册表
//!
//! 类似浏览器的 object URL：注册后得到句柄，撤销后句柄失效、内存释放

use std::sync::Arc;

use crate::domain::audio::AudioHandle;

/// Audio Store Port
pub trait AudioStorePort: Send + Sync {
    /// 注册音频数据，返回新句柄
    fn register(&self, bytes: Arc<[u8]>) -> AudioHandle;

    /// 按句柄取回音频数据，已撤销则返回 None
    fn resolve(&self, handle: &AudioHandle) -> Option<Arc<[u8]>>;

    /// 撤销句柄，返回是否确实释放了一项
    fn revoke(&self, handle: &AudioHandle) -> bool;

    /// 当前仍然有效的句柄数量
    fn live_count(&self) -> usize;
}
