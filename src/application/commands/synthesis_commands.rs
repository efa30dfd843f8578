//! Synthesis Commands

use crate::domain::synthesis::GenerationRequest;

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub request: GenerationRequest,
}
