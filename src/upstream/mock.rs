use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{LanguageModel, UpstreamError};

/// 脚本化的测试模型，按顺序返回预设结果并记录调用
pub struct ScriptedModel {
    replies: Mutex<Vec<Result<String, UpstreamError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, UpstreamError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self::new(vec![Err(err)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop().unwrap_or_else(|| {
            Err(UpstreamError::Decode(format!(
                "ScriptedModel: no more replies (called {} times)",
                i + 1
            )))
        })
    }
}
