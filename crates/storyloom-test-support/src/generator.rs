//! Test generators — scripted `TextGenerator` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use storyloom_core::generation::TextGenerator;

type Responder = Box<dyn Fn(&str) -> String + Send + Sync>;

enum Script {
    Sequence(Mutex<VecDeque<String>>),
    Responder(Responder),
}

/// A generator that answers from a script and records every prompt it was
/// given.
pub struct ScriptedGenerator {
    script: Script,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl std::fmt::Debug for ScriptedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedGenerator")
            .field("delay", &self.delay)
            .field("prompts", &self.prompts)
            .finish_non_exhaustive()
    }
}

impl ScriptedGenerator {
    /// Answer each call with the next response in `responses`. Panics once
    /// the sequence is exhausted.
    #[must_use]
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let responses = responses.into_iter().map(Into::into).collect();
        Self::with_script(Script::Sequence(Mutex::new(responses)))
    }

    /// Answer each call by applying `responder` to the prompt.
    #[must_use]
    pub fn responding<F>(responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::with_script(Script::Responder(Box::new(responder)))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Sleep for `delay` before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every prompt received so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_owned());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.script {
            Script::Sequence(responses) => responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("ScriptedGenerator sequence exhausted"),
            Script::Responder(responder) => responder(prompt),
        }
    }
}
