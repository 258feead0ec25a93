//! Translation service applying the fixed register instruction to phrases.

use std::fmt;
use std::path::Path;

use crate::context::ServiceContext;
use crate::journal::TranslationJournal;
use crate::ports::llm::ChatRequest;

/// Fixed model identifier sent with every translation request.
pub const MODEL: &str = "claude-3-sonnet-20240229";

/// Maximum number of tokens the model may generate for one translation.
pub const MAX_TOKENS: u32 = 300;

/// Sampling temperature for every translation request.
pub const TEMPERATURE: f32 = 0.7;

/// Fixed text shown when no translation could be produced, keeping the
/// surface renderable.
pub const FALLBACK_TEXT: &str = "Translation error occurred. Please try again.";

/// System instruction governing the model's register.
const SYSTEM_INSTRUCTION: &str = "You are a professional translator that specializes in \
    converting casual Gen Z language into formal corporate speak. Provide only the corporate \
    translation without any additional explanation or context. Maintain the core meaning while \
    making it sound professional and workplace-appropriate.";

/// A non-fatal condition surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The submitted phrase was empty; no remote call was made.
    EmptyPhrase,
    /// The remote completion call failed.
    RemoteCallFailed(String),
    /// The journal append failed after a successful translation.
    JournalWriteFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhrase => write!(f, "Nothing to translate: the phrase was empty"),
            Self::RemoteCallFailed(msg) => write!(f, "Error calling the model: {msg}"),
            Self::JournalWriteFailed(msg) => write!(f, "Unable to log translation: {msg}"),
        }
    }
}

/// Result of one translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text to display: the model output verbatim, or [`FALLBACK_TEXT`].
    pub text: String,
    /// Non-fatal conditions for the presentation layer to show.
    pub notices: Vec<Notice>,
}

/// Applies the fixed register instruction to user phrases.
///
/// One instance handles one surface session; requests are processed one at
/// a time in submission order.
pub struct Translator<'a> {
    ctx: &'a ServiceContext,
    journal: TranslationJournal<'a>,
}

impl<'a> Translator<'a> {
    /// Creates a translator journaling to the given CSV file.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, log_path: &Path) -> Self {
        Self { ctx, journal: TranslationJournal::new(ctx, log_path) }
    }

    /// Translates one phrase into corporate register.
    ///
    /// On success the model's text is returned verbatim and one row is
    /// appended to the journal. On any failure the fallback text is
    /// returned with a notice, and nothing is journaled. A journal failure
    /// never replaces an already-produced translation.
    pub async fn translate(&self, phrase: &str) -> Outcome {
        if phrase.trim().is_empty() {
            return Outcome { text: FALLBACK_TEXT.to_string(), notices: vec![Notice::EmptyPhrase] };
        }

        let request = ChatRequest {
            model: MODEL.to_string(),
            system: SYSTEM_INSTRUCTION.to_string(),
            user: format!("Convert this Gen Z phrase to corporate speak: {phrase}"),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        match self.ctx.llm.complete(&request).await {
            Ok(response) if !response.text.is_empty() => {
                let mut notices = Vec::new();
                if let Err(e) = self.journal.append(phrase, &response.text) {
                    notices.push(Notice::JournalWriteFailed(e));
                }
                Outcome { text: response.text, notices }
            }
            Ok(_) => Outcome {
                text: FALLBACK_TEXT.to_string(),
                notices: vec![Notice::RemoteCallFailed(
                    "model returned an empty completion".to_string(),
                )],
            },
            Err(e) => Outcome {
                text: FALLBACK_TEXT.to_string(),
                notices: vec![Notice::RemoteCallFailed(e.to_string())],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::config::CassetteConfig;
    use crate::ports::clock::Clock;
    use crate::ports::filesystem::FileSystem;
    use crate::ports::llm::{ChatResponse, LlmClient, LlmFuture};
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    const LOG: &str = "translation_log.csv";

    /// In-memory filesystem shared with the journal tests' shape.
    struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MemFs {
        fn new() -> Self {
            Self { files: Mutex::new(HashMap::new()) }
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            let files = self.files.lock().unwrap();
            files
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn append(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let mut files = self.files.lock().unwrap();
            files.entry(path.to_path_buf()).or_default().push_str(contents);
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            let files = self.files.lock().unwrap();
            files.contains_key(path)
        }
    }

    /// Filesystem whose writes always fail.
    struct BrokenFs;

    impl FileSystem for BrokenFs {
        fn read_to_string(
            &self,
            _path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("disk unavailable".into())
        }

        fn write(
            &self,
            _path: &Path,
            _contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("disk unavailable".into())
        }

        fn append(
            &self,
            _path: &Path,
            _contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Err("disk unavailable".into())
        }

        fn exists(&self, _path: &Path) -> bool {
            false
        }
    }

    /// Clock pinned to a known instant.
    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
        }
    }

    /// Canned LLM client returning a fixed completion.
    struct StubLlm {
        text: String,
    }

    impl LlmClient for StubLlm {
        fn complete(&self, _request: &ChatRequest) -> LlmFuture<'_> {
            let text = self.text.clone();
            Box::pin(async move {
                Ok(ChatResponse { text, prompt_tokens: 50, completion_tokens: 10 })
            })
        }
    }

    /// LLM client that always fails, simulating a transport error.
    struct FailingLlm;

    impl LlmClient for FailingLlm {
        fn complete(&self, _request: &ChatRequest) -> LlmFuture<'_> {
            Box::pin(async { Err("Anthropic API request failed: connection refused".into()) })
        }
    }

    /// LLM client that records whether it was called at all.
    struct CountingLlm {
        calls: std::sync::Arc<Mutex<u32>>,
    }

    impl LlmClient for CountingLlm {
        fn complete(&self, _request: &ChatRequest) -> LlmFuture<'_> {
            *self.calls.lock().unwrap() += 1;
            Box::pin(async { Err("should not be reached".into()) })
        }
    }

    fn make_context(llm: Box<dyn LlmClient>, fs: Box<dyn FileSystem>) -> ServiceContext {
        let mut ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified())
            .expect("panic config should always succeed");
        ctx.llm = llm;
        ctx.fs = fs;
        ctx.clock = Box::new(FixedClock);
        ctx
    }

    fn log_rows(ctx: &ServiceContext) -> usize {
        match ctx.fs.read_to_string(Path::new(LOG)) {
            Ok(content) => content.lines().count().saturating_sub(1),
            Err(_) => 0,
        }
    }

    #[tokio::test]
    async fn success_returns_model_text_and_appends_one_row() {
        let ctx = make_context(
            Box::new(StubLlm { text: "Excellent work on achieving this outcome.".into() }),
            Box::new(MemFs::new()),
        );
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("slay").await;

        assert_eq!(outcome.text, "Excellent work on achieving this outcome.");
        assert!(outcome.notices.is_empty());
        assert_eq!(log_rows(&ctx), 1);

        let content = ctx.fs.read_to_string(Path::new(LOG)).unwrap();
        assert!(content.contains("2025-01-15 09:30:00,slay,Excellent work on achieving this outcome."));
    }

    #[tokio::test]
    async fn returned_text_matches_journaled_output_field() {
        let ctx = make_context(
            Box::new(StubLlm { text: "I assure you this is completely true".into() }),
            Box::new(MemFs::new()),
        );
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("no cap").await;

        let records = TranslationJournal::new(&ctx, Path::new(LOG)).read_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].output, outcome.text);
        assert_eq!(records[0].input, "no cap");
    }

    #[tokio::test]
    async fn failure_returns_fallback_and_appends_nothing() {
        let ctx = make_context(Box::new(FailingLlm), Box::new(MemFs::new()));
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("slay").await;

        assert_eq!(outcome.text, FALLBACK_TEXT);
        assert_eq!(outcome.notices.len(), 1);
        assert!(matches!(outcome.notices[0], Notice::RemoteCallFailed(_)));
        assert_eq!(log_rows(&ctx), 0);
        assert!(!ctx.fs.exists(Path::new(LOG)));
    }

    #[tokio::test]
    async fn empty_completion_is_treated_as_failure() {
        let ctx = make_context(Box::new(StubLlm { text: String::new() }), Box::new(MemFs::new()));
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("slay").await;

        assert_eq!(outcome.text, FALLBACK_TEXT);
        assert_eq!(log_rows(&ctx), 0);
    }

    #[tokio::test]
    async fn empty_phrase_skips_the_remote_call() {
        let calls = std::sync::Arc::new(Mutex::new(0));
        let llm = CountingLlm { calls: std::sync::Arc::clone(&calls) };
        let ctx = make_context(Box::new(llm), Box::new(MemFs::new()));
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("   ").await;

        assert_eq!(outcome.text, FALLBACK_TEXT);
        assert_eq!(outcome.notices, vec![Notice::EmptyPhrase]);
        assert_eq!(log_rows(&ctx), 0);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn journal_failure_keeps_the_translation() {
        let ctx = make_context(
            Box::new(StubLlm { text: "Understood, thank you for the update.".into() }),
            Box::new(BrokenFs),
        );
        let translator = Translator::new(&ctx, Path::new(LOG));

        let outcome = translator.translate("bet").await;

        assert_eq!(outcome.text, "Understood, thank you for the update.");
        assert_eq!(outcome.notices.len(), 1);
        assert!(matches!(outcome.notices[0], Notice::JournalWriteFailed(_)));
    }

    #[tokio::test]
    async fn request_carries_fixed_parameters_and_raw_phrase() {
        /// Captures the request it was handed.
        struct CapturingLlm {
            seen: std::sync::Arc<Mutex<Option<ChatRequest>>>,
        }

        impl LlmClient for CapturingLlm {
            fn complete(&self, request: &ChatRequest) -> LlmFuture<'_> {
                *self.seen.lock().unwrap() = Some(request.clone());
                Box::pin(async {
                    Ok(ChatResponse {
                        text: "Noted.".into(),
                        prompt_tokens: 1,
                        completion_tokens: 1,
                    })
                })
            }
        }

        let seen = std::sync::Arc::new(Mutex::new(None));
        let llm = Box::new(CapturingLlm { seen: std::sync::Arc::clone(&seen) });
        let ctx = make_context(llm, Box::new(MemFs::new()));
        let translator = Translator::new(&ctx, Path::new(LOG));

        let _ = translator.translate("That's Pretty Mid").await;

        let request = seen.lock().unwrap().clone().expect("model was never called");
        assert_eq!(
            request.user,
            "Convert this Gen Z phrase to corporate speak: That's Pretty Mid"
        );
        assert_eq!(request.model, MODEL);
        assert_eq!(request.max_tokens, MAX_TOKENS);
        assert!((request.temperature - TEMPERATURE).abs() < f32::EPSILON);

        let records = TranslationJournal::new(&ctx, Path::new(LOG)).read_records().unwrap();
        assert_eq!(records[0].input, "That's Pretty Mid"); // no normalization
    }

    #[test]
    fn notices_render_user_facing_messages() {
        assert_eq!(
            Notice::JournalWriteFailed("disk unavailable".into()).to_string(),
            "Unable to log translation: disk unavailable"
        );
        assert!(Notice::RemoteCallFailed("timeout".into()).to_string().contains("timeout"));
    }
}
