//! Quote image use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{QuoteOutcome, QuoteRequest, QuoteSettings, RejectionReason};
use crate::application::services::{IdentityResolver, ResolveContext};
use crate::domain::entities::{IdentityTriple, User};
use crate::domain::errors::QuoteError;
use crate::domain::ports::{QuotePublisherPort, QuoteRendererPort};
use crate::domain::services::SenryuClassifier;

/// Content type of every rendered quote image.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Turns a senryu bot message into a published quote image.
#[derive(Clone)]
pub struct QuoteImageUseCase {
    resolver: IdentityResolver,
    renderer: Arc<dyn QuoteRendererPort>,
    publisher: Arc<dyn QuotePublisherPort>,
    system_user: User,
    system_identity: IdentityTriple,
    cdn_subpath: String,
}

impl QuoteImageUseCase {
    /// Creates the pipeline.
    ///
    /// `settings` has already been validated, so a missing endpoint or
    /// credential can never reach the pipeline.
    #[must_use]
    pub fn new(
        settings: &QuoteSettings,
        resolver: IdentityResolver,
        renderer: Arc<dyn QuoteRendererPort>,
        publisher: Arc<dyn QuotePublisherPort>,
        system_user: User,
    ) -> Self {
        let system_identity = IdentityTriple::system(&system_user);
        Self {
            resolver,
            renderer,
            publisher,
            system_user,
            system_identity,
            cdn_subpath: settings.cdn_subpath.clone(),
        }
    }

    /// Runs classify, resolve, render and publish in sequence.
    ///
    /// # Errors
    /// Returns the first render or publish failure. Rejections and identity
    /// fallbacks are not errors.
    pub async fn execute(&self, request: QuoteRequest) -> Result<QuoteOutcome, QuoteError> {
        let target = &request.target;
        debug!(
            message_id = %target.id(),
            invoker = ?request.invoker.as_ref().map(User::id),
            "Quote requested"
        );

        if target.author().id() != self.system_user.id() {
            debug!(author_id = %target.author().id(), "Target not authored by the bot");
            return Ok(QuoteOutcome::Rejected(RejectionReason::NotBotMessage));
        }

        let event = SenryuClassifier::classify(target.content());
        if !event.is_actionable() {
            debug!(message_id = %target.id(), "Message is not a senryu announcement");
            return Ok(QuoteOutcome::Rejected(RejectionReason::Unparsable));
        }
        debug!(kind = %event.kind(), "Classified senryu message");

        let ctx = ResolveContext::new(target, request.guild_id, &self.system_identity);
        let identity = self.resolver.resolve(&event, &ctx).await;
        debug!(
            username = %identity.username,
            display_name = %identity.display_name,
            "Resolved quote identity"
        );

        let staged = self
            .renderer
            .render(&identity, event.text())
            .await
            .inspect_err(|e| warn!(error = %e, "Quote rendering failed"))?;

        let url = self
            .publisher
            .publish(
                staged.bytes.clone(),
                &self.cdn_subpath,
                &staged.filename,
                PNG_CONTENT_TYPE,
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Quote publishing failed"))?;

        info!(message_id = %target.id(), url = %url, "Quote image published");
        Ok(QuoteOutcome::Published { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use bytes::Bytes;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::application::dto::RetryPolicy;
    use crate::application::services::AvatarCacheWriter;
    use crate::application::services::candidate_selector::mock::FixedCandidateSelector;
    use crate::domain::entities::{
        GuildId, Member, Message, MessageId, MessageReference, StagedImage, UserId,
    };
    use crate::domain::errors::{FailureCategory, UploadAttemptError};
    use crate::domain::ports::mocks::{
        InMemoryAvatarCache, InMemoryCandidateStore, MockPlatform, MockQuotePublisherPort,
        MockQuoteRendererPort,
    };
    use crate::infrastructure::cdn::CdnUploader;
    use crate::infrastructure::render::QuoteApiClient;

    const GUILD: GuildId = GuildId(42);
    const CHANNEL: u64 = 7;

    fn bot() -> User {
        User::new(1_u64, "senryu-bot", Some("botavatar".into()), true)
    }

    fn settings() -> QuoteSettings {
        QuoteSettings::new("http://render.invalid/quote", "http://cdn.invalid", "token")
            .expect("valid settings")
    }

    fn resolver(platform: MockPlatform) -> IdentityResolver {
        let cache = InMemoryAvatarCache::new();
        IdentityResolver::new(
            Arc::new(platform),
            Arc::new(InMemoryCandidateStore::new()),
            Arc::new(cache.clone()),
            AvatarCacheWriter::spawn(Arc::new(cache), 4),
            Arc::new(FixedCandidateSelector(0)),
        )
    }

    fn staged() -> StagedImage {
        StagedImage::new(
            Bytes::from_static(b"\x89PNG"),
            "quote.png",
            PathBuf::from("/tmp/quote.png"),
        )
    }

    fn use_case(
        platform: MockPlatform,
        renderer: MockQuoteRendererPort,
        publisher: MockQuotePublisherPort,
    ) -> QuoteImageUseCase {
        QuoteImageUseCase::new(
            &settings(),
            resolver(platform),
            Arc::new(renderer),
            Arc::new(publisher),
            bot(),
        )
    }

    #[tokio::test]
    async fn test_message_from_other_author_is_rejected_without_work() {
        let mut renderer = MockQuoteRendererPort::new();
        renderer.expect_render().never();
        let mut publisher = MockQuotePublisherPort::new();
        publisher.expect_publish().never();

        let human = User::new(5_u64, "human", None, false);
        let target = Message::new(10_u64, CHANNEL, human, "川柳を検出しました！\n「a b c」");
        let outcome = use_case(MockPlatform::new(bot()), renderer, publisher)
            .execute(QuoteRequest::new(target))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            QuoteOutcome::Rejected(RejectionReason::NotBotMessage)
        );
    }

    #[tokio::test]
    async fn test_unparsable_message_is_rejected_without_work() {
        let mut renderer = MockQuoteRendererPort::new();
        renderer.expect_render().never();
        let mut publisher = MockQuotePublisherPort::new();
        publisher.expect_publish().never();

        let target = Message::new(10_u64, CHANNEL, bot(), "おはようございます");
        let outcome = use_case(MockPlatform::new(bot()), renderer, publisher)
            .execute(QuoteRequest::new(target))
            .await
            .unwrap();

        assert_eq!(outcome, QuoteOutcome::Rejected(RejectionReason::Unparsable));
        assert_eq!(outcome.reply_text(), RejectionReason::Unparsable.user_message());
    }

    #[tokio::test]
    async fn test_publishes_rendered_bytes_under_configured_subpath() {
        let mut renderer = MockQuoteRendererPort::new();
        renderer
            .expect_render()
            .withf(|identity, text| identity.username == "senryu-bot" && text == "a\nb\nc")
            .times(1)
            .returning(|_, _| Ok(staged()));
        let mut publisher = MockQuotePublisherPort::new();
        publisher
            .expect_publish()
            .withf(|content, subpath, filename, content_type| {
                content == &Bytes::from_static(b"\x89PNG")
                    && subpath == "senryu"
                    && filename == "quote.png"
                    && content_type == PNG_CONTENT_TYPE
            })
            .times(1)
            .returning(|_, _, _, _| Ok("https://cdn.example.com/senryu/quote.png".to_string()));

        // No reply reference, so the system identity is used.
        let target = Message::new(10_u64, CHANNEL, bot(), "川柳を検出しました！\n「a b c」");
        let outcome = use_case(MockPlatform::new(bot()), renderer, publisher)
            .execute(QuoteRequest::new(target))
            .await
            .unwrap();

        assert_eq!(outcome.url(), Some("https://cdn.example.com/senryu/quote.png"));
    }

    #[tokio::test]
    async fn test_render_failure_skips_publish() {
        let mut renderer = MockQuoteRendererPort::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_, _| Err(QuoteError::render_api("status 503")));
        let mut publisher = MockQuotePublisherPort::new();
        publisher.expect_publish().never();

        let target = Message::new(10_u64, CHANNEL, bot(), "ここで一句「a b c」");
        let error = use_case(MockPlatform::new(bot()), renderer, publisher)
            .execute(QuoteRequest::new(target))
            .await
            .unwrap_err();

        assert_eq!(error.category(), FailureCategory::Generation);
    }

    struct Services {
        server: MockServer,
        _staging: tempfile::TempDir,
        settings: QuoteSettings,
    }

    async fn services() -> Services {
        let server = MockServer::start().await;
        let staging = tempfile::tempdir().unwrap();
        let settings = QuoteSettings::new(
            format!("{}/quote", server.uri()),
            format!("{}/upload/", server.uri()),
            "cdn-secret",
        )
        .unwrap()
        .with_staging_dir(staging.path())
        .with_retry(RetryPolicy::new(3, Duration::from_millis(5)));

        Mock::given(method("GET"))
            .and(path("/images/quote-abc.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG-data".to_vec()))
            .mount(&server)
            .await;

        Services {
            server,
            _staging: staging,
            settings,
        }
    }

    async fn mount_render(server: &MockServer, expected: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/quote"))
            .and(body_partial_json(expected))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "url": format!("{}/images/quote-abc.png", server.uri())
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn pipeline(services: &Services, platform: MockPlatform) -> QuoteImageUseCase {
        QuoteImageUseCase::new(
            &services.settings,
            resolver(platform),
            Arc::new(QuoteApiClient::new(&services.settings).unwrap()),
            Arc::new(CdnUploader::new(&services.settings).unwrap()),
            bot(),
        )
    }

    #[tokio::test]
    async fn test_detected_reply_publishes_after_one_render_and_one_upload() {
        let services = services().await;
        mount_render(
            &services.server,
            serde_json::json!({
                "username": "haiku_fan",
                "display_name": "Haiku Nick",
                "text": "咲いた\n花が\n綺麗",
                "avatar": "https://cdn.discordapp.com/avatars/10/poet.png?size=1024",
                "color": true
            }),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/upload/senryu"))
            .and(header("authorization", "Bearer cdn-secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("https://cdn.example.com//senryu//quote-abc.png\n"),
            )
            .expect(1)
            .mount(&services.server)
            .await;

        let author = User::new(10_u64, "haiku_fan", Some("poet".into()), false);
        let platform = MockPlatform::new(bot())
            .with_message(Message::new(99_u64, CHANNEL, author.clone(), "咲いた花が綺麗"))
            .with_member(Member::new(GUILD, Some(author)).with_nick("Haiku Nick"));
        let target = Message::new(100_u64, CHANNEL, bot(), "川柳を検出しました！\n「咲いた 花が 綺麗」")
            .with_reference(MessageReference::new(Some(MessageId(99)), None));

        let outcome = pipeline(&services, platform)
            .execute(QuoteRequest::new(target).in_guild(GUILD))
            .await
            .unwrap();

        assert_eq!(
            outcome.url(),
            Some("https://cdn.example.com/senryu/quote-abc.png")
        );
    }

    #[tokio::test]
    async fn test_forbidden_mention_attributes_mentioned_user() {
        let services = services().await;
        mount_render(
            &services.server,
            serde_json::json!({
                "username": "late_poet",
                "display_name": "Sleepyhead",
                "text": "遅刻だ\n今日も\n寝坊で"
            }),
        )
        .await;
        Mock::given(method("POST"))
            .and(path("/upload/senryu"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("https://cdn.example.com/senryu/b.png"),
            )
            .expect(1)
            .mount(&services.server)
            .await;

        let platform = MockPlatform::new(bot()).with_user(
            User::new(9999_u64, "late_poet", None, false).with_global_name("Sleepyhead"),
        );
        let target = Message::new(
            100_u64,
            CHANNEL,
            bot(),
            "<@9999>が「遅刻だ 今日も 寝坊で」って詠んだのが最後やぞ",
        );

        let outcome = pipeline(&services, platform)
            .execute(QuoteRequest::new(target).in_guild(GUILD))
            .await
            .unwrap();

        assert_eq!(outcome.url(), Some("https://cdn.example.com/senryu/b.png"));
        let event = SenryuClassifier::classify(
            "<@9999>が「遅刻だ 今日も 寝坊で」って詠んだのが最後やぞ",
        );
        assert_eq!(
            event.kind(),
            crate::domain::entities::SenryuKind::Forbidden {
                referenced_author: Some(UserId(9999))
            }
        );
    }

    #[tokio::test]
    async fn test_cdn_failing_three_times_surfaces_upload_error() {
        let services = services().await;
        mount_render(&services.server, serde_json::json!({ "color": true })).await;
        Mock::given(method("POST"))
            .and(path("/upload/senryu"))
            .respond_with(ResponseTemplate::new(500).set_body_string("storage offline"))
            .expect(3)
            .mount(&services.server)
            .await;

        let target = Message::new(100_u64, CHANNEL, bot(), "ここで一句「a b c」");
        let error = pipeline(&services, MockPlatform::new(bot()))
            .execute(QuoteRequest::new(target))
            .await
            .unwrap_err();

        match &error {
            QuoteError::CdnUpload { attempts, last } => {
                assert_eq!(*attempts, 3);
                assert_eq!(last, &UploadAttemptError::status(500, "storage offline"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(error.is_upload_error());
        assert_eq!(
            RetryPolicy::default().schedule(),
            vec![Duration::from_secs(2), Duration::from_secs(4)]
        );
    }
}
