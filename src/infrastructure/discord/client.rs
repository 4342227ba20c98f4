//! Discord REST client for bot lookups.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ErrorResponse, MemberResponse, MessageResponse, UserResponse};
use crate::domain::entities::{ChannelId, GuildId, Member, Message, MessageId, SecretToken, User, UserId};
use crate::domain::errors::PlatformError;
use crate::domain::ports::PlatformPort;

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = concat!(
    "DiscordBot (https://github.com/linuxmobile/senryu-quote, ",
    env!("CARGO_PKG_VERSION"),
    ")"
);
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Discord REST client authenticated as a bot.
pub struct DiscordRestClient {
    client: Client,
    base_url: String,
    token: SecretToken,
}

impl DiscordRestClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: SecretToken) -> Result<Self, PlatformError> {
        Self::with_base_url(token, DISCORD_API_BASE)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        token: SecretToken,
        base_url: impl Into<String>,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| PlatformError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, PlatformError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%resource, "Requesting Discord resource");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bot {}", self.token.as_str()))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %resource, "Failed to connect to Discord API");
                if e.is_timeout() {
                    PlatformError::network("request timed out")
                } else if e.is_connect() {
                    PlatformError::network("failed to connect to Discord")
                } else {
                    PlatformError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response, resource).await);
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, %resource, "Failed to parse Discord response");
            PlatformError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
        resource: &str,
    ) -> PlatformError {
        let error = response.json::<ErrorResponse>().await.ok();
        let error_message = error
            .as_ref()
            .map_or_else(|| format!("HTTP {status}"), |e| e.message.clone());

        match status {
            StatusCode::NOT_FOUND => PlatformError::not_found(resource),
            StatusCode::UNAUTHORIZED => PlatformError::unauthorized("invalid bot token"),
            StatusCode::FORBIDDEN => {
                PlatformError::unauthorized(format!("access denied: {error_message}"))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_ms = error
                    .and_then(|e| e.retry_after)
                    .map_or(DEFAULT_RETRY_AFTER_MS, |secs| (secs * 1000.0).ceil() as u64);
                PlatformError::RateLimited { retry_after_ms }
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                PlatformError::network("Discord API is temporarily unavailable")
            }
            _ => PlatformError::unexpected(format!(
                "unexpected response: {status} - {error_message}"
            )),
        }
    }
}

#[async_trait]
impl PlatformPort for DiscordRestClient {
    async fn current_user(&self) -> Result<User, PlatformError> {
        let user = self
            .get::<UserResponse>("/users/@me", "current user")
            .await?
            .into_user()?;
        debug!(user_id = %user.id(), username = %user.username(), "Fetched bot user");
        Ok(user)
    }

    async fn fetch_user(&self, user_id: UserId) -> Result<User, PlatformError> {
        self.get::<UserResponse>(&format!("/users/{user_id}"), &format!("user {user_id}"))
            .await?
            .into_user()
    }

    async fn fetch_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Member, PlatformError> {
        self.get::<MemberResponse>(
            &format!("/guilds/{guild_id}/members/{user_id}"),
            &format!("member {user_id} of guild {guild_id}"),
        )
        .await?
        .into_member(guild_id)
    }

    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message, PlatformError> {
        self.get::<MessageResponse>(
            &format!("/channels/{channel_id}/messages/{message_id}"),
            &format!("message {message_id}"),
        )
        .await?
        .into_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token() -> SecretToken {
        SecretToken::new("bot-secret").unwrap()
    }

    async fn client(server: &MockServer) -> DiscordRestClient {
        DiscordRestClient::with_base_url(token(), server.uri()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        assert!(DiscordRestClient::new(token()).is_ok());
    }

    #[tokio::test]
    async fn test_current_user_sends_bot_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .and(header("authorization", "Bot bot-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "1",
                "username": "senryu-bot",
                "avatar": "a_anim",
                "bot": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server).await.current_user().await.unwrap();

        assert!(user.is_bot());
        assert_eq!(
            user.avatar_url().as_deref(),
            Some("https://cdn.discordapp.com/avatars/1/a_anim.gif?size=1024")
        );
    }

    #[tokio::test]
    async fn test_fetch_member_maps_nick_and_guild_avatar() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/guilds/5/members/10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": "10", "username": "poet", "avatar": null},
                "nick": "Poet Nick",
                "avatar": "guildhash"
            })))
            .mount(&server)
            .await;

        let member = client(&server)
            .await
            .fetch_member(GuildId(5), UserId(10))
            .await
            .unwrap();

        assert_eq!(member.nick(), Some("Poet Nick"));
        assert_eq!(
            member.guild_avatar_url(UserId(10)).as_deref(),
            Some("https://cdn.discordapp.com/guilds/5/users/10/avatars/guildhash.png?size=1024")
        );
    }

    #[tokio::test]
    async fn test_missing_message_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/3/messages/4"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Unknown Message", "code": 10008})),
            )
            .mount(&server)
            .await;

        let error = client(&server)
            .await
            .fetch_message(ChannelId(3), MessageId(4))
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_rate_limit_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "message": "You are being rate limited.",
                "retry_after": 1.5,
                "global": false
            })))
            .mount(&server)
            .await;

        let error = client(&server)
            .await
            .fetch_user(UserId(7))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            PlatformError::RateLimited {
                retry_after_ms: 1500
            }
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let error = client(&server).await.current_user().await.unwrap_err();
        assert!(matches!(error, PlatformError::Unauthorized { .. }));
    }
}
