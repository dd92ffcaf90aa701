// File: timerdash-core/src/client.rs
//
// REST implementation of the bot API traits. Thin request/response wrappers:
// build the URL, attach the bearer, unwrap the `{status, data, message}`
// envelope. A 401 on any authenticated call tears the session down before the
// error is returned.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use timerdash_common::models::{
    AddEventRequest, AddEventResponse, BotStatus, ControlAck, Envelope, EventCatalog, EventId,
    GameMode, GsiStatus, GuildId, GuildRequest, GuildSettings, LogEntry, LoginRequest,
    LoginResponse, NewEvent, StartTimerRequest, SubTimer, SubTimerAction, SubTimerRequest,
    UpdateSettingsRequest,
};
use timerdash_common::traits::{AuthApi, ControlApi, DashboardApi, EventAdminApi, SettingsApi};

use crate::Error;
use crate::config::DashboardConfig;
use crate::http::{DefaultHttpClient, HttpClient, HttpRequest, HttpResponse, Method};
use crate::session::SessionGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

pub struct RestClient<H: HttpClient = DefaultHttpClient> {
    http: H,
    base: Url,
    session: Arc<SessionGuard>,
}

impl RestClient<DefaultHttpClient> {
    pub fn from_config(config: &DashboardConfig, session: Arc<SessionGuard>) -> Result<Self, Error> {
        let http = DefaultHttpClient::new(config.request_timeout)?;
        Self::new(http, &config.base_url, session)
    }
}

impl<H: HttpClient> RestClient<H> {
    pub fn new(http: H, base_url: &str, session: Arc<SessionGuard>) -> Result<Self, Error> {
        // Url::join drops the last path segment unless it ends in '/'
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base, session })
    }

    pub fn session(&self) -> &Arc<SessionGuard> {
        &self.session
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, Error> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
        auth: Auth,
    ) -> Result<HttpResponse, Error> {
        let url = self.endpoint(path, query)?;
        let bearer = match auth {
            Auth::Bearer => self.session.authorize(),
            Auth::Anonymous => None,
        };
        debug!("{} {}", method, url);
        let resp = self
            .http
            .send(HttpRequest { method, url, bearer, body })
            .await?;

        if resp.status == 401 {
            let reason = error_message(&resp.body).unwrap_or_else(|| "Unauthorized".to_string());
            if auth == Auth::Bearer {
                self.session.invalidate(&reason);
            }
            return Err(Error::Unauthorized(reason));
        }
        if !resp.is_success() {
            warn!("{} {} answered {}", method, path, resp.status);
            let body = error_message(&resp.body).unwrap_or(resp.body);
            return Err(Error::Status { status: resp.status, body });
        }
        Ok(resp)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, Error> {
        let resp = self.send(Method::Get, path, query, None, Auth::Bearer).await?;
        let envelope: Envelope<T> = serde_json::from_str(&resp.body)?;
        envelope.into_result()
    }

    /// Write call whose answer is only shown to the operator.
    async fn command<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<ControlAck, Error> {
        let body = body.map(serde_json::to_string).transpose()?;
        let resp = self.send(method, path, query, body, Auth::Bearer).await?;
        let envelope: Envelope<Value> = serde_json::from_str(&resp.body)?;
        if envelope.status.as_deref() == Some("error") {
            return Err(Error::Api(
                envelope.message.unwrap_or_else(|| "unspecified server error".to_string()),
            ));
        }
        let mut ack = ControlAck::from(envelope.data.unwrap_or(Value::Null));
        if ack.message.is_none() {
            ack.message = envelope.message;
        }
        Ok(ack)
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope<Value>>(body)
        .ok()
        .and_then(|env| env.message)
}

fn guild_query(guild_id: &str) -> [(&'static str, String); 1] {
    [("guild_id", guild_id.to_string())]
}

#[async_trait]
impl<H: HttpClient> DashboardApi for RestClient<H> {
    async fn fetch_status(&self) -> Result<BotStatus, Error> {
        self.get("status", &[]).await
    }

    async fn fetch_events(&self, guild_id: GuildId, mode: GameMode) -> Result<EventCatalog, Error> {
        self.get("events", &[("guild_id", guild_id), ("mode", mode.as_str().to_string())])
            .await
    }

    async fn fetch_logs(&self, limit: u32, offset: u32) -> Result<Vec<LogEntry>, Error> {
        self.get("logs", &[("limit", limit.to_string()), ("offset", offset.to_string())])
            .await
    }

    async fn fetch_gsi_status(&self) -> Result<GsiStatus, Error> {
        self.get("gsi/status", &[]).await
    }
}

#[async_trait]
impl<H: HttpClient> AuthApi for RestClient<H> {
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, Error> {
        let body = serde_json::to_string(&LoginRequest { username, password })?;
        let resp = self
            .send(Method::Post, "auth/login", &[], Some(body), Auth::Anonymous)
            .await?;
        let envelope: Envelope<LoginResponse> = serde_json::from_str(&resp.body)?;
        envelope.into_result()
    }

    async fn logout(&self) -> Result<(), Error> {
        self.command::<Value>(Method::Post, "auth/logout", &[], None).await?;
        Ok(())
    }
}

#[async_trait]
impl<H: HttpClient> ControlApi for RestClient<H> {
    async fn start_timer(&self, guild_id: GuildId, countdown: String, mode: GameMode) -> Result<ControlAck, Error> {
        let body = StartTimerRequest { guild_id, countdown, mode };
        self.command(Method::Post, "timers/start", &[], Some(&body)).await
    }

    async fn stop_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        self.command(Method::Post, "timers/stop", &[], Some(&GuildRequest { guild_id })).await
    }

    async fn pause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        self.command(Method::Post, "timers/pause", &[], Some(&GuildRequest { guild_id })).await
    }

    async fn unpause_timer(&self, guild_id: GuildId) -> Result<ControlAck, Error> {
        self.command(Method::Post, "timers/unpause", &[], Some(&GuildRequest { guild_id })).await
    }

    async fn sub_timer(&self, guild_id: GuildId, timer: SubTimer, action: SubTimerAction) -> Result<ControlAck, Error> {
        let path = format!("commands/{}", timer.as_str());
        let body = SubTimerRequest { guild_id, action };
        self.command(Method::Post, &path, &[], Some(&body)).await
    }
}

#[async_trait]
impl<H: HttpClient> EventAdminApi for RestClient<H> {
    async fn add_event(&self, guild_id: GuildId, mode: GameMode, event: NewEvent) -> Result<EventId, Error> {
        event.validate()?;
        let body = serde_json::to_string(&AddEventRequest { guild_id, mode, event })?;
        let resp = self.send(Method::Post, "events", &[], Some(body), Auth::Bearer).await?;
        let envelope: Envelope<AddEventResponse> = serde_json::from_str(&resp.body)?;
        Ok(envelope.into_result()?.event_id)
    }

    async fn remove_event(&self, guild_id: GuildId, event_id: EventId) -> Result<ControlAck, Error> {
        let path = format!("events/{}", event_id);
        self.command::<Value>(Method::Delete, &path, &guild_query(&guild_id), None).await
    }
}

#[async_trait]
impl<H: HttpClient> SettingsApi for RestClient<H> {
    async fn fetch_settings(&self, guild_id: GuildId) -> Result<GuildSettings, Error> {
        self.get("settings", &guild_query(&guild_id)).await
    }

    async fn update_settings(&self, guild_id: GuildId, settings: GuildSettings) -> Result<ControlAck, Error> {
        let body = UpdateSettingsRequest { guild_id, settings };
        self.command(Method::Put, "settings", &[], Some(&body)).await
    }
}
