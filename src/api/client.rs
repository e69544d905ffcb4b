//! The authenticated API client.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::auth::store::CredentialStore;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::{SessionEvent, SessionEvents};
use crate::traits::{HttpClient, HttpError, Method, Notifier, Response};

use super::request::ApiRequest;
use super::request_interceptor::RequestInterceptor;
use super::response_interceptor::ResponseInterceptor;

/// HTTP client with the credential and classification pipeline attached.
///
/// Construct one per session and share it (`Arc<ApiClient>`); callers never
/// see the interceptors.
///
/// # Example
///
/// ```ignore
/// use shipdesk::adapters::{ConsoleNotifier, FileKeyValueStore, ReqwestHttpClient};
/// use shipdesk::api::ApiClient;
/// use shipdesk::auth::CredentialStore;
/// use shipdesk::config::ApiConfig;
/// use std::sync::Arc;
///
/// let config = ApiConfig::from_env();
/// let client = ApiClient::new(
///     config.clone(),
///     Arc::new(ReqwestHttpClient::with_timeout(config.timeout)?),
///     CredentialStore::new(Arc::new(FileKeyValueStore::new()?)),
///     Arc::new(ConsoleNotifier::new()),
/// );
/// let orders: Vec<Order> = client.get_json("/orders").await?;
/// ```
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn HttpClient>,
    credentials: CredentialStore,
    session: SessionEvents,
    request_interceptor: RequestInterceptor,
    response_interceptor: ResponseInterceptor,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn HttpClient>,
        credentials: CredentialStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = SessionEvents::new();
        let request_interceptor = RequestInterceptor::new(credentials.clone());
        let response_interceptor = ResponseInterceptor::new(
            credentials.clone(),
            notifier,
            session.clone(),
            config.login_path.clone(),
        );
        Self {
            config,
            transport,
            credentials,
            session,
            request_interceptor,
            response_interceptor,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The credential store the pipeline reads from.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Subscribe to session events (expiry, login, logout).
    pub fn subscribe_session(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    pub(crate) fn session_events(&self) -> &SessionEvents {
        &self.session
    }

    /// Send `request` through the full pipeline.
    ///
    /// The request interceptor runs once; a store failure rejects the call
    /// before anything is sent. Transport failures may be retried per the
    /// configured [`super::RetryPolicy`]; the final outcome is classified once.
    /// An unparseable URL is rejected as [`ApiError::InvalidRequest`] without
    /// a notification.
    pub async fn send(&self, mut request: ApiRequest) -> ApiResult<Response> {
        self.request_interceptor.apply(&mut request).await?;

        let url = self.config.url_for(&request.path);
        let result = self.transmit(&request, &url).await;

        // A malformed URL is a caller error, not a connectivity problem
        if let Err(HttpError::InvalidUrl(reason)) = &result {
            tracing::warn!("Refusing request to {}: {}", url, reason);
            return Err(ApiError::InvalidRequest(format!(
                "invalid URL '{}': {}",
                url, reason
            )));
        }

        if request.notify_errors {
            self.response_interceptor.handle(result).await
        } else {
            self.response_interceptor.handle_quietly(result).await
        }
    }

    async fn transmit(&self, request: &ApiRequest, url: &str) -> Result<Response, HttpError> {
        let retry = &self.config.retry;
        let mut attempt = 0;
        loop {
            let result = self
                .transport
                .execute(request.method, url, request.body.as_deref(), &request.headers)
                .await;

            match result {
                Err(err) if retry.should_retry(request.method, &err, attempt) => {
                    attempt += 1;
                    let delay = retry.delay_for(attempt);
                    tracing::debug!(
                        "{} {} failed ({}); retry {}/{} in {:?}",
                        request.method,
                        url,
                        err,
                        attempt,
                        retry.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// Send `request` and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let response = self.send(request).await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get(&self, path: &str) -> ApiResult<Response> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Response> {
        self.send(ApiRequest::delete(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.send(ApiRequest::with_json(Method::Post, path, body)?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::with_json(Method::Post, path, body)?)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.send(ApiRequest::with_json(Method::Put, path, body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.send(ApiRequest::with_json(Method::Patch, path, body)?).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
