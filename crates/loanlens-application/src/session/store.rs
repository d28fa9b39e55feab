use super::signal::{SessionSignal, SignalChannel};
use loanlens_core::Result;
use loanlens_core::auth::{AuthGrant, parse_login_response, parse_me_response, parse_register_response};
use loanlens_core::credential::CredentialStore;
use loanlens_core::gateway::Gateway;
use loanlens_core::user::Identity;
use loanlens_core::validation::{LoginForm, RegisterForm};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::{OnceCell, watch};

/// Result of a successful registration call.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// The server issued a credential; the session is established.
    Authenticated(Value),
    /// Account created without auto-login; the caller should route to login.
    LoginRequired(Value),
}

impl RegisterOutcome {
    pub fn payload(&self) -> &Value {
        match self {
            Self::Authenticated(payload) | Self::LoginRequired(payload) => payload,
        }
    }
}

/// Owns the credential and identity of the current user.
///
/// `SessionStore` is responsible for:
/// - Establishing a session via login or registration
/// - Restoring a persisted session at startup
/// - Tearing the session down on logout
/// - Publishing the invalidation signal
///
/// Only these operations write the persisted credential or the identity.
pub struct SessionStore {
    gateway: Arc<dyn Gateway>,
    credentials: Arc<dyn CredentialStore>,
    identity: RwLock<Option<Identity>>,
    loading: AtomicBool,
    restored: OnceCell<()>,
    signal: SignalChannel,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn Gateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            identity: RwLock::new(None),
            loading: AtomicBool::new(true),
            restored: OnceCell::new(),
            signal: SignalChannel::new(),
        }
    }

    /// Restores the persisted session, if any, and returns the current
    /// identity.
    ///
    /// A stored credential is validated with `GET /auth/me`. Failures are
    /// logged, never returned; only an `Auth` rejection discards the
    /// credential, so a transport failure leaves it for the next start. The
    /// lookup runs once; later calls answer from the live identity without
    /// touching the network.
    pub async fn restore(&self) -> Option<Identity> {
        self.restored.get_or_init(|| self.restore_persisted()).await;
        self.identity()
    }

    async fn restore_persisted(&self) {
        match self.credentials.load() {
            Ok(None) => tracing::debug!("No persisted credential"),
            Ok(Some(_)) => match self.lookup_identity().await {
                Ok(identity) => {
                    tracing::info!("Restored session for {}", identity.display_name());
                    self.set_identity(Some(identity));
                    self.signal.set_authenticated(true);
                }
                Err(err) if err.is_auth() => {
                    tracing::warn!("Persisted credential rejected, discarding it: {}", err);
                    self.discard_credential();
                }
                Err(err) => {
                    tracing::warn!("Could not validate persisted credential, keeping it: {}", err);
                }
            },
            Err(err) => {
                tracing::warn!("Failed to read persisted credential: {}", err);
                self.discard_credential();
            }
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    /// Logs in and returns the raw response payload.
    ///
    /// # Errors
    ///
    /// - `Validation` when either field is blank (no request is sent)
    /// - `Auth` when the response carries no credential; nothing is persisted
    /// - `Network`/`Http` from the gateway
    pub async fn login(&self, email: &str, password: &str) -> Result<Value> {
        let request = LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        let raw = self.gateway.login(&request).await?;
        let grant = parse_login_response(&raw)?;
        self.establish(grant).await?;
        Ok(raw)
    }

    /// Registers a new account.
    ///
    /// Without a credential in the response the identity stays unset and
    /// [`RegisterOutcome::LoginRequired`] is returned.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<RegisterOutcome> {
        let request = RegisterForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
        .validate()?;

        let raw = self.gateway.register(&request).await?;
        match parse_register_response(&raw)? {
            Some(grant) => {
                self.establish(grant).await?;
                Ok(RegisterOutcome::Authenticated(raw))
            }
            None => {
                tracing::info!("Registered {} without auto-login", request.email);
                Ok(RegisterOutcome::LoginRequired(raw))
            }
        }
    }

    /// Clears the persisted credential and the identity.
    ///
    /// Idempotent. The in-memory session is dropped even when removing the
    /// credential from disk fails; that failure is returned.
    pub fn logout(&self) -> Result<()> {
        let was_authenticated = self.set_identity(None).is_some();
        let cleared = self.credentials.clear();
        self.signal.set_authenticated(false);

        if was_authenticated {
            tracing::info!("Logged out");
        }
        cleared
    }

    /// Forced logout after the server rejected the held credential outside
    /// the login flow.
    pub fn expire(&self) {
        tracing::warn!("Credential rejected by the server, logging out");
        if let Err(err) = self.logout() {
            tracing::warn!("Failed to discard expired credential: {}", err);
        }
    }

    /// Increments the invalidation signal. Touches neither network nor storage.
    pub fn bump_signal(&self) -> u64 {
        let revision = self.signal.bump();
        tracing::debug!(revision, "Invalidation signal bumped");
        revision
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSignal> {
        self.signal.subscribe()
    }

    pub fn signal(&self) -> SessionSignal {
        self.signal.current()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// `true` until the startup restore has resolved.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    async fn establish(&self, grant: AuthGrant) -> Result<()> {
        self.credentials.save(&grant.credential)?;

        let identity = match grant.identity {
            Some(identity) => identity,
            None => match self.lookup_identity().await {
                Ok(identity) => identity,
                Err(err) => {
                    self.discard_credential();
                    return Err(err);
                }
            },
        };

        tracing::info!("Session established for {}", identity.display_name());
        self.set_identity(Some(identity));
        self.signal.set_authenticated(true);
        Ok(())
    }

    async fn lookup_identity(&self) -> Result<Identity> {
        let raw = self.gateway.me().await?;
        parse_me_response(&raw)
    }

    fn discard_credential(&self) {
        if let Err(err) = self.credentials.clear() {
            tracing::warn!("Failed to discard credential: {}", err);
        }
    }

    /// Replaces the identity, returning the previous one.
    fn set_identity(&self, identity: Option<Identity>) -> Option<Identity> {
        let mut guard = self.identity.write().unwrap_or_else(|e| e.into_inner());
        std::mem::replace(&mut *guard, identity)
    }
}
